// Helpers shared by the inventory service handlers
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::{ClientError, ErrorKind};
use crate::notice::{Notice, Severity};
use crate::services::ArticleStore;
use crate::state::AppState;

/// Replaces the cached list with the store's current listing.
pub async fn reload_articles(store: &dyn ArticleStore, state: &Arc<RwLock<AppState>>) -> Result<usize, ClientError> {
    state.write().await.loading = true;
    let result = store.list_articles().await;

    let mut st = state.write().await;
    st.loading = false;
    match result {
        Ok(articles) => {
            let count = articles.len();
            st.articles = articles;
            Ok(count)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load articles");
            st.raise(Notice::new("Failed to load articles", Severity::Error));
            Err(e)
        }
    }
}

/// Raises the notice for a failed action. Store failures get the action's own
/// wording; everything else uses the generic mapping.
pub fn report_failure(st: &mut AppState, action: &str, err: &ClientError) {
    let notice = match err.kind() {
        ErrorKind::Network => Notice::new(action, Severity::Error),
        ErrorKind::Validation | ErrorKind::Local => Notice::from(err),
    };
    tracing::warn!(action, error = %err, "Action failed");
    st.raise(notice);
}
