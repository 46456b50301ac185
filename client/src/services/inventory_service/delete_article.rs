// Handlers for confirmed deletes and their undo
use std::sync::Arc;

use shared::models::Article;
use tokio::sync::RwLock;

use super::helpers::{reload_articles, report_failure};
use crate::error::ClientError;
use crate::notice::{Notice, UndoEntry};
use crate::services::ArticleStore;
use crate::state::AppState;

pub async fn handle_confirm_delete(
    store: &dyn ArticleStore,
    state: &Arc<RwLock<AppState>>,
) -> Result<(), ClientError> {
    let article = {
        let mut st = state.write().await;
        let pending = st.pending_delete.as_mut().ok_or(ClientError::NoPendingDelete)?;
        if pending.in_flight {
            return Err(ClientError::Busy);
        }
        pending.in_flight = true;
        pending.article.clone()
    };

    if let Err(e) = store.delete_article(&article.id).await {
        let mut st = state.write().await;
        st.pending_delete = None;
        report_failure(&mut st, "Could not delete the article", &e);
        return Err(e);
    }

    tracing::info!(id = %article.id, code = %article.code, "Article deleted, undo available");
    state.write().await.undo = Some(UndoEntry::new(article));
    let reloaded = reload_articles(store, state).await;

    let mut st = state.write().await;
    st.pending_delete = None;
    if reloaded.is_ok() {
        st.raise(Notice::success("Article deleted"));
    }
    Ok(())
}

/// Re-creates the last deleted article. The store assigns a new id.
pub async fn handle_undo(
    store: &dyn ArticleStore,
    state: &Arc<RwLock<AppState>>,
) -> Result<Article, ClientError> {
    let entry = state.write().await.undo.take().ok_or(ClientError::NoUndoEntry)?;

    let restored = match store.create_article(&entry.article.payload()).await {
        Ok(restored) => restored,
        Err(e) => {
            report_failure(&mut *state.write().await, "Could not undo the delete", &e);
            return Err(e);
        }
    };

    tracing::info!(old_id = %entry.article.id, new_id = %restored.id, "Deleted article restored");
    if reload_articles(store, state).await.is_ok() {
        state.write().await.raise(Notice::success("Article restored"));
    }
    Ok(restored)
}
