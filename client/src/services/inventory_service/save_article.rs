// Handler for form submission (create or update)
use std::sync::Arc;

use shared::models::Article;
use tokio::sync::RwLock;

use super::helpers::{reload_articles, report_failure};
use crate::error::ClientError;
use crate::form::SubmitRequest;
use crate::notice::Notice;
use crate::services::ArticleStore;
use crate::state::AppState;

pub async fn handle_submit(
    store: &dyn ArticleStore,
    state: &Arc<RwLock<AppState>>,
) -> Result<Article, ClientError> {
    let (request, generation) = {
        let mut guard = state.write().await;
        let st = &mut *guard;
        if st.submitting {
            return Err(ClientError::Busy);
        }
        let request = match st.form.submit(&st.articles) {
            Ok(request) => request,
            Err(e) => {
                report_failure(st, "Check the form fields", &e);
                return Err(e);
            }
        };
        st.submitting = true;
        (request, st.form.generation)
    };

    tracing::info!(code = %request.payload().code, price = request.payload().price, "Submitting article");
    let result = match &request {
        SubmitRequest::Create(payload) => store.create_article(payload).await,
        SubmitRequest::Update { id, payload } => store.update_article(id, payload).await,
    };

    let saved = match result {
        Ok(saved) => saved,
        Err(e) => {
            let mut st = state.write().await;
            st.submitting = false;
            report_failure(&mut st, "Could not save the article", &e);
            return Err(e);
        }
    };

    let reloaded = reload_articles(store, state).await;

    let mut st = state.write().await;
    st.submitting = false;
    if st.form.generation == generation {
        st.form.reset();
    } else {
        tracing::info!("Draft changed while saving, leaving it untouched");
    }
    if reloaded.is_ok() {
        st.raise(Notice::success(match request {
            SubmitRequest::Create(_) => "Article created",
            SubmitRequest::Update { .. } => "Article updated",
        }));
    }
    Ok(saved)
}
