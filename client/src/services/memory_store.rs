// In-process article store with the backend's uniqueness and id rules.
// Backs the service tests and offline demos of the GUI.
use async_trait::async_trait;
use reqwest::StatusCode;
use shared::models::{Article, ArticleId, ArticlePayload, ImportReport};
use tokio::sync::RwLock;

use super::ArticleStore;
use crate::error::ClientError;

#[derive(Debug, Default)]
struct Inner {
    articles: Vec<Article>,
    next_id: i64,
    fail_next: Option<StatusCode>,
    import_report: ImportReport,
}

#[derive(Debug, Default)]
pub struct MemoryArticleStore {
    inner: RwLock<Inner>,
}

impl MemoryArticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_articles(payloads: Vec<ArticlePayload>) -> Self {
        let store = Self::new();
        for payload in payloads {
            // codes given by the caller are assumed unique
            let _ = store.create_article(&payload).await;
        }
        store
    }

    /// Makes the next call answer with `status`.
    pub async fn fail_next(&self, status: StatusCode) {
        self.inner.write().await.fail_next = Some(status);
    }

    /// Report returned by the next import; created rows are not materialized.
    pub async fn set_import_report(&self, report: ImportReport) {
        self.inner.write().await.import_report = report;
    }

    pub async fn articles(&self) -> Vec<Article> {
        self.inner.read().await.articles.clone()
    }
}

fn check_failure(inner: &mut Inner, url: &str) -> Result<(), ClientError> {
    match inner.fail_next.take() {
        Some(status) => Err(ClientError::Status {
            status,
            url: url.to_string(),
        }),
        None => Ok(()),
    }
}

fn conflict(url: &str) -> ClientError {
    ClientError::Status {
        status: StatusCode::BAD_REQUEST,
        url: url.to_string(),
    }
}

#[async_trait]
impl ArticleStore for MemoryArticleStore {
    async fn list_articles(&self) -> Result<Vec<Article>, ClientError> {
        let mut inner = self.inner.write().await;
        check_failure(&mut inner, "memory://articles")?;
        Ok(inner.articles.clone())
    }

    async fn create_article(&self, payload: &ArticlePayload) -> Result<Article, ClientError> {
        let mut inner = self.inner.write().await;
        check_failure(&mut inner, "memory://articles")?;
        if inner.articles.iter().any(|a| a.code == payload.code) {
            return Err(conflict("memory://articles"));
        }
        inner.next_id += 1;
        let article = Article {
            id: ArticleId::Number(inner.next_id),
            code: payload.code.clone(),
            description: payload.description.clone(),
            price: Some(payload.price),
        };
        inner.articles.push(article.clone());
        Ok(article)
    }

    async fn update_article(&self, id: &ArticleId, payload: &ArticlePayload) -> Result<Article, ClientError> {
        let url = format!("memory://articles/{}", id);
        let mut inner = self.inner.write().await;
        check_failure(&mut inner, &url)?;
        if inner.articles.iter().any(|a| &a.id != id && a.code == payload.code) {
            return Err(conflict(&url));
        }
        let article = inner
            .articles
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or(ClientError::Status {
                status: StatusCode::NOT_FOUND,
                url: url.clone(),
            })?;
        article.code = payload.code.clone();
        article.description = payload.description.clone();
        article.price = Some(payload.price);
        Ok(article.clone())
    }

    async fn delete_article(&self, id: &ArticleId) -> Result<(), ClientError> {
        let url = format!("memory://articles/{}", id);
        let mut inner = self.inner.write().await;
        check_failure(&mut inner, &url)?;
        let before = inner.articles.len();
        inner.articles.retain(|a| &a.id != id);
        if inner.articles.len() == before {
            return Err(ClientError::Status {
                status: StatusCode::NOT_FOUND,
                url,
            });
        }
        Ok(())
    }

    async fn import_spreadsheet(&self, _file_name: &str, _bytes: Vec<u8>) -> Result<ImportReport, ClientError> {
        let mut inner = self.inner.write().await;
        check_failure(&mut inner, "memory://articles/import")?;
        Ok(inner.import_report.clone())
    }

    async fn export_spreadsheet(&self) -> Result<Vec<u8>, ClientError> {
        let mut inner = self.inner.write().await;
        check_failure(&mut inner, "memory://articles/export")?;
        Ok(serde_json::to_vec(&inner.articles)?)
    }
}
