// REST client for the article store.
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use shared::models::{Article, ArticleId, ArticleListing, ArticlePayload, ImportReport};

use super::ArticleStore;
use crate::config::ClientSettings;
use crate::error::ClientError;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub struct HttpArticleStore {
    client: Client,
    base_url: String,
}

impl HttpArticleStore {
    pub fn new(settings: &ClientSettings) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(settings.request_timeout())
            .build()?;
        Ok(Self {
            client,
            base_url: settings.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn collection_url(&self) -> String {
        format!("{}/api/articles/", self.base_url)
    }

    pub fn item_url(&self, id: &ArticleId) -> String {
        format!("{}/api/articles/{}/", self.base_url, id)
    }

    pub fn import_url(&self) -> String {
        format!("{}/api/articles/import/", self.base_url)
    }

    pub fn export_url(&self) -> String {
        format!("{}/api/articles/export/", self.base_url)
    }
}

fn ensure_success(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ClientError::Status {
            status,
            url: resp.url().to_string(),
        });
    }
    Ok(resp)
}

#[async_trait]
impl ArticleStore for HttpArticleStore {
    async fn list_articles(&self) -> Result<Vec<Article>, ClientError> {
        let resp = ensure_success(self.client.get(self.collection_url()).send().await?)?;
        let listing: ArticleListing = resp.json().await?;
        let articles = listing.into_articles();
        tracing::debug!(count = articles.len(), "Fetched article listing");
        Ok(articles)
    }

    async fn create_article(&self, payload: &ArticlePayload) -> Result<Article, ClientError> {
        let resp = self.client.post(self.collection_url()).json(payload).send().await?;
        let created: Article = ensure_success(resp)?.json().await?;
        tracing::info!(id = %created.id, code = %created.code, "Article created");
        Ok(created)
    }

    async fn update_article(&self, id: &ArticleId, payload: &ArticlePayload) -> Result<Article, ClientError> {
        let resp = self.client.put(self.item_url(id)).json(payload).send().await?;
        let updated: Article = ensure_success(resp)?.json().await?;
        tracing::info!(id = %id, code = %updated.code, "Article updated");
        Ok(updated)
    }

    async fn delete_article(&self, id: &ArticleId) -> Result<(), ClientError> {
        ensure_success(self.client.delete(self.item_url(id)).send().await?)?;
        tracing::info!(id = %id, "Article deleted");
        Ok(())
    }

    async fn import_spreadsheet(&self, file_name: &str, bytes: Vec<u8>) -> Result<ImportReport, ClientError> {
        let size = bytes.len();
        let part = Part::bytes(bytes).file_name(file_name.to_string()).mime_str(XLSX_MIME)?;
        let form = Form::new().part("file", part);
        let resp = self.client.post(self.import_url()).multipart(form).send().await?;
        let report: ImportReport = ensure_success(resp)?.json().await?;
        tracing::info!(
            file = file_name,
            bytes = size,
            created = report.created,
            updated = report.updated,
            row_errors = report.errors.len(),
            "Spreadsheet imported"
        );
        Ok(report)
    }

    async fn export_spreadsheet(&self) -> Result<Vec<u8>, ClientError> {
        let resp = ensure_success(self.client.get(self.export_url()).send().await?)?;
        Ok(resp.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let settings = ClientSettings::default().with_api_url("http://store.test:8000/");
        let store = HttpArticleStore::new(&settings).unwrap();
        assert_eq!(store.collection_url(), "http://store.test:8000/api/articles/");
        assert_eq!(store.item_url(&ArticleId::Number(42)), "http://store.test:8000/api/articles/42/");
        assert_eq!(store.import_url(), "http://store.test:8000/api/articles/import/");
        assert_eq!(store.export_url(), "http://store.test:8000/api/articles/export/");
    }
}
