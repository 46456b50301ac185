// Article store access and the service that drives the UI state.
pub mod http_store;
pub mod inventory_service;
pub mod memory_store;

use async_trait::async_trait;
use shared::models::{Article, ArticleId, ArticlePayload, ImportReport};

use crate::error::ClientError;

pub use http_store::HttpArticleStore;
pub use inventory_service::InventoryService;
pub use memory_store::MemoryArticleStore;

/// The remote source of truth for articles.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    async fn list_articles(&self) -> Result<Vec<Article>, ClientError>;

    async fn create_article(&self, payload: &ArticlePayload) -> Result<Article, ClientError>;

    async fn update_article(&self, id: &ArticleId, payload: &ArticlePayload) -> Result<Article, ClientError>;

    async fn delete_article(&self, id: &ArticleId) -> Result<(), ClientError>;

    /// Forwards the spreadsheet unparsed; the store does all row handling.
    async fn import_spreadsheet(&self, file_name: &str, bytes: Vec<u8>) -> Result<ImportReport, ClientError>;

    /// Fetches the exported workbook.
    async fn export_spreadsheet(&self) -> Result<Vec<u8>, ClientError>;
}
