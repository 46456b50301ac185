// client/src/services/inventory_service/mod.rs
// InventoryService owns the state container and routes every user action to
// the store. Network-bound actions live in the handler submodules.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use shared::models::{Article, ArticleId, ImportReport};
use tokio::sync::RwLock;

use super::ArticleStore;
use crate::config::ClientSettings;
use crate::error::ClientError;
use crate::form::Field;
use crate::grid::SortColumn;
use crate::notice::PendingDelete;
use crate::preferences::{self, PreferenceStore, ThemeMode};
use crate::state::AppState;

pub mod delete_article;
pub mod helpers;
pub mod import_articles;
pub mod save_article;

#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn ArticleStore>,
    prefs: Arc<dyn PreferenceStore>,
    state: Arc<RwLock<AppState>>,
}

impl InventoryService {
    pub fn new(
        store: Arc<dyn ArticleStore>,
        prefs: Arc<dyn PreferenceStore>,
        settings: &ClientSettings,
    ) -> Self {
        let mut state = AppState::new(settings);
        let page_size = preferences::load_page_size(prefs.as_ref(), settings.default_page_size);
        if !state.grid.set_page_size(page_size) {
            tracing::warn!(page_size, "Stored page size is not offered, using default");
        }
        state.theme = preferences::load_theme(prefs.as_ref());

        InventoryService {
            store,
            prefs,
            state: Arc::new(RwLock::new(state)),
        }
    }

    pub fn state(&self) -> Arc<RwLock<AppState>> {
        self.state.clone()
    }

    pub async fn snapshot(&self) -> AppState {
        self.state.read().await.clone()
    }

    pub async fn refresh(&self) -> Result<usize, ClientError> {
        helpers::reload_articles(self.store.as_ref(), &self.state).await
    }

    // --- form ---

    pub async fn set_field(&self, field: Field, value: String) {
        self.state.write().await.form.set_field(field, value);
    }

    pub async fn touch(&self, field: Field) {
        self.state.write().await.form.touch(field);
    }

    /// Loads a cached article into the form. Returns false for unknown ids.
    pub async fn begin_edit(&self, id: &ArticleId) -> bool {
        let mut guard = self.state.write().await;
        let st = &mut *guard;
        match st.articles.iter().find(|a| &a.id == id) {
            Some(article) => {
                st.form.begin_edit(article);
                true
            }
            None => false,
        }
    }

    pub async fn cancel_edit(&self) {
        self.state.write().await.form.reset();
    }

    pub async fn submit(&self) -> Result<Article, ClientError> {
        save_article::handle_submit(self.store.as_ref(), &self.state).await
    }

    // --- delete / undo ---

    pub async fn request_delete(&self, id: &ArticleId) -> bool {
        let mut st = self.state.write().await;
        if st.pending_delete.as_ref().is_some_and(|p| p.in_flight) {
            return false;
        }
        let Some(article) = st.find_article(id).cloned() else {
            return false;
        };
        st.pending_delete = Some(PendingDelete { article, in_flight: false });
        true
    }

    /// Closes the confirmation unless the delete is already running.
    pub async fn cancel_delete(&self) -> bool {
        let mut st = self.state.write().await;
        if st.pending_delete.as_ref().is_some_and(|p| p.in_flight) {
            return false;
        }
        st.pending_delete = None;
        true
    }

    pub async fn confirm_delete(&self) -> Result<(), ClientError> {
        delete_article::handle_confirm_delete(self.store.as_ref(), &self.state).await
    }

    pub async fn undo_delete(&self) -> Result<Article, ClientError> {
        delete_article::handle_undo(self.store.as_ref(), &self.state).await
    }

    pub async fn dismiss_undo(&self) {
        self.state.write().await.undo = None;
    }

    // --- import / export ---

    pub async fn select_import_file(&self, path: Option<PathBuf>) {
        self.state.write().await.import.selected_file = path;
    }

    pub async fn import_selected(&self) -> Result<ImportReport, ClientError> {
        import_articles::handle_import(self.store.as_ref(), &self.state).await
    }

    pub async fn export_to(&self, target: &Path) -> Result<(), ClientError> {
        import_articles::handle_export(self.store.as_ref(), &self.state, target).await
    }

    // --- listing view ---

    pub async fn set_search(&self, query: String) {
        self.state.write().await.grid.set_search(query);
    }

    pub async fn toggle_sort(&self, column: SortColumn) {
        self.state.write().await.grid.toggle_sort(column);
    }

    pub async fn set_page(&self, page: usize) {
        self.state.write().await.grid.set_page(page);
    }

    /// Applies and persists a page size from the offered options.
    pub async fn set_page_size(&self, size: usize) -> Result<(), ClientError> {
        if !self.state.write().await.grid.set_page_size(size) {
            return Err(ClientError::Config(format!("Page size {} is not offered", size)));
        }
        self.persist(move |prefs| preferences::save_page_size(prefs, size)).await
    }

    pub async fn toggle_theme(&self) -> Result<ThemeMode, ClientError> {
        let mode = {
            let mut st = self.state.write().await;
            st.theme = st.theme.toggled();
            st.theme
        };
        self.persist(move |prefs| preferences::save_theme(prefs, mode)).await?;
        Ok(mode)
    }

    // Preference writes hit the disk, so they run on the blocking pool.
    async fn persist<F>(&self, save: F) -> Result<(), ClientError>
    where
        F: FnOnce(&dyn PreferenceStore) -> Result<(), ClientError> + Send + 'static,
    {
        let prefs = self.prefs.clone();
        tokio::task::spawn_blocking(move || save(prefs.as_ref()))
            .await
            .map_err(|e| ClientError::Preferences(format!("Preference write task failed: {}", e)))?
    }

    // --- notices ---

    pub async fn dismiss_notice(&self) {
        self.state.write().await.notice = None;
    }

    pub async fn tick(&self) {
        self.state.write().await.expire_transients(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::TouchedSet;
    use crate::notice::Severity;
    use crate::preferences::MemoryPreferenceStore;
    use crate::services::MemoryArticleStore;
    use reqwest::StatusCode;
    use shared::models::{ArticlePayload, RowError};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn payload(code: &str, description: &str, price: f64) -> ArticlePayload {
        ArticlePayload {
            code: code.into(),
            description: description.into(),
            price,
        }
    }

    async fn create_test_service(seed: Vec<ArticlePayload>) -> (InventoryService, Arc<MemoryArticleStore>) {
        let store = Arc::new(MemoryArticleStore::with_articles(seed).await);
        let service = InventoryService::new(
            store.clone(),
            Arc::new(MemoryPreferenceStore::new()),
            &ClientSettings::default(),
        );
        service.refresh().await.unwrap();
        (service, store)
    }

    async fn fill_form(service: &InventoryService, code: &str, description: &str, price: &str) {
        service.set_field(Field::Code, code.into()).await;
        service.set_field(Field::Description, description.into()).await;
        service.set_field(Field::Price, price.into()).await;
        for field in [Field::Code, Field::Description, Field::Price] {
            service.touch(field).await;
        }
    }

    #[tokio::test]
    async fn test_create_article_end_to_end() {
        let (service, store) = create_test_service(vec![]).await;
        fill_form(&service, "X1", "Widget", "10,50").await;
        assert!(service.snapshot().await.validation().can_submit);

        let created = service.submit().await.unwrap();
        assert_eq!(created.price, Some(10.5));
        assert_eq!(store.articles().await[0].payload(), payload("X1", "Widget", 10.5));

        let st = service.snapshot().await;
        assert_eq!(st.articles.len(), 1);
        assert_eq!(st.form.draft.code, "");
        assert_eq!(st.form.touched, TouchedSet::default());
        assert!(!st.submitting);
        assert_eq!(st.notice.unwrap().message, "Article created");
    }

    #[tokio::test]
    async fn test_invalid_submit_never_reaches_store() {
        let (service, store) = create_test_service(vec![payload("A1", "Bolt", 1.0)]).await;
        service.set_field(Field::Code, "A1".into()).await;
        service.set_field(Field::Description, "Dup".into()).await;
        service.set_field(Field::Price, "3".into()).await;
        store.fail_next(StatusCode::INTERNAL_SERVER_ERROR).await;

        let err = service.submit().await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        let st = service.snapshot().await;
        assert_eq!(st.form.touched, TouchedSet::all());
        assert!(st.validation().code_has_error);
        assert_eq!(st.notice.unwrap().severity, Severity::Warning);
        // the armed failure is still pending, so the store was not called
        assert!(store.list_articles().await.is_err());
    }

    // Holds updates until the test opens the gate.
    struct GatedStore {
        inner: MemoryArticleStore,
        gate: tokio::sync::Notify,
    }

    #[async_trait::async_trait]
    impl ArticleStore for GatedStore {
        async fn list_articles(&self) -> Result<Vec<Article>, ClientError> {
            self.inner.list_articles().await
        }

        async fn create_article(&self, payload: &ArticlePayload) -> Result<Article, ClientError> {
            self.inner.create_article(payload).await
        }

        async fn update_article(&self, id: &ArticleId, payload: &ArticlePayload) -> Result<Article, ClientError> {
            self.gate.notified().await;
            self.inner.update_article(id, payload).await
        }

        async fn delete_article(&self, id: &ArticleId) -> Result<(), ClientError> {
            self.inner.delete_article(id).await
        }

        async fn import_spreadsheet(&self, file_name: &str, bytes: Vec<u8>) -> Result<ImportReport, ClientError> {
            self.inner.import_spreadsheet(file_name, bytes).await
        }

        async fn export_spreadsheet(&self) -> Result<Vec<u8>, ClientError> {
            self.inner.export_spreadsheet().await
        }
    }

    #[tokio::test]
    async fn test_stale_save_does_not_reset_new_draft() {
        let store = Arc::new(GatedStore {
            inner: MemoryArticleStore::with_articles(vec![payload("A1", "Bolt", 1.0)]).await,
            gate: tokio::sync::Notify::new(),
        });
        let service = InventoryService::new(
            store.clone(),
            Arc::new(MemoryPreferenceStore::new()),
            &ClientSettings::default(),
        );
        service.refresh().await.unwrap();
        let id = service.snapshot().await.articles[0].id.clone();
        assert!(service.begin_edit(&id).await);
        service.set_field(Field::Description, "Long bolt".into()).await;

        let handle = {
            let service = service.clone();
            tokio::spawn(async move { service.submit().await })
        };
        while !service.snapshot().await.submitting {
            tokio::task::yield_now().await;
        }
        service.cancel_edit().await;
        service.set_field(Field::Code, "NEW".into()).await;
        store.gate.notify_one();
        handle.await.unwrap().unwrap();

        let st = service.snapshot().await;
        assert_eq!(st.articles[0].description, "Long bolt");
        assert_eq!(st.form.draft.code, "NEW");
        assert!(!st.submitting);
    }

    #[tokio::test]
    async fn test_second_submit_while_pending_is_busy() {
        let (service, _store) = create_test_service(vec![]).await;
        fill_form(&service, "X1", "Widget", "1").await;
        service.state().write().await.submitting = true;
        assert!(matches!(service.submit().await, Err(ClientError::Busy)));
    }

    #[tokio::test]
    async fn test_store_failure_keeps_draft() {
        let (service, store) = create_test_service(vec![]).await;
        fill_form(&service, "X1", "Widget", "1").await;
        store.fail_next(StatusCode::BAD_REQUEST).await;

        assert!(service.submit().await.is_err());
        let st = service.snapshot().await;
        assert_eq!(st.form.draft.code, "X1");
        assert!(!st.submitting);
        let notice = st.notice.unwrap();
        assert_eq!(notice.severity, Severity::Error);
        assert_eq!(notice.message, "Could not save the article");
    }

    #[tokio::test]
    async fn test_delete_then_undo_restores_article() {
        let (service, store) = create_test_service(vec![payload("A1", "Bolt", 2.5)]).await;
        let deleted = service.snapshot().await.articles[0].clone();

        assert!(service.request_delete(&deleted.id).await);
        assert!(service.snapshot().await.pending_delete.is_some());
        service.confirm_delete().await.unwrap();

        let st = service.snapshot().await;
        assert!(st.articles.is_empty());
        assert!(st.pending_delete.is_none());
        assert_eq!(st.undo.as_ref().unwrap().message(), "Article \"Bolt\" deleted");

        let restored = service.undo_delete().await.unwrap();
        assert_ne!(restored.id, deleted.id);
        assert_eq!(restored.payload(), deleted.payload());
        let st = service.snapshot().await;
        assert!(st.undo.is_none());
        assert_eq!(st.articles.len(), 1);
        assert_eq!(st.notice.unwrap().message, "Article restored");
        assert_eq!(store.articles().await.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_delete_closes_confirmation() {
        let (service, store) = create_test_service(vec![payload("A1", "Bolt", 2.5)]).await;
        let id = service.snapshot().await.articles[0].id.clone();
        service.request_delete(&id).await;
        store.fail_next(StatusCode::INTERNAL_SERVER_ERROR).await;

        assert!(service.confirm_delete().await.is_err());
        let st = service.snapshot().await;
        assert!(st.pending_delete.is_none());
        assert!(st.undo.is_none());
        assert_eq!(st.articles.len(), 1);
    }

    #[tokio::test]
    async fn test_confirm_without_request_and_undo_without_delete() {
        let (service, _store) = create_test_service(vec![]).await;
        assert!(matches!(service.confirm_delete().await, Err(ClientError::NoPendingDelete)));
        assert!(matches!(service.undo_delete().await, Err(ClientError::NoUndoEntry)));
        assert!(service.cancel_delete().await);
    }

    #[tokio::test]
    async fn test_import_reports_row_errors() {
        let (service, store) = create_test_service(vec![]).await;
        assert!(matches!(service.import_selected().await, Err(ClientError::NoImportFile)));

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"PK\x03\x04 not really a workbook").unwrap();
        service.select_import_file(Some(file.path().to_path_buf())).await;
        store
            .set_import_report(ImportReport {
                created: 3,
                updated: 1,
                errors: vec![RowError { row: 4, error: "Invalid price".into() }],
            })
            .await;

        let report = service.import_selected().await.unwrap();
        assert!(report.is_partial());
        let st = service.snapshot().await;
        assert!(!st.import.importing);
        assert_eq!(st.import.row_errors.len(), 1);
        assert_eq!(st.notice.unwrap().message, "Import: 3 created, 1 updated");
    }

    #[tokio::test]
    async fn test_export_writes_file() {
        let (service, _store) = create_test_service(vec![payload("A1", "Bolt", 2.5)]).await;
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("articles.xlsx");
        service.export_to(&target).await.unwrap();
        assert!(std::fs::metadata(&target).unwrap().len() > 0);
    }

    #[tokio::test]
    async fn test_refresh_failure_raises_notice() {
        let (service, store) = create_test_service(vec![payload("A1", "Bolt", 2.5)]).await;
        store.fail_next(StatusCode::SERVICE_UNAVAILABLE).await;
        assert!(service.refresh().await.is_err());
        let st = service.snapshot().await;
        assert_eq!(st.articles.len(), 1);
        assert!(!st.loading);
        assert_eq!(st.notice.unwrap().message, "Failed to load articles");
    }

    #[tokio::test]
    async fn test_page_size_and_theme_are_persisted() {
        let prefs = Arc::new(MemoryPreferenceStore::new());
        let settings = ClientSettings::default();
        let service = InventoryService::new(Arc::new(MemoryArticleStore::new()), prefs.clone(), &settings);

        service.set_page_size(25).await.unwrap();
        assert!(service.set_page_size(3).await.is_err());
        assert_eq!(service.toggle_theme().await.unwrap(), ThemeMode::Dark);

        let reopened = InventoryService::new(Arc::new(MemoryArticleStore::new()), prefs, &settings);
        let st = reopened.snapshot().await;
        assert_eq!(st.grid.page_size, 25);
        assert_eq!(st.theme, ThemeMode::Dark);
    }

    #[tokio::test]
    async fn test_begin_edit_unknown_id() {
        let (service, _store) = create_test_service(vec![]).await;
        assert!(!service.begin_edit(&ArticleId::Number(99)).await);
        assert!(!service.request_delete(&ArticleId::Number(99)).await);
    }
}
