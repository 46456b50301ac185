// Global application state for the inventory UI.
// Holds the cached articles, the form, the listing view and every transient
// message. The GUI renders snapshots of it; only `InventoryService` mutates it.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use shared::models::{Article, RowError};

use crate::config::ClientSettings;
use crate::form::{FormState, FormValidation};
use crate::grid::{total_price, GridPage, GridState};
use crate::notice::{Notice, PendingDelete, UndoEntry};
use crate::preferences::ThemeMode;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportState {
    pub selected_file: Option<PathBuf>,
    pub importing: bool,
    pub row_errors: Vec<RowError>,
}

impl ImportState {
    pub fn selected_name(&self) -> Option<String> {
        self.selected_file
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub articles: Vec<Article>,
    pub loading: bool,
    pub submitting: bool,
    pub form: FormState,
    pub grid: GridState,
    pub notice: Option<Notice>,
    pub undo: Option<UndoEntry>,
    pub pending_delete: Option<PendingDelete>,
    pub import: ImportState,
    pub theme: ThemeMode,
    pub notice_ttl: chrono::Duration,
    pub undo_ttl: chrono::Duration,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&ClientSettings::default())
    }
}

impl AppState {
    pub fn new(settings: &ClientSettings) -> Self {
        Self {
            articles: Vec::new(),
            loading: false,
            submitting: false,
            form: FormState::new(),
            grid: GridState::new(settings.page_size_options.clone(), settings.default_page_size),
            notice: None,
            undo: None,
            pending_delete: None,
            import: ImportState::default(),
            theme: ThemeMode::default(),
            notice_ttl: settings.notice_ttl(),
            undo_ttl: settings.undo_ttl(),
        }
    }

    pub fn validation(&self) -> FormValidation {
        self.form.validation(&self.articles)
    }

    pub fn total(&self) -> f64 {
        total_price(&self.articles)
    }

    pub fn page(&mut self) -> GridPage {
        self.grid.view(&self.articles)
    }

    pub fn find_article(&self, id: &shared::models::ArticleId) -> Option<&Article> {
        self.articles.iter().find(|a| &a.id == id)
    }

    pub fn raise(&mut self, notice: Notice) {
        tracing::debug!(severity = ?notice.severity, message = %notice.message, "Notice raised");
        self.notice = Some(notice);
    }

    /// Drops the notice and undo entry once their display time is over.
    pub fn expire_transients(&mut self, now: DateTime<Utc>) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now, self.notice_ttl)) {
            self.notice = None;
        }
        if self.undo.as_ref().is_some_and(|u| u.is_expired(now, self.undo_ttl)) {
            self.undo = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::Severity;
    use shared::models::ArticleId;

    #[test]
    fn test_transients_expire_independently() {
        let mut state = AppState::default();
        state.raise(Notice::new("Article deleted", Severity::Success));
        state.undo = Some(UndoEntry::new(Article {
            id: ArticleId::Number(1),
            code: "A1".into(),
            description: "Bolt".into(),
            price: Some(1.0),
        }));
        let raised = state.notice.as_ref().unwrap().raised_at;

        state.expire_transients(raised + chrono::Duration::milliseconds(3500));
        assert!(state.notice.is_none());
        assert!(state.undo.is_some());

        state.expire_transients(raised + chrono::Duration::seconds(6));
        assert!(state.undo.is_none());
    }

    #[test]
    fn test_selected_file_name() {
        let mut import = ImportState::default();
        assert_eq!(import.selected_name(), None);
        import.selected_file = Some(PathBuf::from("/tmp/stock.xlsx"));
        assert_eq!(import.selected_name().as_deref(), Some("stock.xlsx"));
    }
}
