// Handlers for spreadsheet import and export
use std::path::Path;
use std::sync::Arc;

use shared::models::ImportReport;
use tokio::sync::RwLock;

use super::helpers::{reload_articles, report_failure};
use crate::error::ClientError;
use crate::notice::{Notice, Severity};
use crate::services::ArticleStore;
use crate::state::AppState;

pub async fn handle_import(
    store: &dyn ArticleStore,
    state: &Arc<RwLock<AppState>>,
) -> Result<ImportReport, ClientError> {
    let path = {
        let mut st = state.write().await;
        if st.import.importing {
            return Err(ClientError::Busy);
        }
        let Some(path) = st.import.selected_file.clone() else {
            let err = ClientError::NoImportFile;
            report_failure(&mut st, "Choose an .xlsx file first", &err);
            return Err(err);
        };
        st.import.importing = true;
        st.import.row_errors.clear();
        path
    };

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "articles.xlsx".to_string());

    let result = match tokio::fs::read(&path).await {
        Ok(bytes) => store.import_spreadsheet(&file_name, bytes).await,
        Err(e) => Err(ClientError::from(e)),
    };

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            let mut st = state.write().await;
            st.import.importing = false;
            report_failure(&mut st, "Spreadsheet import failed", &e);
            return Err(e);
        }
    };

    if report.is_partial() {
        tracing::warn!(rows = report.errors.len(), "Import finished with row errors");
    }
    let reloaded = reload_articles(store, state).await;

    let mut st = state.write().await;
    st.import.importing = false;
    st.import.row_errors = report.errors.clone();
    if reloaded.is_ok() {
        st.raise(Notice::success(report.summary()));
    }
    Ok(report)
}

/// Downloads the exported workbook into `target`.
pub async fn handle_export(
    store: &dyn ArticleStore,
    state: &Arc<RwLock<AppState>>,
    target: &Path,
) -> Result<(), ClientError> {
    let written = match store.export_spreadsheet().await {
        Ok(bytes) => tokio::fs::write(target, &bytes).await.map(|_| bytes.len()).map_err(ClientError::from),
        Err(e) => Err(e),
    };

    let mut st = state.write().await;
    match written {
        Ok(size) => {
            tracing::info!(path = %target.display(), bytes = size, "Spreadsheet exported");
            st.raise(Notice::new(format!("Exported to {}", target.display()), Severity::Success));
            Ok(())
        }
        Err(e) => {
            report_failure(&mut st, "Spreadsheet export failed", &e);
            Err(e)
        }
    }
}
