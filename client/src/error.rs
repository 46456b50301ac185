use thiserror::Error;

use crate::notice::{Notice, Severity};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Another save is already in progress")]
    Busy,

    #[error("No delete is awaiting confirmation")]
    NoPendingDelete,

    #[error("Nothing to undo")]
    NoUndoEntry,

    #[error("No import file selected")]
    NoImportFile,

    #[error("HTTP error: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    #[error("Store answered {status} for {url}")]
    Status { status: reqwest::StatusCode, url: String },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Preference store error: {0}")]
    Preferences(String),
}

/// Coarse failure taxonomy shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Blocked locally, the store was never contacted.
    Validation,
    /// The store was unreachable or refused the request.
    Network,
    /// Local state or environment problem.
    Local,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Validation(_) => ErrorKind::Validation,
            ClientError::Http { .. } | ClientError::Status { .. } => ErrorKind::Network,
            ClientError::Busy
            | ClientError::NoPendingDelete
            | ClientError::NoUndoEntry
            | ClientError::NoImportFile
            | ClientError::Io { .. }
            | ClientError::Json { .. }
            | ClientError::Config(_)
            | ClientError::Preferences(_) => ErrorKind::Local,
        }
    }
}

impl From<&ClientError> for Notice {
    fn from(err: &ClientError) -> Self {
        tracing::warn!("Mapping ClientError to notice: {:?}", err);
        match err {
            ClientError::Validation(_) => Notice::new("Check the form fields", Severity::Warning),
            ClientError::Busy => Notice::new("A save is already in progress", Severity::Info),
            ClientError::NoPendingDelete | ClientError::NoUndoEntry => {
                Notice::new(err.to_string(), Severity::Info)
            }
            ClientError::NoImportFile => Notice::new("Choose an .xlsx file first", Severity::Warning),
            ClientError::Http { .. } | ClientError::Status { .. } => {
                Notice::new(format!("Store request failed: {}", err), Severity::Error)
            }
            ClientError::Io { source } => Notice::new(format!("File error: {}", source), Severity::Error),
            ClientError::Json { .. } => Notice::new("Unexpected response from the store", Severity::Error),
            ClientError::Config(msg) | ClientError::Preferences(msg) => {
                Notice::new(msg.clone(), Severity::Error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_not_a_network_failure() {
        let err = ClientError::Validation("code is empty".into());
        assert_eq!(err.kind(), ErrorKind::Validation);
        let notice = Notice::from(&err);
        assert_eq!(notice.severity, Severity::Warning);
    }

    #[test]
    fn test_status_maps_to_error_notice() {
        let err = ClientError::Status {
            status: reqwest::StatusCode::BAD_REQUEST,
            url: "http://localhost:8000/api/articles/".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Network);
        let notice = Notice::from(&err);
        assert_eq!(notice.severity, Severity::Error);
        assert!(notice.message.contains("400"));
    }
}
