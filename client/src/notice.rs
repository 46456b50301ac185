// Transient user-facing messages and the undo entry offered after a delete.
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use shared::models::Article;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
    pub raised_at: DateTime<Utc>,
}

impl Notice {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            raised_at: Utc::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.raised_at >= ttl
    }
}

/// Snapshot of a deleted row kept around so the delete can be reverted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UndoEntry {
    pub article: Article,
    pub deleted_at: DateTime<Utc>,
}

impl UndoEntry {
    pub fn new(article: Article) -> Self {
        Self {
            article,
            deleted_at: Utc::now(),
        }
    }

    pub fn message(&self) -> String {
        format!("Article \"{}\" deleted", self.article.description)
    }

    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.deleted_at >= ttl
    }
}

/// A delete the user asked for but has not confirmed yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingDelete {
    pub article: Article,
    pub in_flight: bool,
}

impl PendingDelete {
    pub fn prompt(&self) -> String {
        format!(
            "Delete article \"{}\" (code {})?",
            self.article.description, self.article.code
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ArticleId;

    #[test]
    fn test_notice_expiry() {
        let notice = Notice::success("Article created");
        let ttl = Duration::milliseconds(3000);
        assert!(!notice.is_expired(notice.raised_at, ttl));
        assert!(notice.is_expired(notice.raised_at + Duration::seconds(3), ttl));
    }

    #[test]
    fn test_undo_and_prompt_messages() {
        let article = Article {
            id: ArticleId::Number(1),
            code: "A1".into(),
            description: "Bolt".into(),
            price: Some(2.5),
        };
        let entry = UndoEntry::new(article.clone());
        assert_eq!(entry.message(), "Article \"Bolt\" deleted");
        let pending = PendingDelete { article, in_flight: false };
        assert_eq!(pending.prompt(), "Delete article \"Bolt\" (code A1)?");
    }
}
