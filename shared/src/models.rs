use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::ars_format::parse_number;

/// Store-assigned identifier. The backend hands out integers, but listings
/// without an id fall back to the article code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArticleId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArticleId::Number(n) => write!(f, "{}", n),
            ArticleId::Text(s) => f.write_str(s),
        }
    }
}

/// Cached copy of one inventory line as returned by the store.
///
/// `price` is `None` when the store sent something that is not a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawArticle")]
pub struct Article {
    pub id: ArticleId,
    pub code: String,
    pub description: String,
    pub price: Option<f64>,
}

impl Article {
    pub fn payload(&self) -> ArticlePayload {
        ArticlePayload {
            code: self.code.clone(),
            description: self.description.clone(),
            price: self.price.unwrap_or(0.0),
        }
    }
}

// Listing rows are decoded leniently: decimals may arrive as strings, codes as
// numbers, and any field may be missing.
#[derive(Deserialize)]
struct RawArticle {
    #[serde(default)]
    id: Option<ArticleId>,
    #[serde(default)]
    code: Value,
    #[serde(default)]
    description: Value,
    #[serde(default)]
    price: Value,
}

fn text_of(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

impl From<RawArticle> for Article {
    fn from(raw: RawArticle) -> Self {
        let code = text_of(raw.code);
        let id = raw.id.unwrap_or_else(|| ArticleId::Text(code.clone()));
        Article {
            id,
            code,
            description: text_of(raw.description),
            price: parse_number(&raw.price),
        }
    }
}

/// Normalized body for create and update calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticlePayload {
    pub code: String,
    pub description: String,
    pub price: f64,
}

/// The list endpoint answers either with a bare array or a paginated envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ArticleListing {
    Paginated { results: Vec<Article> },
    Plain(Vec<Article>),
}

impl ArticleListing {
    pub fn into_articles(self) -> Vec<Article> {
        match self {
            ArticleListing::Paginated { results } => results,
            ArticleListing::Plain(articles) => articles,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowError {
    #[serde(default)]
    pub row: u32,
    #[serde(default)]
    pub error: String,
}

/// Outcome of a spreadsheet import. Rows listed in `errors` were skipped;
/// every other row stays imported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    #[serde(default)]
    pub created: u32,
    #[serde(default)]
    pub updated: u32,
    #[serde(default)]
    pub errors: Vec<RowError>,
}

impl ImportReport {
    pub fn is_partial(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn summary(&self) -> String {
        format!("Import: {} created, {} updated", self.created, self.updated)
    }
}
