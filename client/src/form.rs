//! Article form: the editable draft, which fields the user has visited, and
//! the validation derived from both plus the cached article list.
//!
//! Validation is a pure function of `(draft, touched, articles)`. Nothing here
//! talks to the store; `FormState::submit` only decides whether a request may
//! be sent and what it contains.

use serde::{Deserialize, Serialize};
use shared::ars_format::parse_number;
use shared::models::{Article, ArticleId, ArticlePayload};
use uuid::Uuid;

use crate::error::ClientError;

pub const DUPLICATE_CODE_MESSAGE: &str = "An article with that code already exists";
pub const INVALID_PRICE_MESSAGE: &str =
    "Enter a valid price (>= 0). Use a comma or a dot for decimals";
pub const PRICE_HINT: &str = "Use a comma or a dot for decimals";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Code,
    Description,
    Price,
}

/// Unsaved staging of one article. `id == None` means create.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDraft {
    pub id: Option<ArticleId>,
    pub code: String,
    pub description: String,
    pub price: String,
}

impl FormDraft {
    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Code => &mut self.code,
            Field::Description => &mut self.description,
            Field::Price => &mut self.price,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouchedSet {
    pub code: bool,
    pub description: bool,
    pub price: bool,
}

impl TouchedSet {
    pub fn all() -> Self {
        Self {
            code: true,
            description: true,
            price: true,
        }
    }

    pub fn mark(&mut self, field: Field) {
        match field {
            Field::Code => self.code = true,
            Field::Description => self.description = true,
            Field::Price => self.price = true,
        }
    }
}

/// Everything the form renders that is derived rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormValidation {
    pub price_is_empty: bool,
    pub price_is_invalid: bool,
    pub price_has_error: bool,
    pub code_is_duplicate: bool,
    pub code_has_error: bool,
    pub can_submit: bool,
}

impl FormValidation {
    pub fn derive(draft: &FormDraft, touched: &TouchedSet, articles: &[Article]) -> Self {
        let price_text = draft.price.trim();
        let price_value = parse_number(price_text);
        let price_is_empty = price_text.is_empty();
        let price_is_invalid = price_value.map_or(true, |v| v < 0.0);

        let code = draft.code.trim();
        let code_is_duplicate = draft.id.is_none()
            && !code.is_empty()
            && articles.iter().any(|a| a.code.trim() == code);

        let can_submit = !code.is_empty()
            && !draft.description.trim().is_empty()
            && !code_is_duplicate
            && !price_is_empty
            && !price_is_invalid;

        Self {
            price_is_empty,
            price_is_invalid,
            price_has_error: touched.price && (price_is_empty || price_is_invalid),
            code_is_duplicate,
            code_has_error: touched.code && code_is_duplicate,
            can_submit,
        }
    }

    pub fn code_helper(&self) -> Option<&'static str> {
        self.code_has_error.then_some(DUPLICATE_CODE_MESSAGE)
    }

    pub fn price_helper(&self) -> &'static str {
        if self.price_has_error {
            INVALID_PRICE_MESSAGE
        } else {
            PRICE_HINT
        }
    }
}

/// What the store should be asked to do after a successful local submit.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitRequest {
    Create(ArticlePayload),
    Update { id: ArticleId, payload: ArticlePayload },
}

impl SubmitRequest {
    pub fn payload(&self) -> &ArticlePayload {
        match self {
            SubmitRequest::Create(payload) => payload,
            SubmitRequest::Update { payload, .. } => payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    pub draft: FormDraft,
    pub touched: TouchedSet,
    /// Rotated whenever the draft is reset or replaced; responses issued for an
    /// older generation must not touch the current draft.
    pub generation: Uuid,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            draft: FormDraft::default(),
            touched: TouchedSet::default(),
            generation: Uuid::new_v4(),
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validation(&self, articles: &[Article]) -> FormValidation {
        FormValidation::derive(&self.draft, &self.touched, articles)
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.draft.field_mut(field) = value.into();
    }

    pub fn touch(&mut self, field: Field) {
        self.touched.mark(field);
    }

    pub fn touch_all(&mut self) {
        self.touched = TouchedSet::all();
    }

    /// Loads an existing article for editing.
    pub fn begin_edit(&mut self, article: &Article) {
        self.draft = FormDraft {
            id: Some(article.id.clone()),
            code: article.code.clone(),
            description: article.description.clone(),
            price: article.price.map(|p| p.to_string()).unwrap_or_default(),
        };
        self.touched = TouchedSet::default();
        self.generation = Uuid::new_v4();
    }

    /// Back to an empty create draft; used for cancel and after a save.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Price to send: the parsed draft price or, when editing and the draft
    /// price is not a number, the article's stored price.
    pub fn resolve_final_price(&self, articles: &[Article]) -> Option<f64> {
        parse_number(self.draft.price.as_str()).or_else(|| {
            let id = self.draft.id.as_ref()?;
            articles
                .iter()
                .find(|a| &a.id == id)
                .and_then(|a| parse_number(&a.price))
        })
    }

    /// Validates the draft and builds the store request.
    ///
    /// On failure every field is marked touched so errors become visible.
    pub fn submit(&mut self, articles: &[Article]) -> Result<SubmitRequest, ClientError> {
        let validation = self.validation(articles);
        if !validation.can_submit {
            self.touch_all();
            return Err(ClientError::Validation(self.failure_reason(&validation)));
        }

        let price = self.resolve_final_price(articles).ok_or_else(|| {
            self.touch_all();
            ClientError::Validation("price is not a number".to_string())
        })?;

        let payload = ArticlePayload {
            code: self.draft.code.trim().to_string(),
            description: self.draft.description.trim().to_string(),
            price,
        };
        Ok(match &self.draft.id {
            Some(id) => SubmitRequest::Update { id: id.clone(), payload },
            None => SubmitRequest::Create(payload),
        })
    }

    fn failure_reason(&self, validation: &FormValidation) -> String {
        let mut reasons = Vec::new();
        if self.draft.code.trim().is_empty() {
            reasons.push("code is empty");
        }
        if self.draft.description.trim().is_empty() {
            reasons.push("description is empty");
        }
        if validation.code_is_duplicate {
            reasons.push("code already exists");
        }
        if validation.price_is_empty {
            reasons.push("price is empty");
        } else if validation.price_is_invalid {
            reasons.push("price is invalid");
        }
        reasons.join(", ")
    }
}
