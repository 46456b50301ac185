// Client library for the article inventory: form validation, listing view
// state, preferences, the article store client and the service that ties them
// to the UI.

pub mod config;
pub mod error;
pub mod form;
pub mod grid;
pub mod notice;
pub mod preferences;
pub mod services;
pub mod state;

pub use error::{ClientError, ErrorKind};
pub use services::{ArticleStore, InventoryService};
pub use state::AppState;
