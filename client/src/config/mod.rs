// Client configuration module
pub mod settings;

pub use settings::ClientSettings;
