// GUI configuration module
pub mod theme;

pub use theme::ThemePalette;

/// Main window geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Article Management".to_string(),
            width: 1280.0,
            height: 800.0,
        }
    }
}
