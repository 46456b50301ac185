// Colors for the light and dark modes, exposed to the stylesheet as CSS variables
use client::preferences::ThemeMode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemePalette {
    pub background: String,
    pub surface: String,
    pub foreground: String,
    pub primary: String,
    pub secondary: String,
    pub success: String,
    pub error: String,
}

impl ThemePalette {
    pub fn default_dark() -> Self {
        Self {
            background: "#121212".to_string(),
            surface: "#1e1e1e".to_string(),
            foreground: "#e0e0e0".to_string(),
            primary: "#90caf9".to_string(),
            secondary: "#424242".to_string(),
            success: "#388e3c".to_string(),
            error: "#e57373".to_string(),
        }
    }

    pub fn default_light() -> Self {
        Self {
            background: "#f5f5f5".to_string(),
            surface: "#ffffff".to_string(),
            foreground: "#212121".to_string(),
            primary: "#1976d2".to_string(),
            secondary: "#e0e0e0".to_string(),
            success: "#2e7d32".to_string(),
            error: "#d32f2f".to_string(),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::default_light(),
            ThemeMode::Dark => Self::default_dark(),
        }
    }

    /// Inline `style` value declaring every color as a custom property.
    pub fn css_variables(&self) -> String {
        [
            ("background", &self.background),
            ("surface", &self.surface),
            ("foreground", &self.foreground),
            ("primary", &self.primary),
            ("secondary", &self.secondary),
            ("success", &self.success),
            ("error", &self.error),
        ]
        .iter()
        .map(|(name, value)| format!("--{name}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
    }
}
