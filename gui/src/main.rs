// GUI main entry point using Dioxus
#![allow(non_snake_case)] // Common for Dioxus components

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use client::config::ClientSettings;
use client::preferences::FilePreferenceStore;
use client::services::HttpArticleStore;
use client::InventoryService;
use dioxus::prelude::*;
use dioxus_desktop::{Config as DesktopConfig, LogicalSize, WindowBuilder};

mod app;
mod components;
mod config;
mod ui;

use app::App;

/// Optional settings file; the embedded defaults are used otherwise.
const SETTINGS_ENV: &str = "ARTICLES_SETTINGS";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    tracing::info!("Starting Articles Manager (Dioxus Desktop)...");

    let settings_path = std::env::var_os(SETTINGS_ENV).map(PathBuf::from);
    let settings = ClientSettings::load(settings_path.as_deref()).context("Failed to load client settings")?;
    tracing::info!(api_url = %settings.api_url, "Using article store");

    let store = HttpArticleStore::new(&settings).context("Failed to build HTTP client")?;
    let prefs = FilePreferenceStore::open_default(&settings.preferences_file);
    tracing::debug!(path = %prefs.path().display(), "Preference file");

    let service = InventoryService::new(Arc::new(store), Arc::new(prefs), &settings);

    let window = config::WindowConfig::default();
    let desktop_config = DesktopConfig::default().with_window(
        WindowBuilder::new()
            .with_title(window.title)
            .with_inner_size(LogicalSize::new(window.width, window.height)),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_config)
        .with_context(service)
        .launch(App);

    tracing::info!("Articles Manager finished.");
    Ok(())
}
