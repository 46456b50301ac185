// Title bar with the theme toggle
#![allow(non_snake_case)]
use client::preferences::ThemeMode;
use dioxus::prelude::*;

use crate::ui::Ui;

#[component]
pub fn TitleBar() -> Element {
    let ui = use_context::<Ui>();
    let theme = ui.view.read().theme;
    let label = match theme {
        ThemeMode::Light => "Dark mode",
        ThemeMode::Dark => "Light mode",
    };

    rsx! {
        div { class: "toolbar",
            style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 10vw; background: var(--primary); color: white;",
            h2 { style: "margin: 0;", "Article Management" }
            button { class: "outlined",
                style: "color: white; border-color: white;",
                onclick: move |_| ui.run(|s| async move {
                    if let Err(e) = s.toggle_theme().await {
                        tracing::warn!(error = %e, "Theme change not persisted");
                    }
                }),
                "{label}"
            }
        }
    }
}
