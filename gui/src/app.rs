#![allow(non_snake_case)]
use std::time::Duration;

use client::{AppState, InventoryService};
use dioxus::prelude::*;

use crate::components::{
    article_form::ArticleForm, article_grid::ArticleGrid, confirm_dialog::ConfirmDialog,
    import_export::ImportExportCard, notices::NoticeBar, notices::UndoBar, toolbar::TitleBar,
};
use crate::config::theme::ThemePalette;
use crate::ui::Ui;

const TICK: Duration = Duration::from_millis(500);

const APP_CSS: &str = r#"
body { margin: 0; font-family: Roboto, Helvetica, Arial, sans-serif; }
.app { min-height: 100vh; background: var(--background); color: var(--foreground); }
.content { padding: 32px 10vw; display: grid; grid-template-columns: 1fr 1fr; gap: 24px; }
.card { background: var(--surface); border-radius: 16px; padding: 16px; box-shadow: 0 1px 3px rgba(0,0,0,.2); }
.card.wide { grid-column: 1 / -1; }
.field { display: flex; flex-direction: column; margin-bottom: 12px; }
.field input { padding: 8px; border-radius: 8px; border: 1px solid var(--secondary); }
.field.error input { border-color: var(--error); }
.helper { font-size: 12px; min-height: 16px; opacity: .8; }
.field.error .helper { color: var(--error); opacity: 1; }
button { border-radius: 8px; padding: 6px 14px; border: none; background: var(--primary); color: white; cursor: pointer; }
button.outlined { background: transparent; color: var(--primary); border: 1px solid var(--primary); }
button.danger { background: var(--error); }
button.success { background: var(--success); }
button:disabled { opacity: .5; cursor: default; }
table { width: 100%; border-collapse: collapse; }
th, td { padding: 8px; border-bottom: 1px solid var(--secondary); text-align: left; }
td.price, th.price { text-align: right; }
.notice { position: fixed; right: 24px; bottom: 24px; padding: 12px 16px; border-radius: 8px; color: white; }
.notice.success { background: var(--success); }
.notice.info { background: var(--primary); }
.notice.warning { background: #ed6c02; }
.notice.error { background: var(--error); }
.undo { position: fixed; left: 50%; transform: translateX(-50%); bottom: 24px; padding: 12px 16px; border-radius: 8px; background: #323232; color: white; }
.dialog-backdrop { position: fixed; inset: 0; background: rgba(0,0,0,.4); display: flex; align-items: center; justify-content: center; }
.dialog { background: var(--surface); border-radius: 16px; padding: 24px; min-width: 360px; }
.empty { text-align: center; padding: 48px 0; opacity: .7; }
.chip { border-radius: 12px; padding: 2px 10px; background: var(--secondary); font-size: 13px; margin-left: 8px; }
"#;

#[component]
pub fn App() -> Element {
    let service = use_context::<InventoryService>();
    let service = use_signal(move || service);
    let view = use_signal(AppState::default);
    let ui = use_context_provider(|| Ui::new(service, view));

    // initial load, then a steady tick that expires notices
    use_future(move || async move {
        ui.run(|s| async move {
            let _ = s.refresh().await;
        });
        loop {
            tokio::time::sleep(TICK).await;
            ui.tick().await;
        }
    });

    let palette = ThemePalette::for_mode(view.read().theme);
    let style_vars = palette.css_variables();

    rsx! {
        style { {APP_CSS} }
        div { class: "app", style: "{style_vars}",
            TitleBar {}
            div { class: "content",
                ArticleForm {}
                ImportExportCard {}
                ArticleGrid {}
            }
            NoticeBar {}
            UndoBar {}
            ConfirmDialog {}
        }
    }
}
