// Transient notice and the delete undo offer
#![allow(non_snake_case)]
use client::notice::Severity;
use dioxus::prelude::*;

use crate::ui::Ui;

fn severity_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "notice success",
        Severity::Info => "notice info",
        Severity::Warning => "notice warning",
        Severity::Error => "notice error",
    }
}

#[component]
pub fn NoticeBar() -> Element {
    let ui = use_context::<Ui>();
    let notice = ui.view.read().notice.clone();

    rsx! {
        if let Some(notice) = notice {
            div { class: severity_class(notice.severity),
                span { "{notice.message}" }
                button { class: "outlined",
                    style: "margin-left: 12px; color: white; border-color: white;",
                    onclick: move |_| ui.run(|s| async move { s.dismiss_notice().await }),
                    "Close"
                }
            }
        }
    }
}

#[component]
pub fn UndoBar() -> Element {
    let ui = use_context::<Ui>();
    let message = ui.view.read().undo.as_ref().map(|entry| entry.message());

    rsx! {
        if let Some(message) = message {
            div { class: "undo",
                span { "{message}" }
                button { class: "outlined",
                    style: "margin-left: 12px;",
                    onclick: move |_| ui.run(|s| async move {
                        let _ = s.undo_delete().await;
                    }),
                    "Undo"
                }
                button { class: "outlined",
                    style: "margin-left: 4px;",
                    onclick: move |_| ui.run(|s| async move { s.dismiss_undo().await }),
                    "Dismiss"
                }
            }
        }
    }
}
