// Delete confirmation dialog
#![allow(non_snake_case)]
use dioxus::prelude::*;

use crate::ui::Ui;

#[component]
pub fn ConfirmDialog() -> Element {
    let ui = use_context::<Ui>();
    let pending = ui.view.read().pending_delete.clone();
    let Some(pending) = pending else {
        return rsx! {};
    };
    let prompt = pending.prompt();
    let confirm_label = if pending.in_flight { "Deleting..." } else { "Delete" };

    rsx! {
        div { class: "dialog-backdrop",
            div { class: "dialog",
                h3 { "Delete article" }
                p { "{prompt}" }
                div { style: "display: flex; gap: 8px; justify-content: flex-end;",
                    button { class: "outlined",
                        disabled: pending.in_flight,
                        onclick: move |_| ui.run(|s| async move {
                            s.cancel_delete().await;
                        }),
                        "Cancel"
                    }
                    button { class: "danger",
                        disabled: pending.in_flight,
                        onclick: move |_| ui.run(|s| async move {
                            let _ = s.confirm_delete().await;
                        }),
                        "{confirm_label}"
                    }
                }
            }
        }
    }
}
