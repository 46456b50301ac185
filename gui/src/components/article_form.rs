// Create / edit form for a single article
#![allow(non_snake_case)]
use client::form::Field;
use dioxus::prelude::*;

use crate::ui::Ui;

#[component]
pub fn ArticleForm() -> Element {
    let ui = use_context::<Ui>();
    let st = ui.view.read();
    let draft = st.form.draft.clone();
    let validation = st.validation();
    let submitting = st.submitting;
    drop(st);

    let editing = draft.is_edit();
    let title = if editing { "Edit article" } else { "New article" };
    let submit_label = match (submitting, editing) {
        (true, _) => "Saving...",
        (false, true) => "Update",
        (false, false) => "Create",
    };
    let code_class = if validation.code_has_error { "field error" } else { "field" };
    let price_class = if validation.price_has_error { "field error" } else { "field" };
    let code_helper = validation.code_helper().unwrap_or("");
    let price_helper = validation.price_helper();

    rsx! {
        div { class: "card",
            h3 { "{title}" }
            div { class: "{code_class}",
                label { "Code" }
                input {
                    value: "{draft.code}",
                    oninput: move |evt| field_input(ui, Field::Code, evt.value()),
                    onblur: move |_| field_blur(ui, Field::Code),
                }
                span { class: "helper", "{code_helper}" }
            }
            div { class: "field",
                label { "Description" }
                input {
                    value: "{draft.description}",
                    oninput: move |evt| field_input(ui, Field::Description, evt.value()),
                    onblur: move |_| field_blur(ui, Field::Description),
                }
                span { class: "helper" }
            }
            div { class: "{price_class}",
                label { "Price" }
                input {
                    value: "{draft.price}",
                    inputmode: "decimal",
                    oninput: move |evt| field_input(ui, Field::Price, evt.value()),
                    onblur: move |_| field_blur(ui, Field::Price),
                }
                span { class: "helper", "{price_helper}" }
            }
            div { style: "display: flex; gap: 8px; justify-content: flex-end;",
                if editing {
                    button { class: "outlined",
                        onclick: move |_| ui.run(|s| async move { s.cancel_edit().await }),
                        "Cancel"
                    }
                }
                button {
                    disabled: !validation.can_submit || submitting,
                    onclick: move |_| ui.run(|s| async move {
                        let _ = s.submit().await;
                    }),
                    "{submit_label}"
                }
            }
        }
    }
}

fn field_input(ui: Ui, field: Field, value: String) {
    ui.run(move |s| async move { s.set_field(field, value).await });
}

fn field_blur(ui: Ui, field: Field) {
    ui.run(move |s| async move { s.touch(field).await });
}
