// Spreadsheet import and export card
#![allow(non_snake_case)]
use std::path::PathBuf;

use dioxus::prelude::*;

use crate::ui::Ui;

const EXPORT_FILE_NAME: &str = "articles.xlsx";

fn export_target() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join(EXPORT_FILE_NAME)
}

#[component]
pub fn ImportExportCard() -> Element {
    let ui = use_context::<Ui>();
    let st = ui.view.read();
    let selected = st.import.selected_name();
    let importing = st.import.importing;
    let row_errors = st.import.row_errors.clone();
    drop(st);

    let file_label = selected.clone().unwrap_or_else(|| "No file selected".to_string());
    let import_label = if importing { "Importing..." } else { "Import" };

    rsx! {
        div { class: "card",
            h3 { "Import / Export" }
            div { style: "display: flex; gap: 8px; align-items: center; flex-wrap: wrap;",
                input {
                    r#type: "file",
                    accept: ".xlsx",
                    onchange: move |evt| {
                        let path = evt
                            .files()
                            .and_then(|engine| engine.files().into_iter().next())
                            .map(PathBuf::from);
                        ui.run(move |s| async move { s.select_import_file(path).await });
                    },
                }
                span { "{file_label}" }
            }
            div { style: "display: flex; gap: 8px; margin-top: 12px;",
                button { class: "success",
                    disabled: selected.is_none() || importing,
                    onclick: move |_| ui.run(|s| async move {
                        let _ = s.import_selected().await;
                    }),
                    "{import_label}"
                }
                button { class: "outlined",
                    onclick: move |_| ui.run(|s| async move {
                        let target = export_target();
                        let _ = s.export_to(&target).await;
                    }),
                    "Export"
                }
            }
            if !row_errors.is_empty() {
                ul { style: "color: var(--error); margin-top: 12px;",
                    for row_error in row_errors {
                        li { "Row {row_error.row}: {row_error.error}" }
                    }
                }
            }
        }
    }
}
