// Searchable, sortable, paginated article table
#![allow(non_snake_case)]
use client::grid::{SortColumn, SortDirection};
use dioxus::prelude::*;
use shared::ars_format::format_currency;

use crate::ui::Ui;

fn sort_marker(ui: &Ui, column: SortColumn) -> &'static str {
    match ui.view.read().grid.sort {
        Some(spec) if spec.column == column => match spec.direction {
            SortDirection::Ascending => " ▲",
            SortDirection::Descending => " ▼",
        },
        _ => "",
    }
}

#[component]
pub fn ArticleGrid() -> Element {
    let ui = use_context::<Ui>();
    let mut st = ui.view.read().clone();
    let page = st.page();
    let total = format_currency(&st.total());
    let count = st.articles.len();
    let search = st.grid.search.clone();
    let page_size = st.grid.page_size;
    let options = st.grid.page_size_options.clone();
    let loading = st.loading;

    let code_marker = sort_marker(&ui, SortColumn::Code);
    let description_marker = sort_marker(&ui, SortColumn::Description);
    let price_marker = sort_marker(&ui, SortColumn::Price);
    let shown_page = page.page + 1;
    let has_prev = page.page > 0;
    let has_next = page.page + 1 < page.page_count;
    let current = page.page;
    let page_count = page.page_count.max(1);
    let matching = page.matching;

    rsx! {
        div { class: "card wide",
            div { style: "display: flex; justify-content: space-between; align-items: center;",
                h3 {
                    "Articles ({count})"
                    span { class: "chip", "Total: {total}" }
                }
                input {
                    placeholder: "Search",
                    value: "{search}",
                    oninput: move |evt| {
                        let query = evt.value();
                        ui.run(move |s| async move { s.set_search(query).await });
                    },
                }
            }
            if loading {
                div { class: "empty", "Loading articles..." }
            } else if page.rows.is_empty() {
                div { class: "empty",
                    if count == 0 { "No articles yet" } else { "No articles match the search" }
                }
            } else {
                table {
                    thead {
                        tr {
                            th { style: "cursor: pointer;",
                                onclick: move |_| ui.run(|s| async move { s.toggle_sort(SortColumn::Code).await }),
                                "Code{code_marker}"
                            }
                            th { style: "cursor: pointer;",
                                onclick: move |_| ui.run(|s| async move { s.toggle_sort(SortColumn::Description).await }),
                                "Description{description_marker}"
                            }
                            th { class: "price", style: "cursor: pointer;",
                                onclick: move |_| ui.run(|s| async move { s.toggle_sort(SortColumn::Price).await }),
                                "Price{price_marker}"
                            }
                            th { "Actions" }
                        }
                    }
                    tbody {
                        for article in page.rows {
                            ArticleRow {
                                key: "{article.id}",
                                article: article.clone(),
                            }
                        }
                    }
                }
            }
            div { style: "display: flex; justify-content: flex-end; align-items: center; gap: 8px; margin-top: 8px;",
                span { "Rows per page" }
                select {
                    value: "{page_size}",
                    onchange: move |evt| {
                        if let Ok(size) = evt.value().parse::<usize>() {
                            ui.run(move |s| async move {
                                if let Err(e) = s.set_page_size(size).await {
                                    tracing::warn!(error = %e, "Page size not persisted");
                                }
                            });
                        }
                    },
                    for size in options {
                        option { value: "{size}", selected: size == page_size, "{size}" }
                    }
                }
                span { "{shown_page} of {page_count} ({matching} rows)" }
                button { class: "outlined",
                    disabled: !has_prev,
                    onclick: move |_| ui.run(move |s| async move { s.set_page(current.saturating_sub(1)).await }),
                    "Previous"
                }
                button { class: "outlined",
                    disabled: !has_next,
                    onclick: move |_| ui.run(move |s| async move { s.set_page(current + 1).await }),
                    "Next"
                }
            }
        }
    }
}

#[component]
fn ArticleRow(article: shared::models::Article) -> Element {
    let ui = use_context::<Ui>();
    let price = format_currency(&article.price);
    let edit_id = article.id.clone();
    let delete_id = article.id.clone();

    rsx! {
        tr {
            td { "{article.code}" }
            td { "{article.description}" }
            td { class: "price", "{price}" }
            td {
                button { class: "outlined",
                    onclick: move |_| {
                        let id = edit_id.clone();
                        ui.run(move |s| async move {
                            s.begin_edit(&id).await;
                        });
                    },
                    "Edit"
                }
                button { class: "danger", style: "margin-left: 4px;",
                    onclick: move |_| {
                        let id = delete_id.clone();
                        ui.run(move |s| async move {
                            s.request_delete(&id).await;
                        });
                    },
                    "Delete"
                }
            }
        }
    }
}
