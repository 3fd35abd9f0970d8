//! Ячейка заголовка с переключением сортировки.
//!
//! Клик циклически меняет сортировку колонки:
//! по возрастанию → по убыванию → исходный порядок.

use crate::state::SortDir;
use leptos::prelude::*;

/// Индикатор сортировки для заголовка.
pub fn sort_indicator(sort: &Option<(String, SortDir)>, key: &str) -> &'static str {
    match sort {
        Some((current, SortDir::Ascending)) if current == key => " ▲",
        Some((current, SortDir::Descending)) if current == key => " ▼",
        _ => " ⇅",
    }
}

#[component]
pub fn SortableHeaderCell(
    /// Текст заголовка
    #[prop(into)]
    label: String,

    /// Ключ колонки
    #[prop(into)]
    sort_key: String,

    /// Текущая сортировка из состояния
    #[prop(into)]
    current_sort: Signal<Option<(String, SortDir)>>,

    /// Callback при клике на заголовок
    on_sort: Callback<String>,
) -> impl IntoView {
    let key_for_click = sort_key.clone();
    let key_for_indicator = sort_key.clone();

    view! {
        <th
            class="table__header-cell table__header-cell--sortable"
            on:click=move |_| on_sort.run(key_for_click.clone())
        >
            <div class="table__sortable-header" style="cursor: pointer;">
                {label}
                <span class=move || {
                    if matches!(&current_sort.get(), Some((current, _)) if current == &key_for_indicator) {
                        "table__sort-indicator table__sort-indicator--active"
                    } else {
                        "table__sort-indicator"
                    }
                }>
                    {move || sort_indicator(&current_sort.get(), &sort_key)}
                </span>
            </div>
        </th>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_indicator() {
        assert_eq!(sort_indicator(&None, "fecha"), " ⇅");
        assert_eq!(
            sort_indicator(&Some(("fecha".to_string(), SortDir::Ascending)), "fecha"),
            " ▲"
        );
        assert_eq!(
            sort_indicator(&Some(("fecha".to_string(), SortDir::Descending)), "fecha"),
            " ▼"
        );
        assert_eq!(
            sort_indicator(&Some(("fecha".to_string(), SortDir::Ascending)), "nombre"),
            " ⇅"
        );
    }
}
