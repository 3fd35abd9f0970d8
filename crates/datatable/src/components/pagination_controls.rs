//! Управление страницами: первая/предыдущая/следующая/последняя и размер страницы.

use crate::icons::icon;
use leptos::prelude::*;

#[component]
pub fn PaginationControls(
    /// Текущая страница (с нуля)
    #[prop(into)]
    current_page: Signal<usize>,

    /// Всего страниц
    #[prop(into)]
    total_pages: Signal<usize>,

    /// Всего строк после фильтров
    #[prop(into)]
    total_count: Signal<usize>,

    /// Текущий размер страницы
    #[prop(into)]
    page_size: Signal<usize>,

    /// Callback при смене страницы
    on_page_change: Callback<usize>,

    /// Callback при смене размера страницы
    on_page_size_change: Callback<usize>,

    /// Доступные размеры страницы (по умолчанию [10, 25, 50, 100])
    #[prop(optional)]
    page_size_options: Option<Vec<usize>>,
) -> impl IntoView {
    let page_size_opts = page_size_options.unwrap_or_else(|| vec![10, 25, 50, 100]);

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(0)
                disabled=move || current_page.get() == 0
                title="Первая страница"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 0 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=move || current_page.get() == 0
                title="Предыдущая страница"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || {
                    let page = current_page.get();
                    let total = total_pages.get().max(1);
                    let count = total_count.get();
                    format!("{} / {} ({})", page + 1, total, count)
                }}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    let total = total_pages.get();
                    if page + 1 < total {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=move || {
                    let page = current_page.get();
                    let total = total_pages.get();
                    page + 1 >= total
                }
                title="Следующая страница"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let total = total_pages.get();
                    if total > 0 {
                        on_page_change.run(total - 1);
                    }
                }
                disabled=move || {
                    let page = current_page.get();
                    let total = total_pages.get();
                    page + 1 >= total
                }
                title="Последняя страница"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    let val = event_target_value(&ev).parse().unwrap_or(10);
                    on_page_size_change.run(val);
                }
                prop:value=move || page_size.get().to_string()
            >
                {page_size_opts.iter().map(|&size| {
                    view! {
                        <option value={size.to_string()} selected=move || page_size.get() == size>
                            {size.to_string()}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}
