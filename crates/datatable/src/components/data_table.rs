//! Универсальный просмотрщик коллекций.
//!
//! Получает однородный набор записей и описатели колонок/фильтров/действий,
//! рисует таблицу (или сетку карточек) с поиском, расширенными фильтрами,
//! сортировкой и страницами. Набор данных принадлежит вызывающему и
//! только читается; все мутации (добавить/изменить/удалить) делегируются
//! обратно через callbacks — вызывающий перезагружает данные сам.
//!
//! Каноническая поверхность действий — список `actions`. Удобные callbacks
//! `on_view`/`on_edit`/`on_delete` материализуются в стандартную тройку
//! кнопок только когда `actions` не передан; при переданном `actions`
//! они игнорируются. `on_delete` проходит через `ConfirmService`, если
//! тот есть в контексте.

use crate::components::confirm::ConfirmService;
use crate::components::filter_panel::FilterPanel;
use crate::components::pagination_controls::PaginationControls;
use crate::components::search_input::SearchInput;
use crate::components::sortable_header_cell::SortableHeaderCell;
use crate::components::view_toggle::ViewToggle;
use crate::descriptors::{Action, CardRender, Column, Filter, ViewMode};
use crate::icons::icon;
use crate::query::{run_query, QueryResult};
use crate::record::{display_value, resolve_path, Record};
use crate::state::{FilterValue, ViewState};
use leptos::prelude::*;

#[component]
pub fn DataTable(
    /// Набор данных; порядок — исходный порядок строк без сортировки
    #[prop(into)]
    data: Signal<Vec<Record>>,

    /// Описатели колонок; порядок задаёт порядок слева направо
    columns: Vec<Column>,

    /// Описатели расширенных фильтров
    #[prop(optional)]
    filters: Option<Vec<Filter>>,

    /// Действия в строке; каноническая поверхность callbacks
    #[prop(optional)]
    actions: Option<Vec<Action>>,

    /// Заголовок списка
    #[prop(optional, into)]
    title: String,

    /// Placeholder поля поиска
    #[prop(optional, into)]
    search_placeholder: String,

    /// Размер страницы по умолчанию
    #[prop(optional, default = 10)]
    items_per_page: usize,

    /// Показывать ли панель расширенных фильтров
    #[prop(optional)]
    enable_advanced_filters: bool,

    /// Отрисовка карточки; включает переключатель таблица/карточки
    #[prop(optional)]
    card_render: Option<CardRender>,

    /// Кнопка создания записи в шапке
    #[prop(optional)]
    on_add: Option<Callback<()>>,

    /// Удобный callback просмотра (см. описание компонента)
    #[prop(optional)]
    on_view: Option<Callback<Record>>,

    /// Удобный callback редактирования
    #[prop(optional)]
    on_edit: Option<Callback<Record>>,

    /// Удобный callback удаления; проходит через `ConfirmService`
    #[prop(optional)]
    on_delete: Option<Callback<Record>>,
) -> impl IntoView {
    let state = RwSignal::new(ViewState::new(items_per_page));
    let view_mode = RwSignal::new(ViewMode::Table);
    let is_filter_expanded = RwSignal::new(false);

    let filters = filters.unwrap_or_default();
    let has_filter_panel = enable_advanced_filters && !filters.is_empty();

    // ConfirmService берётся при монтировании, не внутри callback
    let confirm = use_context::<ConfirmService>();
    let actions = actions.unwrap_or_else(|| derive_actions(on_view, on_edit, on_delete, confirm));

    let columns_for_query = columns.clone();
    let filters_for_query = filters.clone();
    let result = Memo::new(move |_| {
        run_query(
            &data.get(),
            &columns_for_query,
            &filters_for_query,
            &state.get(),
        )
    });

    let search_value = Signal::derive(move || state.get().search.clone());
    let current_sort = Signal::derive(move || state.get().sort.clone());
    let current_page = Signal::derive(move || result.get().page);
    let total_pages = Signal::derive(move || result.get().total_pages);
    let total_count = Signal::derive(move || result.get().total);
    let page_size = Signal::derive(move || state.get().page_size);

    let on_search = Callback::new(move |term: String| state.update(|s| s.set_search(term)));
    let on_sort = Callback::new(move |key: String| state.update(|s| s.toggle_sort(&key)));
    let on_page_change = Callback::new(move |page: usize| state.update(|s| s.set_page(page)));
    let on_page_size_change =
        Callback::new(move |size: usize| state.update(|s| s.set_page_size(size)));
    let on_filter_change = Callback::new(move |(key, value): (String, Option<FilterValue>)| {
        state.update(|s| s.set_filter(&key, value))
    });
    let on_filter_clear = Callback::new(move |_: ()| state.update(|s| s.clear_filters()));

    let columns_for_body = columns.clone();
    let actions_for_body = actions.clone();
    let card_render_for_body = card_render.clone();

    // Вся видимая часть перерисовывается целиком: пустой набор данных и
    // пустой результат фильтра — разные состояния, а не таблица без строк.
    let content = move || -> AnyView {
        if data.get().is_empty() {
            return view! {
                <div class="empty-state">
                    <span class="empty-state__icon">{icon("inbox")}</span>
                    <p class="empty-state__text">"Нет данных"</p>
                </div>
            }
            .into_any();
        }

        let result: QueryResult = result.get();
        if result.total == 0 {
            return view! {
                <div class="empty-state">
                    <span class="empty-state__icon">{icon("search")}</span>
                    <p class="empty-state__text">"Ничего не найдено по текущему фильтру"</p>
                </div>
            }
            .into_any();
        }

        if view_mode.get() == ViewMode::Cards {
            if let Some(render) = &card_render_for_body {
                let cards = result
                    .rows
                    .iter()
                    .map(|row| {
                        view! { <div class="card-grid__item">{render(row)}</div> }
                    })
                    .collect_view();
                return view! { <div class="card-grid">{cards}</div> }.into_any();
            }
        }

        render_table(
            &columns_for_body,
            &actions_for_body,
            result,
            current_sort,
            on_sort,
        )
    };

    view! {
        <div class="data-table">
            {(!title.is_empty() || on_add.is_some()).then(|| view! {
                <div class="header">
                    <div class="header__content">
                        <h1 class="header__title">{title.clone()}</h1>
                    </div>
                    <div class="header__actions">
                        {on_add.map(|on_add| view! {
                            <button
                                class="button button--primary"
                                on:click=move |_| on_add.run(())
                            >
                                {icon("plus")}
                                "Добавить"
                            </button>
                        })}
                    </div>
                </div>
            })}

            <div class="data-table__toolbar">
                <SearchInput
                    value=search_value
                    on_change=on_search
                    placeholder=search_placeholder
                />
                {card_render.is_some().then(|| view! {
                    <ViewToggle
                        mode=view_mode
                        on_change=Callback::new(move |mode| view_mode.set(mode))
                    />
                })}
            </div>

            {if has_filter_panel {
                view! {
                    <FilterPanel
                        is_expanded=is_filter_expanded
                        filters=filters.clone()
                        data=data
                        state=state
                        on_change=on_filter_change
                        on_clear=on_filter_clear
                    >
                        <PaginationControls
                            current_page=current_page
                            total_pages=total_pages
                            total_count=total_count
                            page_size=page_size
                            on_page_change=on_page_change
                            on_page_size_change=on_page_size_change
                        />
                    </FilterPanel>
                }
                .into_any()
            } else {
                view! {
                    <div class="data-table__pagination">
                        <PaginationControls
                            current_page=current_page
                            total_pages=total_pages
                            total_count=total_count
                            page_size=page_size
                            on_page_change=on_page_change
                            on_page_size_change=on_page_size_change
                        />
                    </div>
                }
                .into_any()
            }}

            {content}
        </div>
    }
}

/// Материализация удобных callbacks в стандартную тройку действий.
fn derive_actions(
    on_view: Option<Callback<Record>>,
    on_edit: Option<Callback<Record>>,
    on_delete: Option<Callback<Record>>,
    confirm: Option<ConfirmService>,
) -> Vec<Action> {
    let mut actions = Vec::new();
    if let Some(on_view) = on_view {
        actions.push(Action::new("Просмотр", "eye", on_view));
    }
    if let Some(on_edit) = on_edit {
        actions.push(Action::new("Изменить", "edit", on_edit));
    }
    if let Some(on_delete) = on_delete {
        let with_confirm = match confirm {
            Some(confirm) => Callback::new(move |record: Record| {
                confirm.request(
                    "Удалить запись?",
                    Callback::new(move |confirmed: bool| {
                        if confirmed {
                            on_delete.run(record.clone());
                        }
                    }),
                );
            }),
            None => on_delete,
        };
        actions.push(Action::new("Удалить", "delete", with_confirm).class("button--danger"));
    }
    actions
}

/// Табличный режим: thead из описателей колонок, tbody из текущей страницы.
fn render_table(
    columns: &[Column],
    actions: &[Action],
    result: QueryResult,
    current_sort: Signal<Option<(String, crate::state::SortDir)>>,
    on_sort: Callback<String>,
) -> AnyView {
    let header_cells = columns
        .iter()
        .map(|column| {
            if column.sortable {
                view! {
                    <SortableHeaderCell
                        label=column.label.clone()
                        sort_key=column.key.clone()
                        current_sort=current_sort
                        on_sort=on_sort
                    />
                }
                .into_any()
            } else {
                view! { <th class="table__header-cell">{column.label.clone()}</th> }.into_any()
            }
        })
        .collect_view();

    let has_actions = actions.iter().any(|a| !a.hidden);

    let rows = result
        .rows
        .into_iter()
        .map(|row| {
            let cells = columns
                .iter()
                .map(|column| {
                    let value = resolve_path(&row, column.value_key());
                    match &column.render {
                        Some(render) => {
                            view! { <td class="table__cell">{render(value, &row)}</td> }
                                .into_any()
                        }
                        None => {
                            view! { <td class="table__cell">{display_value(value)}</td> }
                                .into_any()
                        }
                    }
                })
                .collect_view();

            let action_buttons = actions
                .iter()
                .filter(|action| !action.hidden)
                .map(|action| {
                    let on_click = action.on_click;
                    let row_for_click = row.clone();
                    view! {
                        <button
                            class=format!("button button--icon {}", action.class)
                            title=action.label.clone()
                            on:click=move |ev| {
                                ev.stop_propagation();
                                on_click.run(row_for_click.clone());
                            }
                        >
                            {icon(action.icon)}
                        </button>
                    }
                })
                .collect_view();

            view! {
                <tr class="table__row">
                    {cells}
                    {has_actions.then(|| view! {
                        <td class="table__cell table__cell--actions">{action_buttons}</td>
                    })}
                </tr>
            }
        })
        .collect_view();

    view! {
        <div class="table">
            <table class="table__data table--striped">
                <thead class="table__head">
                    <tr>
                        {header_cells}
                        {has_actions.then(|| view! {
                            <th class="table__header-cell table__header-cell--actions"></th>
                        })}
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </div>
    }
    .into_any()
}
