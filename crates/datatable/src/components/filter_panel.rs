//! Сворачиваемая панель расширенных фильтров.
//!
//! Контролы генерируются из описателей `Filter`: select собирает различные
//! значения поля по всему набору, диапазон дат — пара полей "с"/"по",
//! текстовый фильтр — подстрока по одному полю. Активные фильтры
//! показываются чипами с кнопкой снятия.

use crate::descriptors::{Filter, FilterKind};
use crate::icons::icon;
use crate::query::select_options;
use crate::record::Record;
use crate::state::{FilterValue, ViewState};
use chrono::NaiveDate;
use leptos::prelude::*;

#[component]
pub fn FilterPanel(
    /// Развернута ли панель
    #[prop(into)]
    is_expanded: RwSignal<bool>,

    /// Описатели фильтров
    filters: Vec<Filter>,

    /// Полный (до фильтров) набор данных — для вариантов select
    #[prop(into)]
    data: Signal<Vec<Record>>,

    /// Текущее состояние отображения
    #[prop(into)]
    state: Signal<ViewState>,

    /// Callback установки/снятия фильтра: (ключ, значение или None)
    on_change: Callback<(String, Option<FilterValue>)>,

    /// Callback сброса всех фильтров
    on_clear: Callback<()>,

    /// Слот в шапке панели (управление страницами)
    children: ChildrenFn,
) -> impl IntoView {
    let toggle_expanded = move |_| {
        is_expanded.update(|e| *e = !*e);
    };

    let active_count = Signal::derive(move || state.get().active_filter_count());

    let controls = filters
        .iter()
        .map(|filter| filter_control(filter.clone(), data, state, on_change))
        .collect_view();

    let tag_filters = filters.clone();
    let tags = move || {
        let current = state.get();
        tag_filters
            .iter()
            .filter_map(|filter| {
                let value = current.filters.get(&filter.key)?;
                let label = format!("{}: {}", filter.label, tag_text(value));
                let key = filter.key.clone();
                Some(view! {
                    <FilterTag
                        label=label
                        on_remove=Callback::new(move |_| on_change.run((key.clone(), None)))
                    />
                })
            })
            .collect_view()
    };

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div
                    class="filter-panel-header__left"
                    on:click=toggle_expanded
                >
                    <svg
                        width="16"
                        height="16"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="currentColor"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                        class=move || {
                            if is_expanded.get() {
                                "filter-panel__chevron filter-panel__chevron--expanded"
                            } else {
                                "filter-panel__chevron"
                            }
                        }
                    >
                        <polyline points="6 9 12 15 18 9"></polyline>
                    </svg>
                    {icon("filter")}
                    <span class="filter-panel__title">"Фильтры"</span>
                    {move || {
                        let count = active_count.get();
                        if count > 0 {
                            view! {
                                <span class="badge badge--primary">{count}</span>
                            }.into_any()
                        } else {
                            view! { <></> }.into_any()
                        }
                    }}
                </div>
                <div class="filter-panel-header__center">
                    {children()}
                </div>
            </div>

            <div class=move || {
                if is_expanded.get() {
                    "filter-panel__collapsible filter-panel__collapsible--expanded"
                } else {
                    "filter-panel__collapsible filter-panel__collapsible--collapsed"
                }
            }>
                <div class="filter-panel-content">
                    <div class="filter-panel__controls">
                        {controls}
                        {move || {
                            if active_count.get() > 0 {
                                view! {
                                    <button
                                        class="button button--secondary filter-panel__clear"
                                        on:click=move |_| on_clear.run(())
                                    >
                                        {icon("x")}
                                        "Сбросить"
                                    </button>
                                }.into_any()
                            } else {
                                view! { <></> }.into_any()
                            }
                        }}
                    </div>
                    <div class="filter-panel__tags">{tags}</div>
                </div>
            </div>
        </div>
    }
}

/// Чип активного фильтра.
#[component]
pub fn FilterTag(
    /// Текст чипа
    #[prop(into)]
    label: String,

    /// Callback при снятии
    on_remove: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="filter-tag">
            <span>{label}</span>
            <svg
                width="12"
                height="12"
                viewBox="0 0 24 24"
                fill="none"
                stroke="currentColor"
                stroke-width="2"
                stroke-linecap="round"
                stroke-linejoin="round"
                class="filter-tag__remove"
                on:click=move |e| {
                    e.stop_propagation();
                    on_remove.run(());
                }
            >
                <line x1="18" y1="6" x2="6" y2="18"></line>
                <line x1="6" y1="6" x2="18" y2="18"></line>
            </svg>
        </div>
    }
}

/// Отображаемое значение фильтра для чипа.
fn tag_text(value: &FilterValue) -> String {
    match value {
        FilterValue::Select(option) => option.clone(),
        FilterValue::Text(term) => term.clone(),
        FilterValue::DateRange { from, to } => {
            let fmt = |d: &Option<NaiveDate>| {
                d.map(|d| d.format("%d.%m.%Y").to_string())
                    .unwrap_or_else(|| "…".to_string())
            };
            format!("{} — {}", fmt(from), fmt(to))
        }
    }
}

/// Контрол одного фильтра по его описателю.
fn filter_control(
    filter: Filter,
    data: Signal<Vec<Record>>,
    state: Signal<ViewState>,
    on_change: Callback<(String, Option<FilterValue>)>,
) -> AnyView {
    let key = filter.key.clone();
    let label = filter.label.clone();

    match filter.kind {
        FilterKind::Select => {
            let options_filter = filter.clone();
            let options = Signal::derive(move || select_options(&data.get(), &options_filter));
            let value_key = key.clone();
            let current = Signal::derive(move || {
                match state.get().filters.get(&value_key) {
                    Some(FilterValue::Select(option)) => option.clone(),
                    _ => String::new(),
                }
            });
            let change_key = key.clone();
            view! {
                <div class="form__group">
                    <label class="form__label">{label}</label>
                    <select
                        class="form__select"
                        on:change=move |ev| {
                            let val = event_target_value(&ev);
                            let value = if val.is_empty() {
                                None
                            } else {
                                Some(FilterValue::Select(val))
                            };
                            on_change.run((change_key.clone(), value));
                        }
                        prop:value=move || current.get()
                    >
                        <option value="">"Все"</option>
                        <For
                            each=move || options.get()
                            key=|option| option.clone()
                            children=move |option| {
                                let option_value = option.clone();
                                let is_selected = move || current.get() == option_value;
                                view! {
                                    <option value=option.clone() selected=is_selected>
                                        {option.clone()}
                                    </option>
                                }
                            }
                        />
                    </select>
                </div>
            }
            .into_any()
        }
        FilterKind::DateRange => {
            let range_key = key.clone();
            let current_range = Signal::derive(move || {
                match state.get().filters.get(&range_key) {
                    Some(FilterValue::DateRange { from, to }) => (*from, *to),
                    _ => (None, None),
                }
            });
            let fmt = |d: Option<NaiveDate>| {
                d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
            };
            let from_key = key.clone();
            let to_key = key.clone();
            view! {
                <div class="form__group form__group--range">
                    <label class="form__label">{label}</label>
                    <input
                        type="date"
                        class="form__input"
                        prop:value=move || fmt(current_range.get().0)
                        on:change=move |ev| {
                            let from = NaiveDate::parse_from_str(&event_target_value(&ev), "%Y-%m-%d").ok();
                            let (_, to) = current_range.get_untracked();
                            on_change.run((from_key.clone(), range_value(from, to)));
                        }
                    />
                    <input
                        type="date"
                        class="form__input"
                        prop:value=move || fmt(current_range.get().1)
                        on:change=move |ev| {
                            let to = NaiveDate::parse_from_str(&event_target_value(&ev), "%Y-%m-%d").ok();
                            let (from, _) = current_range.get_untracked();
                            on_change.run((to_key.clone(), range_value(from, to)));
                        }
                    />
                </div>
            }
            .into_any()
        }
        FilterKind::Text => {
            let text_key = key.clone();
            let current = Signal::derive(move || {
                match state.get().filters.get(&text_key) {
                    Some(FilterValue::Text(term)) => term.clone(),
                    _ => String::new(),
                }
            });
            let change_key = key;
            view! {
                <div class="form__group">
                    <label class="form__label">{label}</label>
                    <input
                        type="text"
                        class="form__input"
                        prop:value=move || current.get()
                        on:change=move |ev| {
                            let val = event_target_value(&ev);
                            let value = if val.trim().is_empty() {
                                None
                            } else {
                                Some(FilterValue::Text(val))
                            };
                            on_change.run((change_key.clone(), value));
                        }
                    />
                </div>
            }
            .into_any()
        }
    }
}

/// Диапазон без обеих границ равносилен снятому фильтру.
fn range_value(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Option<FilterValue> {
    if from.is_none() && to.is_none() {
        None
    } else {
        Some(FilterValue::DateRange { from, to })
    }
}
