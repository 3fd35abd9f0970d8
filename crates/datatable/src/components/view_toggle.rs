//! Переключатель режима отображения: таблица или карточки.

use crate::descriptors::ViewMode;
use crate::icons::icon;
use leptos::prelude::*;

#[component]
pub fn ViewToggle(
    /// Текущий режим
    #[prop(into)]
    mode: Signal<ViewMode>,

    /// Callback при переключении
    on_change: Callback<ViewMode>,
) -> impl IntoView {
    view! {
        <div class="view-toggle">
            <button
                class="view-toggle__button"
                class:view-toggle__button--active=move || mode.get() == ViewMode::Table
                on:click=move |_| on_change.run(ViewMode::Table)
                title="Таблица"
            >
                {icon("list")}
            </button>
            <button
                class="view-toggle__button"
                class:view-toggle__button--active=move || mode.get() == ViewMode::Cards
                on:click=move |_| on_change.run(ViewMode::Cards)
                title="Карточки"
            >
                {icon("grid")}
            </button>
        </div>
    }
}
