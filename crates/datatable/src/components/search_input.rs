//! Поле свободного поиска с debounce и кнопкой очистки.

use crate::icons::icon;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Компонент поиска: ввод с задержкой 300 мс перед применением фильтра.
///
/// Пустая строка снимает фильтр; минимальной длины запроса нет — поиск
/// работает от первого символа.
#[component]
pub fn SearchInput(
    /// Текущее значение фильтра (для отображения)
    #[prop(into)]
    value: Signal<String>,
    /// Callback для обновления значения фильтра
    #[prop(into)]
    on_change: Callback<String>,
    /// Placeholder текст
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Поиск...".to_string()
    } else {
        placeholder
    };

    // Локальное состояние для input (до debounce)
    let (input_value, set_input_value) = signal(String::new());

    // Debounce механизм
    let debounce_timeout = StoredValue::new(None::<i32>);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());

        // Отменяем предыдущий таймер если есть
        if let Some(timeout_id) = debounce_timeout.get_value() {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(timeout_id);
            }
        }

        // Создаем новый таймер
        let Some(window) = web_sys::window() else {
            on_change.run(new_value);
            return;
        };
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
            on_change.run(new_value.clone());
        }) as Box<dyn Fn()>);

        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref::<js_sys::Function>(),
            300,
        ) {
            Ok(timeout_id) => debounce_timeout.set_value(Some(timeout_id)),
            Err(_) => log::warn!("setTimeout failed, search applied without debounce"),
        }

        closure.forget();
    };

    let is_filter_active = move || !value.get().trim().is_empty();

    let clear_filter = move |_| {
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input" style="position: relative; display: inline-flex; align-items: center;">
            <span class="search-input__icon">{icon("search")}</span>
            <input
                type="text"
                class="search-input__field"
                class:search-input__field--active=is_filter_active
                placeholder={placeholder}
                prop:value=move || input_value.get()
                on:input=move |ev| {
                    let val = event_target_value(&ev);
                    handle_input_change(val);
                }
            />
            {move || if !input_value.get().is_empty() {
                view! {
                    <button
                        class="search-input__clear"
                        on:click=clear_filter
                        title="Очистить"
                    >
                        {icon("x")}
                    </button>
                }.into_any()
            } else {
                view! { <></> }.into_any()
            }}
        </div>
    }
}
