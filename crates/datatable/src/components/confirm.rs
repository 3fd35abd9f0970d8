//! Подтверждение действия без `window.confirm`.
//!
//! Страница запрашивает подтверждение через `ConfirmService` из контекста и
//! получает ответ callback-ом; `ConfirmHost` рисует модальное окно поверх
//! страницы. Это разрывает привязку страниц к браузерному диалогу: оболочка
//! сама решает, как выглядит подтверждение.

use crate::icons::icon;
use leptos::ev;
use leptos::prelude::*;

#[derive(Clone)]
struct ConfirmRequest {
    message: String,
    on_result: Callback<bool>,
}

/// Сервис подтверждений; кладётся в контекст приложением-оболочкой.
#[derive(Clone, Copy)]
pub struct ConfirmService {
    current: RwSignal<Option<ConfirmRequest>>,
}

impl ConfirmService {
    pub fn new() -> Self {
        Self {
            current: RwSignal::new(None),
        }
    }

    /// Запрашивает подтверждение; `on_result` получает `true` при согласии.
    /// Новый запрос замещает ещё не отвеченный предыдущий (тот получает `false`).
    pub fn request(&self, message: impl Into<String>, on_result: Callback<bool>) {
        let previous = self.current.get_untracked();
        if let Some(previous) = previous {
            previous.on_result.run(false);
        }
        self.current.set(Some(ConfirmRequest {
            message: message.into(),
            on_result,
        }));
    }

    fn resolve(&self, answer: bool) {
        if let Some(request) = self.current.get_untracked() {
            request.on_result.run(answer);
        }
        self.current.set(None);
    }
}

impl Default for ConfirmService {
    fn default() -> Self {
        Self::new()
    }
}

/// Модальное окно подтверждения; разместить один раз в оболочке приложения.
#[component]
pub fn ConfirmHost() -> impl IntoView {
    let service = use_context::<ConfirmService>().expect("ConfirmService not found in context");

    // Prevent click propagation from modal content
    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    view! {
        {move || {
            service.current.get().map(|request| {
                view! {
                    <div class="modal-overlay" on:click=move |_| service.resolve(false)>
                        <div class="modal modal--confirm" on:click=stop_propagation>
                            <div class="modal-header">
                                <h2 class="modal-title">"Подтверждение"</h2>
                                <button
                                    class="button button--icon modal__close"
                                    on:click=move |_| service.resolve(false)
                                >
                                    {icon("x")}
                                </button>
                            </div>
                            <div class="modal-body">
                                <p>{request.message.clone()}</p>
                            </div>
                            <div class="modal-footer">
                                <button
                                    class="button button--secondary"
                                    on:click=move |_| service.resolve(false)
                                >
                                    "Отмена"
                                </button>
                                <button
                                    class="button button--danger"
                                    on:click=move |_| service.resolve(true)
                                >
                                    "Подтвердить"
                                </button>
                            </div>
                        </div>
                    </div>
                }
            })
        }}
    }
}
