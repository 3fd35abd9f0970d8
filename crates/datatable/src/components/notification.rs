//! Транзиентные уведомления (тосты).
//!
//! Страницы сообщают об ошибках загрузки и результатах операций через
//! `NotificationService` из контекста; `NotificationHost` рисует стек
//! тостов и убирает каждый через несколько секунд. Автоматических
//! повторов операций нет — только сообщение пользователю.

use crate::icons::icon;
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

const DISMISS_MS: u32 = 4000;

/// Вид уведомления.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
}

/// Сервис уведомлений; кладётся в контекст приложением-оболочкой.
#[derive(Clone, Copy)]
pub struct NotificationService {
    items: RwSignal<Vec<Notification>>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
        }
    }

    /// Показывает уведомление и убирает его по таймеру.
    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) {
        let message = message.into();
        if kind == NotificationKind::Error {
            log::error!("{}", message);
        }
        let id = Uuid::new_v4();
        self.items.update(|items| {
            items.push(Notification { id, kind, message });
        });

        let items = self.items;
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(DISMISS_MS).await;
            items.update(|list| list.retain(|n| n.id != id));
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Error, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Info, message);
    }

    /// Немедленно убирает уведомление (кнопка закрытия).
    pub fn dismiss(&self, id: Uuid) {
        self.items.update(|list| list.retain(|n| n.id != id));
    }

    fn items(&self) -> RwSignal<Vec<Notification>> {
        self.items
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

/// Стек тостов; разместить один раз в оболочке приложения.
#[component]
pub fn NotificationHost() -> impl IntoView {
    let service =
        use_context::<NotificationService>().expect("NotificationService not found in context");
    let items = service.items();

    view! {
        <div class="notifications">
            <For
                each=move || items.get()
                key=|n| n.id
                children=move |n| {
                    let class = match n.kind {
                        NotificationKind::Success => "notification notification--success",
                        NotificationKind::Error => "notification notification--error",
                        NotificationKind::Info => "notification notification--info",
                    };
                    let kind_icon = match n.kind {
                        NotificationKind::Success => "check",
                        NotificationKind::Error => "alert",
                        NotificationKind::Info => "inbox",
                    };
                    let id = n.id;
                    view! {
                        <div class=class>
                            <span class="notification__icon">{icon(kind_icon)}</span>
                            <span class="notification__text">{n.message.clone()}</span>
                            <button
                                class="notification__close"
                                on:click=move |_| service.dismiss(id)
                            >
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
