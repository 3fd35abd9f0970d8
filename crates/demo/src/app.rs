//! Оболочка демо-приложения: сервисы в контексте и переключатель страниц.

use crate::pages::clients::ClientsList;
use crate::pages::extinguishers::ExtinguishersList;
use datatable::{ConfirmHost, ConfirmService, NotificationHost, NotificationService};
use leptos::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Page {
    Clients,
    Extinguishers,
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(NotificationService::new());
    provide_context(ConfirmService::new());

    let (page, set_page) = signal(Page::Clients);

    view! {
        <div class="app">
            <nav class="sidebar">
                <button
                    class="sidebar__link"
                    class:sidebar__link--active=move || page.get() == Page::Clients
                    on:click=move |_| set_page.set(Page::Clients)
                >
                    "Клиенты"
                </button>
                <button
                    class="sidebar__link"
                    class:sidebar__link--active=move || page.get() == Page::Extinguishers
                    on:click=move |_| set_page.set(Page::Extinguishers)
                >
                    "Огнетушители"
                </button>
            </nav>
            <main class="content">
                {move || match page.get() {
                    Page::Clients => view! { <ClientsList /> }.into_any(),
                    Page::Extinguishers => view! { <ExtinguishersList /> }.into_any(),
                }}
            </main>
            <NotificationHost />
            <ConfirmHost />
        </div>
    }
}
