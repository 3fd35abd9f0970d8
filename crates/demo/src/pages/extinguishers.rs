//! Страница огнетушителей: та же коллекция в режиме таблицы и карточек.
//!
//! `card_render` включает переключатель вида; фильтрованный/отсортированный
//! набор один и тот же в обоих режимах.

use datatable::{Column, DataTable, Filter, NotificationService, Record};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::json;
use std::sync::Arc;

fn sample_extinguishers() -> Vec<Record> {
    vec![
        json!({"id": 101, "codigo": "EXT-001", "tipo": "Polvo ABC", "capacidad": "6 kg", "ubicacion": "Entrada principal", "centro": {"nombre": "Centro Norte"}, "proxima_revision": "2026-01-15"}),
        json!({"id": 102, "codigo": "EXT-002", "tipo": "CO2", "capacidad": "5 kg", "ubicacion": "Sala de servidores", "centro": {"nombre": "Centro Norte"}, "proxima_revision": "2025-11-03"}),
        json!({"id": 103, "codigo": "EXT-003", "tipo": "Polvo ABC", "capacidad": "9 kg", "ubicacion": "Almacén", "centro": {"nombre": "Centro Sur"}, "proxima_revision": "2026-04-20"}),
        json!({"id": 104, "codigo": "EXT-004", "tipo": "Agua pulverizada", "capacidad": "9 l", "ubicacion": "Oficinas planta 2", "centro": {"nombre": "Centro Sur"}, "proxima_revision": "2025-09-30"}),
        json!({"id": 105, "codigo": "EXT-005", "tipo": "CO2", "capacidad": "2 kg", "ubicacion": "Cocina", "centro": {"nombre": "Centro Este"}, "proxima_revision": "2026-02-08"}),
    ]
}

async fn fetch_extinguishers() -> Result<Vec<Record>, String> {
    TimeoutFuture::new(300).await;
    Ok(sample_extinguishers())
}

#[component]
#[allow(non_snake_case)]
pub fn ExtinguishersList() -> impl IntoView {
    let (items, set_items) = signal::<Vec<Record>>(Vec::new());
    let notifications =
        use_context::<NotificationService>().expect("NotificationService not found in context");

    let fetch = move || {
        spawn_local(async move {
            match fetch_extinguishers().await {
                Ok(rows) => set_items.set(rows),
                Err(e) => notifications.error(format!("Не удалось загрузить огнетушители: {e}")),
            }
        });
    };

    fetch();

    let columns = vec![
        Column::new("codigo", "Código").sortable(),
        Column::new("tipo", "Tipo").sortable(),
        Column::new("capacidad", "Capacidad"),
        Column::new("ubicacion", "Ubicación"),
        Column::new("centro", "Centro").nested("centro.nombre").sortable(),
        Column::new("proxima_revision", "Próxima revisión").sortable(),
    ];

    let filters = vec![
        Filter::select("tipo", "Tipo"),
        Filter::select("centro", "Centro").nested("centro.nombre"),
        Filter::date_range("proxima_revision", "Próxima revisión"),
    ];

    let card_render: datatable::CardRender = Arc::new(|record: &Record| {
        let codigo = record["codigo"].as_str().unwrap_or_default().to_string();
        let tipo = record["tipo"].as_str().unwrap_or_default().to_string();
        let ubicacion = record["ubicacion"].as_str().unwrap_or_default().to_string();
        let centro = record["centro"]["nombre"].as_str().unwrap_or_default().to_string();
        view! {
            <div class="stat-card">
                <div class="stat-card__title">{codigo}</div>
                <div class="stat-card__value">{tipo}</div>
                <div class="stat-card__meta">{ubicacion}</div>
                <div class="stat-card__meta">{centro}</div>
            </div>
        }
        .into_any()
    });

    let on_delete = Callback::new(move |record: Record| {
        let id = record["id"].clone();
        set_items.update(|items| items.retain(|r| r["id"] != id));
        notifications.success("Огнетушитель удалён");
    });

    view! {
        <DataTable
            data=items
            columns=columns
            filters=filters
            title="Огнетушители"
            search_placeholder="Поиск по огнетушителям..."
            items_per_page=12
            enable_advanced_filters=true
            card_render=card_render
            on_delete=on_delete
        />
    }
}
