//! Страница списка клиентов: таблица с поиском, фильтрами и действиями.
//!
//! Загрузка данных имитируется задержкой; в реальном приложении здесь был бы
//! запрос к backend. Ошибка загрузки уходит в `NotificationService`, сам
//! просмотрщик продолжает показывать то, что у него есть.

use datatable::{
    parse_date, Column, DataTable, Filter, NotificationService, Record,
};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::json;

fn sample_clients() -> Vec<Record> {
    vec![
        json!({"id": 1, "nombre": "Acme Corp", "cif": "B11111111", "responsable": {"nombre": "Laura Pérez", "telefono": "600 111 222"}, "fecha_alta": "2022-04-11", "activo": true}),
        json!({"id": 2, "nombre": "Beta SL", "cif": "B22222222", "responsable": {"nombre": "Marcos Ruiz", "telefono": "600 333 444"}, "fecha_alta": "2023-01-25", "activo": true}),
        json!({"id": 3, "nombre": "Gamma SA", "cif": "A33333333", "responsable": {"nombre": "Ana Ortiz"}, "fecha_alta": "2021-09-02", "activo": false}),
        json!({"id": 4, "nombre": "Delta e Hijos", "cif": "B44444444", "fecha_alta": "2024-02-14", "activo": true}),
        json!({"id": 5, "nombre": "Épsilon 2000", "cif": "B55555555", "responsable": {"nombre": "Jorge Gil", "telefono": "600 555 666"}, "fecha_alta": "2020-12-30", "activo": false}),
        json!({"id": 6, "nombre": "Zeta Logística", "cif": "B66666666", "responsable": {"nombre": "Carmen Soto", "telefono": "600 777 888"}, "fecha_alta": "2023-11-08", "activo": true}),
    ]
}

async fn fetch_clients() -> Result<Vec<Record>, String> {
    // Имитация сетевой задержки
    TimeoutFuture::new(300).await;
    Ok(sample_clients())
}

#[component]
#[allow(non_snake_case)]
pub fn ClientsList() -> impl IntoView {
    let (items, set_items) = signal::<Vec<Record>>(Vec::new());
    let notifications =
        use_context::<NotificationService>().expect("NotificationService not found in context");

    let fetch = move || {
        spawn_local(async move {
            match fetch_clients().await {
                Ok(rows) => set_items.set(rows),
                Err(e) => notifications.error(format!("Не удалось загрузить клиентов: {e}")),
            }
        });
    };

    fetch();

    let columns = vec![
        Column::new("nombre", "Nombre").sortable(),
        Column::new("cif", "CIF"),
        Column::new("responsable", "Responsable")
            .nested("responsable.nombre")
            .sortable(),
        Column::new("telefono", "Teléfono").nested("responsable.telefono"),
        Column::new("fecha_alta", "Fecha de alta")
            .sortable()
            .render(|value, _| {
                let text = value
                    .and_then(|v| v.as_str())
                    .and_then(parse_date)
                    .map(|dt| dt.format("%d.%m.%Y").to_string())
                    .unwrap_or_default();
                view! { <span>{text}</span> }.into_any()
            }),
        Column::new("activo", "Activo")
            .sortable()
            .render(|value, _| {
                if value.and_then(|v| v.as_bool()).unwrap_or(false) {
                    view! { <span class="badge badge--success">"Да"</span> }.into_any()
                } else {
                    view! { <span class="badge badge--muted">"Нет"</span> }.into_any()
                }
            }),
    ];

    let filters = vec![
        Filter::select("activo", "Activo"),
        Filter::date_range("fecha_alta", "Fecha de alta"),
        Filter::text("responsable", "Responsable").nested("responsable.nombre"),
    ];

    let on_add = Callback::new(move |_| {
        notifications.info("Форма создания клиента в демо не входит");
    });
    let on_edit = Callback::new(move |record: Record| {
        let nombre = record["nombre"].as_str().unwrap_or_default().to_string();
        notifications.info(format!("Редактирование: {nombre}"));
    });
    // Подтверждение запрашивает сам DataTable через ConfirmService
    let on_delete = Callback::new(move |record: Record| {
        let id = record["id"].clone();
        set_items.update(|items| items.retain(|r| r["id"] != id));
        notifications.success("Клиент удалён");
    });

    view! {
        <DataTable
            data=items
            columns=columns
            filters=filters
            title="Клиенты"
            search_placeholder="Поиск по клиентам..."
            enable_advanced_filters=true
            on_add=on_add
            on_edit=on_edit
            on_delete=on_delete
        />
    }
}
