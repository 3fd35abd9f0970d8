//! Чистый конвейер отображения: поиск → фильтры → сортировка → страница.
//!
//! Всё здесь синхронно и не имеет побочных эффектов: функции получают срез
//! записей и состояние, возвращают новый список видимых строк. Исходный
//! набор данных никогда не мутируется — `DataTable` вызывает `run_query`
//! внутри `Memo` на каждое изменение данных или состояния.

use crate::descriptors::{Column, Filter};
use crate::record::{compare_values, display_value, parse_date, resolve_path, Record};
use crate::state::{FilterValue, SortDir, ViewState};

/// Результат конвейера для текущего состояния.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryResult {
    /// Видимый срез (текущая страница)
    pub rows: Vec<Record>,
    /// Всего строк после поиска и фильтров
    pub total: usize,
    /// Всего страниц (минимум 1)
    pub total_pages: usize,
    /// Фактическая страница после зажима в допустимый диапазон
    pub page: usize,
}

/// Текстовая форма ячейки для поиска: колоночный `text`-callback,
/// иначе каноническая строковая форма разрешённого значения.
fn cell_search_text(record: &Record, column: &Column) -> String {
    let value = resolve_path(record, column.value_key());
    match &column.text {
        Some(text) => text(value, record),
        None => display_value(value),
    }
}

/// Проходит ли строка свободный поиск: подстрока без учёта регистра
/// хотя бы в одной колонке. Пустой запрос пропускает всё.
pub fn row_matches_search(record: &Record, columns: &[Column], term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    columns
        .iter()
        .any(|column| cell_search_text(record, column).to_lowercase().contains(&term))
}

/// Проходит ли строка один активный расширенный фильтр.
pub fn row_matches_filter(record: &Record, filter: &Filter, value: &FilterValue) -> bool {
    let resolved = resolve_path(record, filter.value_key());
    match value {
        FilterValue::Select(option) => &display_value(resolved) == option,
        FilterValue::Text(term) => {
            let term = term.trim().to_lowercase();
            term.is_empty() || display_value(resolved).to_lowercase().contains(&term)
        }
        FilterValue::DateRange { from, to } => {
            // Отсутствующая или нераспознанная дата не проходит активный диапазон
            let Some(date) = resolved
                .and_then(|v| v.as_str())
                .and_then(parse_date)
                .map(|dt| dt.date())
            else {
                return false;
            };
            if let Some(from) = from {
                if date < *from {
                    return false;
                }
            }
            if let Some(to) = to {
                if date > *to {
                    return false;
                }
            }
            true
        }
    }
}

/// Стабильно сортирует строки по колонке. Значения сравниваются с учётом
/// типа (`record::compare_values`); отсутствующие значения уходят в конец
/// независимо от направления.
pub fn sort_rows(rows: &mut [Record], columns: &[Column], key: &str, dir: SortDir) {
    let Some(column) = columns.iter().find(|c| c.key == key) else {
        return;
    };
    let path = column.value_key().to_string();
    rows.sort_by(|a, b| {
        let va = resolve_path(a, &path);
        let vb = resolve_path(b, &path);
        match (va, vb) {
            // Missing-last: направление не применяется к пустым значениям
            (None, None) => std::cmp::Ordering::Equal,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (Some(_), None) => std::cmp::Ordering::Less,
            (Some(_), Some(_)) => {
                let ord = compare_values(va, vb);
                match dir {
                    SortDir::Ascending => ord,
                    SortDir::Descending => ord.reverse(),
                }
            }
        }
    });
}

/// Различные значения поля select-фильтра по всему (до фильтров) набору,
/// отсортированные для стабильного порядка в выпадающем списке.
pub fn select_options(data: &[Record], filter: &Filter) -> Vec<String> {
    let mut options: Vec<String> = data
        .iter()
        .filter_map(|record| {
            let value = resolve_path(record, filter.value_key())?;
            Some(display_value(Some(value)))
        })
        .collect();
    options.sort();
    options.dedup();
    options
}

/// Полный конвейер для текущего состояния.
pub fn run_query(
    data: &[Record],
    columns: &[Column],
    filters: &[Filter],
    state: &ViewState,
) -> QueryResult {
    let mut rows: Vec<Record> = data
        .iter()
        .filter(|record| row_matches_search(record, columns, &state.search))
        .filter(|record| {
            filters.iter().all(|filter| match state.filters.get(&filter.key) {
                Some(value) => row_matches_filter(record, filter, value),
                None => true,
            })
        })
        .cloned()
        .collect();

    if let Some((key, dir)) = &state.sort {
        sort_rows(&mut rows, columns, key, *dir);
    }

    // page_size — публичное поле ViewState; нулевое значение зажимается
    // здесь, а не только в set_page_size
    let page_size = state.page_size.max(1);
    let total = rows.len();
    let total_pages = total.div_ceil(page_size).max(1);
    let page = state.page.min(total_pages - 1);
    let start = page * page_size;
    let rows = rows.into_iter().skip(start).take(page_size).collect();

    QueryResult {
        rows,
        total,
        total_pages,
        page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptors::{Column, Filter};
    use chrono::NaiveDate;
    use serde_json::{json, Value};

    fn columns() -> Vec<Column> {
        vec![
            Column::new("nombre", "Nombre").sortable(),
            Column::new("cliente", "Cliente")
                .nested("cliente.nombre")
                .sortable(),
            Column::new("fecha_alta", "Fecha de alta").sortable(),
            Column::new("activo", "Activo").sortable(),
        ]
    }

    fn dataset() -> Vec<Value> {
        vec![
            json!({"nombre": "Centro Norte", "cliente": {"nombre": "Acme Corp"}, "fecha_alta": "2024-01-10", "activo": true}),
            json!({"nombre": "Centro Sur", "cliente": {"nombre": "Beta SL"}, "fecha_alta": "2023-06-02", "activo": false}),
            json!({"nombre": "Centro Este", "cliente": {"nombre": "Gamma SA"}, "fecha_alta": "2024-03-15", "activo": true}),
            json!({"nombre": "Centro Oeste", "fecha_alta": "2022-11-30", "activo": false}),
        ]
    }

    fn numbered(count: usize) -> Vec<Value> {
        (1..=count)
            .map(|i| json!({"nombre": format!("registro {i:03}"), "orden": i}))
            .collect()
    }

    #[test]
    fn test_search_is_subset_and_matches() {
        let data = dataset();
        let cols = columns();
        let mut state = ViewState::new(100);
        state.set_search("centro".to_string());

        let result = run_query(&data, &cols, &[], &state);
        assert_eq!(result.total, 4);
        for row in &result.rows {
            assert!(data.contains(row));
            assert!(row_matches_search(row, &cols, "centro"));
        }
    }

    #[test]
    fn test_search_nested_key_scenario_c() {
        let data = dataset();
        let cols = columns();
        let mut state = ViewState::new(100);
        state.set_search("acme".to_string());

        let result = run_query(&data, &cols, &[], &state);
        assert_eq!(result.total, 1);
        assert_eq!(result.rows[0]["nombre"], json!("Centro Norte"));
    }

    #[test]
    fn test_search_uses_text_callback() {
        let cols = vec![Column::new("activo", "Activo")
            .text(|value, _| match value {
                Some(Value::Bool(true)) => "operativo".to_string(),
                _ => "fuera de servicio".to_string(),
            })];
        let data = dataset();
        let mut state = ViewState::new(100);
        state.set_search("operativo".to_string());

        let result = run_query(&data, &cols, &[], &state);
        assert_eq!(result.total, 2);
    }

    #[test]
    fn test_select_filter_scenario_b() {
        // 15 активных, 10 неактивных
        let data: Vec<Value> = (0..25)
            .map(|i| json!({"nombre": format!("c{i}"), "activo": i < 15}))
            .collect();
        let cols = vec![Column::new("nombre", "Nombre"), Column::new("activo", "Activo")];
        let filters = vec![Filter::select("activo", "Activo")];

        let mut state = ViewState::new(100);
        state.set_filter("activo", Some(FilterValue::Select("Нет".to_string())));
        let result = run_query(&data, &cols, &filters, &state);
        assert_eq!(result.total, 10);
        for row in &result.rows {
            assert_eq!(row["activo"], json!(false));
        }

        // Снятый фильтр возвращает весь набор
        state.set_filter("activo", None);
        let result = run_query(&data, &cols, &filters, &state);
        assert_eq!(result.total, 25);
    }

    #[test]
    fn test_select_options_distinct_sorted() {
        let data = dataset();
        let filter = Filter::select("cliente", "Cliente").nested("cliente.nombre");
        assert_eq!(
            select_options(&data, &filter),
            vec!["Acme Corp", "Beta SL", "Gamma SA"]
        );

        // Булево поле сводится к отображаемой форме, в одной локали
        let filter = Filter::select("activo", "Activo");
        assert_eq!(select_options(&data, &filter), vec!["Да", "Нет"]);
    }

    #[test]
    fn test_date_range_inclusive_bounds() {
        let data = dataset();
        let cols = columns();
        let filters = vec![Filter::date_range("fecha_alta", "Fecha de alta")];
        let mut state = ViewState::new(100);

        state.set_filter(
            "fecha_alta",
            Some(FilterValue::DateRange {
                from: NaiveDate::from_ymd_opt(2024, 1, 10),
                to: NaiveDate::from_ymd_opt(2024, 3, 15),
            }),
        );
        let result = run_query(&data, &cols, &filters, &state);
        assert_eq!(result.total, 2);

        // Открытая граница "по" — не ограничено сверху
        state.set_filter(
            "fecha_alta",
            Some(FilterValue::DateRange {
                from: NaiveDate::from_ymd_opt(2023, 1, 1),
                to: None,
            }),
        );
        let result = run_query(&data, &cols, &filters, &state);
        assert_eq!(result.total, 3);
    }

    #[test]
    fn test_text_filter_single_field() {
        let data = dataset();
        let filters = vec![Filter::text("cliente", "Cliente").nested("cliente.nombre")];
        let mut state = ViewState::new(100);
        state.set_filter("cliente", Some(FilterValue::Text("beta".to_string())));

        let result = run_query(&data, &columns(), &filters, &state);
        assert_eq!(result.total, 1);
        assert_eq!(result.rows[0]["nombre"], json!("Centro Sur"));
    }

    #[test]
    fn test_sort_dates_and_missing_last() {
        let mut data = dataset();
        data.push(json!({"nombre": "Centro Sin Fecha", "activo": true}));
        let cols = columns();

        let mut state = ViewState::new(100);
        state.toggle_sort("fecha_alta");
        let asc = run_query(&data, &cols, &[], &state);
        assert_eq!(asc.rows[0]["nombre"], json!("Centro Oeste"));
        assert_eq!(asc.rows[4]["nombre"], json!("Centro Sin Fecha"));

        state.toggle_sort("fecha_alta");
        let desc = run_query(&data, &cols, &[], &state);
        assert_eq!(desc.rows[0]["nombre"], json!("Centro Este"));
        // Пустое значение в конце и при убывании
        assert_eq!(desc.rows[4]["nombre"], json!("Centro Sin Fecha"));
    }

    #[test]
    fn test_sort_cycle_returns_original_order_scenario_d() {
        let data = dataset();
        let cols = columns();
        let mut state = ViewState::new(100);

        state.toggle_sort("fecha_alta");
        state.toggle_sort("fecha_alta");
        state.toggle_sort("fecha_alta");
        let result = run_query(&data, &cols, &[], &state);
        assert_eq!(result.rows, data);
    }

    #[test]
    fn test_sort_descending_reverses_distinct_keys() {
        let data = dataset();
        let cols = columns();

        let mut state = ViewState::new(100);
        state.toggle_sort("nombre");
        let asc = run_query(&data, &cols, &[], &state);

        state.toggle_sort("nombre");
        let desc = run_query(&data, &cols, &[], &state);

        let reversed: Vec<Value> = asc.rows.into_iter().rev().collect();
        assert_eq!(desc.rows, reversed);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let data = vec![
            json!({"nombre": "a", "grupo": "x"}),
            json!({"nombre": "b", "grupo": "x"}),
            json!({"nombre": "c", "grupo": "x"}),
        ];
        let cols = vec![Column::new("grupo", "Grupo").sortable()];
        let mut state = ViewState::new(100);
        state.toggle_sort("grupo");

        let result = run_query(&data, &cols, &[], &state);
        assert_eq!(result.rows, data);
    }

    #[test]
    fn test_pagination_scenario_a() {
        let data = numbered(25);
        let cols = vec![Column::new("nombre", "Nombre")];
        let mut state = ViewState::new(10);

        let page1 = run_query(&data, &cols, &[], &state);
        assert_eq!(page1.total, 25);
        assert_eq!(page1.total_pages, 3);
        assert_eq!(page1.rows.len(), 10);
        assert_eq!(page1.rows[0]["orden"], json!(1));
        assert_eq!(page1.rows[9]["orden"], json!(10));

        state.set_page(2);
        let page3 = run_query(&data, &cols, &[], &state);
        assert_eq!(page3.rows.len(), 5);
        assert_eq!(page3.rows[0]["orden"], json!(21));
        assert_eq!(page3.rows[4]["orden"], json!(25));
    }

    #[test]
    fn test_pagination_lossless_partition() {
        let data = numbered(23);
        let cols = vec![Column::new("nombre", "Nombre")];
        let mut state = ViewState::new(7);

        let mut collected: Vec<Value> = Vec::new();
        let total_pages = run_query(&data, &cols, &[], &state).total_pages;
        for page in 0..total_pages {
            state.set_page(page);
            collected.extend(run_query(&data, &cols, &[], &state).rows);
        }
        assert_eq!(collected, data);
    }

    #[test]
    fn test_page_clamps_when_filter_shrinks_set() {
        let data = numbered(25);
        let cols = vec![Column::new("nombre", "Nombre")];
        let mut state = ViewState::new(10);
        state.page = 2;
        // Поиск сузил набор до 1 строки, страница 3 больше не существует
        state.search = "registro 004".to_string();

        let result = run_query(&data, &cols, &[], &state);
        assert_eq!(result.total, 1);
        assert_eq!(result.page, 0);
        assert_eq!(result.rows.len(), 1);
    }

    #[test]
    fn test_zero_page_size_written_directly_is_clamped() {
        let data = numbered(3);
        let cols = vec![Column::new("nombre", "Nombre")];
        let mut state = ViewState::new(10);
        // Мимо set_page_size, напрямую в поле
        state.page_size = 0;

        let result = run_query(&data, &cols, &[], &state);
        assert_eq!(result.total, 3);
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.rows.len(), 1);
    }

    #[test]
    fn test_empty_dataset() {
        let cols = vec![Column::new("nombre", "Nombre")];
        let state = ViewState::new(10);
        let result = run_query(&[], &cols, &[], &state);
        assert_eq!(result.total, 0);
        assert_eq!(result.total_pages, 1);
        assert_eq!(result.page, 0);
        assert!(result.rows.is_empty());
    }

    #[test]
    fn test_query_is_idempotent() {
        let data = dataset();
        let cols = columns();
        let filters = vec![Filter::select("activo", "Activo")];
        let mut state = ViewState::new(2);
        state.set_search("centro".to_string());
        state.set_filter("activo", Some(FilterValue::Select("Да".to_string())));
        state.toggle_sort("nombre");

        let first = run_query(&data, &cols, &filters, &state);
        let second = run_query(&data, &cols, &filters, &state);
        assert_eq!(first, second);
    }

    #[test]
    fn test_source_data_is_never_mutated() {
        let data = dataset();
        let snapshot = data.clone();
        let cols = columns();
        let mut state = ViewState::new(2);
        state.toggle_sort("fecha_alta");
        state.set_search("centro".to_string());

        let _ = run_query(&data, &cols, &[], &state);
        assert_eq!(data, snapshot);
    }
}
