//! Работа с записями: разрешение вложенных путей, отображаемое значение,
//! типо-зависимое сравнение.
//!
//! Запись — это произвольный JSON-объект (`serde_json::Value`). Компонент не
//! знает бизнес-смысла полей: колонки и фильтры ссылаются на них по ключу или
//! по вложенному пути вида `"cliente.nombre"`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::cmp::Ordering;

/// Запись набора данных. Всегда JSON-объект; форма не валидируется.
pub type Record = Value;

/// Разрешает значение по ключу или вложенному пути через точку.
///
/// Отсутствующий промежуточный объект или `null` дают `None`, а не ошибку:
/// неполные записи — нормальная ситуация для списков бэк-офиса.
pub fn resolve_path<'a>(record: &'a Record, path: &str) -> Option<&'a Value> {
    let mut current = record;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// Каноническая строковая форма значения для поиска и ячеек без renderer.
///
/// Строки отдаются без кавычек, числа — через `to_string`, булевы — как
/// "Да"/"Нет", вложенные объекты/массивы — компактным JSON.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        // Булевы значения отдаются в локали библиотеки, как и остальные её
        // строки; колонке с другим текстом нужен `render`/`text` callback.
        Some(Value::Bool(b)) => {
            if *b {
                "Да".to_string()
            } else {
                "Нет".to_string()
            }
        }
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Пытается распознать дату в строке.
///
/// Форматы те же, что отдаёт backend в списках: ISO-дата, ISO-датавремя
/// (с зоной и без) и `dd.mm.yyyy`.
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    if let Ok(d) = NaiveDate::parse_from_str(text, "%d.%m.%Y") {
        return d.and_hms_opt(0, 0, 0);
    }
    None
}

/// Сравнивает два разрешённых значения с учётом типа.
///
/// Числа сравниваются численно, строки-даты — хронологически, булевы —
/// `false < true`, прочие строки — без учёта регистра. Отсутствующее
/// значение всегда больше присутствующего: при обоих направлениях
/// сортировки пустые строки уходят в конец (см. `query::sort_rows`).
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => compare_present(a, b),
    }
}

fn compare_present(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => {
            // Dates come through as strings; compare chronologically when both parse
            if let (Some(dx), Some(dy)) = (parse_date(x), parse_date(y)) {
                return dx.cmp(&dy);
            }
            x.to_lowercase().cmp(&y.to_lowercase())
        }
        // Mixed types: fall back to the display form
        _ => display_value(Some(a))
            .to_lowercase()
            .cmp(&display_value(Some(b)).to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_top_level() {
        let record = json!({"nombre": "Acme", "activo": true});
        assert_eq!(resolve_path(&record, "nombre"), Some(&json!("Acme")));
        assert_eq!(resolve_path(&record, "activo"), Some(&json!(true)));
    }

    #[test]
    fn test_resolve_nested() {
        let record = json!({"cliente": {"nombre": "Acme Corp", "direccion": {"ciudad": "Madrid"}}});
        assert_eq!(
            resolve_path(&record, "cliente.nombre"),
            Some(&json!("Acme Corp"))
        );
        assert_eq!(
            resolve_path(&record, "cliente.direccion.ciudad"),
            Some(&json!("Madrid"))
        );
    }

    #[test]
    fn test_resolve_missing_is_none() {
        let record = json!({"cliente": {"nombre": "Acme"}});
        assert_eq!(resolve_path(&record, "cliente.telefono"), None);
        assert_eq!(resolve_path(&record, "sucursal.nombre"), None);
        assert_eq!(resolve_path(&record, "cliente.nombre.x"), None);
    }

    #[test]
    fn test_resolve_null_is_none() {
        let record = json!({"comentario": null});
        assert_eq!(resolve_path(&record, "comentario"), None);
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(Some(&json!("hola"))), "hola");
        assert_eq!(display_value(Some(&json!(42))), "42");
        assert_eq!(display_value(Some(&json!(true))), "Да");
        assert_eq!(display_value(Some(&json!(false))), "Нет");
        assert_eq!(display_value(None), "");
    }

    #[test]
    fn test_parse_date_formats() {
        assert!(parse_date("2024-03-15").is_some());
        assert!(parse_date("2024-03-15T14:02:26Z").is_some());
        assert!(parse_date("2024-03-15T14:02:26.123Z").is_some());
        assert!(parse_date("15.03.2024").is_some());
        assert!(parse_date("no es fecha").is_none());
    }

    #[test]
    fn test_compare_numbers() {
        assert_eq!(
            compare_values(Some(&json!(2)), Some(&json!(10))),
            Ordering::Less
        );
        // Строковое сравнение дало бы обратный порядок
        assert_eq!(
            compare_values(Some(&json!(10.5)), Some(&json!(2.1))),
            Ordering::Greater
        );
    }

    #[test]
    fn test_compare_dates_chronologically() {
        assert_eq!(
            compare_values(Some(&json!("2024-02-01")), Some(&json!("2024-10-01"))),
            Ordering::Less
        );
        assert_eq!(
            compare_values(
                Some(&json!("2024-12-31T23:59:59Z")),
                Some(&json!("2024-01-01"))
            ),
            Ordering::Greater
        );
    }

    #[test]
    fn test_compare_strings_case_insensitive() {
        assert_eq!(
            compare_values(Some(&json!("acme")), Some(&json!("ACME"))),
            Ordering::Equal
        );
        assert_eq!(
            compare_values(Some(&json!("Beta")), Some(&json!("alfa"))),
            Ordering::Greater
        );
    }

    #[test]
    fn test_missing_sorts_last() {
        assert_eq!(compare_values(None, Some(&json!("a"))), Ordering::Greater);
        assert_eq!(compare_values(Some(&json!("a")), None), Ordering::Less);
        assert_eq!(compare_values(None, None), Ordering::Equal);
    }
}
