//! Описатели колонок, фильтров и действий.
//!
//! Страница-вызывающий собирает их билдер-методами и передаёт в `DataTable`;
//! сам компонент бизнес-смысла полей не знает.
//!
//! # Примеры
//!
//! ```rust,ignore
//! let columns = vec![
//!     Column::new("nombre", "Nombre").sortable(),
//!     Column::new("responsable", "Responsable").nested("responsable.nombre"),
//!     Column::new("activo", "Activo")
//!         .sortable()
//!         .render(|value, _record| { /* бейдж по значению */ }),
//! ];
//! let filters = vec![
//!     Filter::select("activo", "Activo"),
//!     Filter::date_range("fecha_alta", "Fecha de alta"),
//! ];
//! ```

use crate::record::Record;
use leptos::prelude::*;
use serde_json::Value;
use std::sync::Arc;

/// Отрисовка ячейки: разрешённое значение (может отсутствовать) и вся запись.
pub type CellRender = Arc<dyn Fn(Option<&Value>, &Record) -> AnyView + Send + Sync>;

/// Текстовая форма ячейки для поиска, когда отображение нетривиально.
pub type CellText = Arc<dyn Fn(Option<&Value>, &Record) -> String + Send + Sync>;

/// Отрисовка карточки записи в режиме сетки.
pub type CardRender = Arc<dyn Fn(&Record) -> AnyView + Send + Sync>;

/// Описатель колонки таблицы.
#[derive(Clone)]
pub struct Column {
    /// Ключ поля записи (или синтетический ключ при `nested_key`)
    pub key: String,
    /// Заголовок колонки
    pub label: String,
    /// Разрешена ли сортировка по этой колонке
    pub sortable: bool,
    /// Вложенный путь через точку, замещающий `key` при извлечении значения
    pub nested_key: Option<String>,
    /// Кастомная отрисовка ячейки
    pub render: Option<CellRender>,
    /// Кастомная текстовая форма для поиска (по умолчанию — строковая форма значения)
    pub text: Option<CellText>,
}

impl Column {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            nested_key: None,
            render: None,
            text: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn nested(mut self, path: impl Into<String>) -> Self {
        self.nested_key = Some(path.into());
        self
    }

    pub fn render(
        mut self,
        f: impl Fn(Option<&Value>, &Record) -> AnyView + Send + Sync + 'static,
    ) -> Self {
        self.render = Some(Arc::new(f));
        self
    }

    pub fn text(
        mut self,
        f: impl Fn(Option<&Value>, &Record) -> String + Send + Sync + 'static,
    ) -> Self {
        self.text = Some(Arc::new(f));
        self
    }

    /// Путь, по которому извлекается значение колонки.
    pub fn value_key(&self) -> &str {
        self.nested_key.as_deref().unwrap_or(&self.key)
    }
}

/// Вид расширенного фильтра.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKind {
    /// Выпадающий список из различных значений поля в наборе данных
    Select,
    /// Пара дат "с"/"по", обе границы включительно и опциональны
    DateRange,
    /// Подстрока по одному полю
    Text,
}

/// Описатель расширенного фильтра.
#[derive(Clone)]
pub struct Filter {
    pub key: String,
    pub label: String,
    pub kind: FilterKind,
    /// Вложенный путь через точку, замещающий `key` при извлечении значения
    pub nested_key: Option<String>,
}

impl Filter {
    pub fn select(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FilterKind::Select)
    }

    pub fn date_range(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FilterKind::DateRange)
    }

    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FilterKind::Text)
    }

    fn new(key: impl Into<String>, label: impl Into<String>, kind: FilterKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            nested_key: None,
        }
    }

    pub fn nested(mut self, path: impl Into<String>) -> Self {
        self.nested_key = Some(path.into());
        self
    }

    /// Путь, по которому извлекается значение фильтра.
    pub fn value_key(&self) -> &str {
        self.nested_key.as_deref().unwrap_or(&self.key)
    }
}

/// Описатель действия в строке таблицы (кнопка в хвостовой колонке).
#[derive(Clone)]
pub struct Action {
    /// Подсказка кнопки
    pub label: String,
    /// Имя иконки для `icons::icon`
    pub icon: &'static str,
    /// Обработчик; получает запись целиком
    pub on_click: Callback<Record>,
    /// Дополнительный CSS-класс кнопки
    pub class: &'static str,
    /// Скрыть действие, не меняя разметку соседних колонок
    pub hidden: bool,
}

impl Action {
    pub fn new(
        label: impl Into<String>,
        icon: &'static str,
        on_click: Callback<Record>,
    ) -> Self {
        Self {
            label: label.into(),
            icon,
            on_click,
            class: "",
            hidden: false,
        }
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.class = class;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

/// Режим отображения набора данных.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Table,
    Cards,
}
