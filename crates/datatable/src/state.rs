//! Состояние отображения: поиск, сортировка, страница, активные фильтры.
//!
//! Состояние живёт только внутри компонента (сигнал в `DataTable`), никуда
//! не сохраняется и отбрасывается при размонтировании. Любая смена поиска,
//! фильтра, сортировки или размера страницы возвращает на первую страницу.

use chrono::NaiveDate;
use std::collections::HashMap;

/// Направление сортировки.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDir {
    Ascending,
    Descending,
}

/// Активное значение расширенного фильтра.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterValue {
    /// Выбранный вариант select-фильтра (строковая форма значения)
    Select(String),
    /// Диапазон дат, обе границы включительно; `None` — не ограничено
    DateRange {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
    /// Подстрока текстового фильтра
    Text(String),
}

/// Состояние отображения списка.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    /// Строка свободного поиска
    pub search: String,
    /// Активная сортировка: ключ колонки и направление; `None` — исходный порядок
    pub sort: Option<(String, SortDir)>,
    /// Текущая страница, с нуля (в UI показывается с единицы)
    pub page: usize,
    /// Размер страницы
    pub page_size: usize,
    /// Активные расширенные фильтры по ключу описателя
    pub filters: HashMap<String, FilterValue>,
}

impl ViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            sort: None,
            page: 0,
            page_size: page_size.max(1),
            filters: HashMap::new(),
        }
    }

    /// Меняет строку поиска и возвращает на первую страницу.
    pub fn set_search(&mut self, search: String) {
        self.search = search;
        self.page = 0;
    }

    /// Переключает сортировку по колонке циклом:
    /// по возрастанию → по убыванию → исходный порядок.
    pub fn toggle_sort(&mut self, key: &str) {
        self.sort = match self.sort.take() {
            Some((current, SortDir::Ascending)) if current == key => {
                Some((current, SortDir::Descending))
            }
            Some((current, SortDir::Descending)) if current == key => None,
            _ => Some((key.to_string(), SortDir::Ascending)),
        };
        self.page = 0;
    }

    /// Устанавливает или снимает фильтр; страница сбрасывается.
    pub fn set_filter(&mut self, key: &str, value: Option<FilterValue>) {
        match value {
            Some(value) => {
                self.filters.insert(key.to_string(), value);
            }
            None => {
                self.filters.remove(key);
            }
        }
        self.page = 0;
    }

    /// Снимает все фильтры разом (кнопка "сбросить").
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.page = 0;
    }

    /// Количество активных фильтров для бейджа на панели.
    pub fn active_filter_count(&self) -> usize {
        self.filters.len()
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Меняет размер страницы и возвращает на первую страницу.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_cycle() {
        let mut state = ViewState::new(10);
        assert_eq!(state.sort, None);

        state.toggle_sort("fecha");
        assert_eq!(state.sort, Some(("fecha".to_string(), SortDir::Ascending)));

        state.toggle_sort("fecha");
        assert_eq!(state.sort, Some(("fecha".to_string(), SortDir::Descending)));

        state.toggle_sort("fecha");
        assert_eq!(state.sort, None);
    }

    #[test]
    fn test_sort_switch_column_starts_ascending() {
        let mut state = ViewState::new(10);
        state.toggle_sort("nombre");
        state.toggle_sort("nombre");
        assert_eq!(
            state.sort,
            Some(("nombre".to_string(), SortDir::Descending))
        );

        state.toggle_sort("fecha");
        assert_eq!(state.sort, Some(("fecha".to_string(), SortDir::Ascending)));
    }

    #[test]
    fn test_search_resets_page() {
        let mut state = ViewState::new(10);
        state.set_page(3);
        state.set_search("acme".to_string());
        assert_eq!(state.page, 0);
        assert_eq!(state.search, "acme");
    }

    #[test]
    fn test_filter_resets_page() {
        let mut state = ViewState::new(10);
        state.set_page(2);
        state.set_filter("activo", Some(FilterValue::Select("Да".to_string())));
        assert_eq!(state.page, 0);
        assert_eq!(state.active_filter_count(), 1);

        state.set_page(2);
        state.set_filter("activo", None);
        assert_eq!(state.page, 0);
        assert_eq!(state.active_filter_count(), 0);
    }

    #[test]
    fn test_page_size_floor_and_reset() {
        let mut state = ViewState::new(0);
        assert_eq!(state.page_size, 1);

        state.set_page(5);
        state.set_page_size(25);
        assert_eq!(state.page, 0);
        assert_eq!(state.page_size, 25);
    }

    #[test]
    fn test_clear_filters() {
        let mut state = ViewState::new(10);
        state.set_filter("activo", Some(FilterValue::Select("Нет".to_string())));
        state.set_filter("tipo", Some(FilterValue::Text("co2".to_string())));
        state.clear_filters();
        assert_eq!(state.active_filter_count(), 0);
    }
}
