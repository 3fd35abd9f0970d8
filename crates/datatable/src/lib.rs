//! Универсальный просмотрщик коллекций для страниц-списков бэк-офиса.
//!
//! Страница передаёт набор однородных записей (JSON-объекты), описатели
//! колонок/фильтров/действий и callbacks — компонент `DataTable` рисует
//! таблицу или сетку карточек с поиском, расширенными фильтрами,
//! сортировкой и страницами. Компонент не делает сетевых запросов и не
//! мутирует данные: вся логика отображения — чистый конвейер в `query`.

pub mod components;
pub mod descriptors;
pub mod icons;
pub mod query;
pub mod record;
pub mod state;

pub use components::confirm::{ConfirmHost, ConfirmService};
pub use components::data_table::DataTable;
pub use components::notification::{NotificationHost, NotificationKind, NotificationService};
pub use components::view_toggle::ViewToggle;
pub use descriptors::{Action, CardRender, CellRender, CellText, Column, Filter, FilterKind, ViewMode};
pub use query::{run_query, select_options, QueryResult};
pub use record::{display_value, parse_date, resolve_path, Record};
pub use state::{FilterValue, SortDir, ViewState};
