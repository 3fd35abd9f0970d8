pub mod confirm;
pub mod data_table;
pub mod filter_panel;
pub mod notification;
pub mod pagination_controls;
pub mod search_input;
pub mod sortable_header_cell;
pub mod view_toggle;
