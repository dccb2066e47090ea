pub mod export_table;
pub mod grid_view;
pub mod models;
pub mod state;
pub mod style;
