//! Reusable view components.

pub mod data_table;

pub use data_table::{
    ActionKind, DataTableConfig, RowAction, RowView, TableColumn, TableRow, TableView,
};
