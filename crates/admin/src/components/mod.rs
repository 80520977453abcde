//! Reusable UI component configuration.
//!
//! Templates stay declarative; the copy and column layout for shared
//! chrome (tables, confirmation modals) is assembled here in Rust where
//! it can be unit tested.

pub mod alert_modal;
pub mod data_table;

pub use alert_modal::AlertModalConfig;
pub use data_table::{DataTableConfig, TableColumn};
