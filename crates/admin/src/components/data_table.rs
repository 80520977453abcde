//! Data table component types.
//!
//! Every entity list page renders the same table chrome: a search box
//! that submits a `q` query back to the list route, sortable column
//! headers, and an empty state. These types carry that configuration
//! into the templates; the rows themselves stay entity-specific.

/// Column definition for a data table.
#[derive(Debug, Clone)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
    /// Whether the column is sortable.
    pub sortable: bool,
}

impl TableColumn {
    /// Create a new sortable column.
    #[must_use]
    pub fn sortable(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            sortable: true,
        }
    }

    /// Create a new non-sortable column.
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            sortable: false,
        }
    }
}

/// Configuration for a data table.
#[derive(Debug, Clone)]
pub struct DataTableConfig {
    /// Unique table identifier.
    pub table_id: String,
    /// Column definitions.
    pub columns: Vec<TableColumn>,
    /// Search placeholder text.
    pub search_placeholder: String,
    /// Title for empty state.
    pub empty_title: String,
    /// Description for empty state.
    pub empty_description: String,
}

impl DataTableConfig {
    /// Create a new data table configuration.
    #[must_use]
    pub fn new(table_id: &str) -> Self {
        Self {
            table_id: table_id.to_string(),
            columns: vec![],
            search_placeholder: "Search...".to_string(),
            empty_title: "No results found".to_string(),
            empty_description: String::new(),
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Set search placeholder.
    #[must_use]
    pub fn search_placeholder(mut self, placeholder: &str) -> Self {
        self.search_placeholder = placeholder.to_string();
        self
    }

    /// Set empty state copy.
    #[must_use]
    pub fn empty_state(mut self, title: &str, description: &str) -> Self {
        self.empty_title = title.to_string();
        self.empty_description = description.to_string();
        self
    }
}

/// Build the billboards table configuration.
#[must_use]
pub fn billboards_table_config() -> DataTableConfig {
    DataTableConfig::new("billboards")
        .column(TableColumn::sortable("label", "Label"))
        .column(TableColumn::sortable("created", "Date"))
        .column(TableColumn::new("actions", ""))
        .search_placeholder("Search billboards by label...")
        .empty_state("No billboards found", "Create a billboard to get started")
}

/// Build the colors table configuration.
#[must_use]
pub fn colors_table_config() -> DataTableConfig {
    DataTableConfig::new("colors")
        .column(TableColumn::sortable("name", "Name"))
        .column(TableColumn::new("value", "Value"))
        .column(TableColumn::sortable("created", "Date"))
        .column(TableColumn::new("actions", ""))
        .search_placeholder("Search colors by name...")
        .empty_state("No colors found", "Create a color to get started")
}

/// Build the sizes table configuration.
#[must_use]
pub fn sizes_table_config() -> DataTableConfig {
    DataTableConfig::new("sizes")
        .column(TableColumn::sortable("name", "Name"))
        .column(TableColumn::new("value", "Value"))
        .column(TableColumn::sortable("created", "Date"))
        .column(TableColumn::new("actions", ""))
        .search_placeholder("Search sizes by name...")
        .empty_state("No sizes found", "Create a size to get started")
}

/// Build the orders table configuration.
#[must_use]
pub fn orders_table_config() -> DataTableConfig {
    DataTableConfig::new("orders")
        .column(TableColumn::sortable("products", "Products"))
        .column(TableColumn::new("phone", "Phone"))
        .column(TableColumn::new("address", "Address"))
        .column(TableColumn::sortable("total", "Total price"))
        .column(TableColumn::new("paid", "Paid"))
        .column(TableColumn::sortable("created", "Date"))
        .search_placeholder("Search orders by product...")
        .empty_state("No orders found", "Orders appear here once customers check out")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_accumulates_columns() {
        let config = DataTableConfig::new("widgets")
            .column(TableColumn::sortable("name", "Name"))
            .column(TableColumn::new("actions", ""));

        assert_eq!(config.table_id, "widgets");
        assert_eq!(config.columns.len(), 2);
        assert!(config.columns[0].sortable);
        assert!(!config.columns[1].sortable);
    }

    #[test]
    fn test_entity_tables_have_search_copy() {
        assert_eq!(
            billboards_table_config().search_placeholder,
            "Search billboards by label..."
        );
        assert_eq!(
            colors_table_config().search_placeholder,
            "Search colors by name..."
        );
        assert_eq!(
            orders_table_config().search_placeholder,
            "Search orders by product..."
        );
    }

    #[test]
    fn test_orders_table_has_no_actions_column() {
        // Orders are read-only; there is nothing to act on per row.
        let config = orders_table_config();
        assert!(config.columns.iter().all(|c| c.key != "actions"));
    }
}
