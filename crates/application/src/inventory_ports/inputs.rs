use stockledger_core::CategoryId;

/// Field values for a category to be created.
#[derive(Debug, Clone)]
pub struct NewCategory {
    /// Unique category name.
    pub name: String,
    /// Optional rich-text description.
    pub description: Option<String>,
}

/// Field values for an item to be created.
#[derive(Debug, Clone)]
pub struct NewItem {
    /// Item name.
    pub name: String,
    /// Item description.
    pub description: String,
    /// Initial non-negative quantity.
    pub quantity: i64,
    /// Owning category, validated by the service before the write.
    pub category_id: CategoryId,
}

/// Pagination window for list reads.
#[derive(Debug, Clone, Copy)]
pub struct ListQuery {
    /// Number of leading rows to skip.
    pub skip: usize,
    /// Maximum number of rows to return.
    pub limit: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self { skip: 0, limit: 50 }
    }
}
