use async_trait::async_trait;
use stockledger_core::{AppResult, CategoryId, ItemId};
use stockledger_domain::{Category, Item};

use super::audit::AuditDraft;
use super::inputs::{ListQuery, NewCategory, NewItem};

/// Port for category and item persistence.
///
/// Every mutating method takes the [`AuditDraft`] for the mutation and must
/// commit the entity write and its log row in one unit of work: a failure of
/// either rolls back both. A log row must never exist for a mutation that did
/// not commit, and a mutation must never commit without its log row.
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Creates a category and its log row; the generated category id is
    /// stamped into the log row.
    async fn create_category(&self, new: NewCategory, audit: AuditDraft) -> AppResult<Category>;

    /// Looks up a category by id.
    async fn find_category(&self, id: CategoryId) -> AppResult<Option<Category>>;

    /// Lists categories ordered by id.
    async fn list_categories(&self, query: ListQuery) -> AppResult<Vec<Category>>;

    /// Persists already-planned category field values and the log row.
    async fn update_category(&self, updated: Category, audit: AuditDraft) -> AppResult<Category>;

    /// Deletes a category and writes its log row.
    async fn delete_category(&self, id: CategoryId, audit: AuditDraft) -> AppResult<()>;

    /// Returns true while at least one item references the category.
    async fn category_has_items(&self, id: CategoryId) -> AppResult<bool>;

    /// Creates an item and its log row; the generated item id is stamped
    /// into the log row.
    async fn create_item(&self, new: NewItem, audit: AuditDraft) -> AppResult<Item>;

    /// Looks up an item by id.
    async fn find_item(&self, id: ItemId) -> AppResult<Option<Item>>;

    /// Lists items ordered by id.
    async fn list_items(&self, query: ListQuery) -> AppResult<Vec<Item>>;

    /// Lists the items belonging to one category.
    async fn list_items_in_category(&self, category_id: CategoryId) -> AppResult<Vec<Item>>;

    /// Finds items whose name or description contains the term,
    /// case-insensitively.
    async fn search_items(&self, term: &str) -> AppResult<Vec<Item>>;

    /// Persists already-planned item field values, refreshes `updated_at`,
    /// and writes the log row.
    async fn update_item(&self, updated: Item, audit: AuditDraft) -> AppResult<Item>;

    /// Deletes an item and writes its log row.
    async fn delete_item(&self, id: ItemId, audit: AuditDraft) -> AppResult<()>;
}
