use std::sync::Arc;

use stockledger_core::{AppError, AppResult, CategoryId, ItemId, NonEmptyString};
use stockledger_domain::{Category, CategoryUpdate, FieldPatch, Item, ItemUpdate, LogAction};

use crate::inventory_ports::{
    AuditDraft, InventoryRepository, ListQuery, NewCategory, NewItem,
};

/// Application service for category and item mutations and reads.
///
/// Each mutation is validated here, diffed against the stored entity where
/// applicable, and handed to the repository together with its audit draft so
/// both are committed as one unit of work.
#[derive(Clone)]
pub struct InventoryService {
    repository: Arc<dyn InventoryRepository>,
}

impl InventoryService {
    /// Creates a new inventory service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn InventoryRepository>) -> Self {
        Self { repository }
    }

    /// Creates a category and records a `create_category` log row.
    pub async fn create_category(&self, new: NewCategory) -> AppResult<Category> {
        let name = NonEmptyString::new(new.name)?;
        let description = format!("Created Category: {name}");

        self.repository
            .create_category(
                NewCategory {
                    name: name.into(),
                    description: new.description,
                },
                AuditDraft {
                    action: LogAction::CreateCategory,
                    item_id: None,
                    category_id: None,
                    quantity_change: None,
                    description,
                },
            )
            .await
    }

    /// Returns one category or `NotFound`.
    pub async fn get_category(&self, id: CategoryId) -> AppResult<Category> {
        self.repository
            .find_category(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("category '{id}' does not exist")))
    }

    /// Lists categories within the pagination window.
    pub async fn list_categories(&self, query: ListQuery) -> AppResult<Vec<Category>> {
        self.repository.list_categories(query).await
    }

    /// Applies supplied fields to a category.
    ///
    /// When no supplied field differs from the stored value, nothing is
    /// written and no log row is recorded.
    pub async fn update_category(
        &self,
        id: CategoryId,
        update: CategoryUpdate,
    ) -> AppResult<Category> {
        let current = self.get_category(id).await?;
        let plan = current.plan_update(&update)?;

        if plan.changes().is_empty() {
            return Ok(current);
        }

        let (category, changes) = plan.into_parts();
        self.repository
            .update_category(
                category,
                AuditDraft {
                    action: LogAction::UpdateCategory,
                    item_id: None,
                    category_id: Some(id),
                    quantity_change: None,
                    description: changes.describe(),
                },
            )
            .await
    }

    /// Deletes a category and records a `delete_category` log row.
    ///
    /// Deletion is restricted while items still reference the category; the
    /// description captures the name before the row is gone.
    pub async fn delete_category(&self, id: CategoryId) -> AppResult<()> {
        let current = self.get_category(id).await?;

        if self.repository.category_has_items(id).await? {
            return Err(AppError::Conflict(format!(
                "category '{}' still has items and cannot be deleted",
                current.name()
            )));
        }

        self.repository
            .delete_category(
                id,
                AuditDraft {
                    action: LogAction::DeleteCategory,
                    item_id: None,
                    category_id: Some(id),
                    quantity_change: None,
                    description: format!("Deleted Category: {}", current.name()),
                },
            )
            .await
    }

    /// Creates an item and records a `create_item` log row.
    pub async fn create_item(&self, new: NewItem) -> AppResult<Item> {
        let name = NonEmptyString::new(new.name)?;
        Item::validate_quantity(new.quantity)?;
        self.require_category_exists(new.category_id).await?;

        let description = format!("Created Item: {name}");
        self.repository
            .create_item(
                NewItem {
                    name: name.into(),
                    description: new.description,
                    quantity: new.quantity,
                    category_id: new.category_id,
                },
                AuditDraft {
                    action: LogAction::CreateItem,
                    item_id: None,
                    category_id: Some(new.category_id),
                    quantity_change: None,
                    description,
                },
            )
            .await
    }

    /// Returns one item or `NotFound`.
    pub async fn get_item(&self, id: ItemId) -> AppResult<Item> {
        self.repository
            .find_item(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("item '{id}' does not exist")))
    }

    /// Lists items within the pagination window.
    pub async fn list_items(&self, query: ListQuery) -> AppResult<Vec<Item>> {
        self.repository.list_items(query).await
    }

    /// Lists the items belonging to one existing category.
    pub async fn list_items_in_category(&self, category_id: CategoryId) -> AppResult<Vec<Item>> {
        self.require_category_exists(category_id).await?;
        self.repository.list_items_in_category(category_id).await
    }

    /// Finds items whose name or description contains the term.
    pub async fn search_items(&self, term: &str) -> AppResult<Vec<Item>> {
        if term.trim().is_empty() {
            return Err(AppError::Validation(
                "search term must not be empty".to_owned(),
            ));
        }

        self.repository.search_items(term).await
    }

    /// Applies supplied fields to an item.
    ///
    /// A reassigned category is checked for existence before the diff is
    /// computed. When no supplied field differs from the stored value,
    /// nothing is written and no log row is recorded.
    pub async fn update_item(&self, id: ItemId, update: ItemUpdate) -> AppResult<Item> {
        let current = self.get_item(id).await?;

        if let FieldPatch::Set(category_id) = update.category_id {
            self.require_category_exists(category_id).await?;
        }

        let plan = current.plan_update(&update)?;
        if plan.changes().is_empty() {
            return Ok(current);
        }

        let (item, changes, quantity_delta) = plan.into_parts();
        let category_id = item.category_id();
        self.repository
            .update_item(
                item,
                AuditDraft {
                    action: LogAction::UpdateItem,
                    item_id: Some(id),
                    category_id: Some(category_id),
                    quantity_change: quantity_delta,
                    description: changes.describe(),
                },
            )
            .await
    }

    /// Deletes an item and records a `delete_item` log row.
    pub async fn delete_item(&self, id: ItemId) -> AppResult<()> {
        let current = self.get_item(id).await?;

        self.repository
            .delete_item(
                id,
                AuditDraft {
                    action: LogAction::DeleteItem,
                    item_id: Some(id),
                    category_id: Some(current.category_id()),
                    quantity_change: None,
                    description: format!("Deleted Item: {}", current.name()),
                },
            )
            .await
    }

    async fn require_category_exists(&self, id: CategoryId) -> AppResult<()> {
        if self.repository.find_category(id).await?.is_none() {
            return Err(AppError::NotFound(format!("category '{id}' does not exist")));
        }

        Ok(())
    }
}
