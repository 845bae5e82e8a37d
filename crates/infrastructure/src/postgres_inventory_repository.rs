use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use stockledger_application::{
    AuditDraft, InventoryRepository, ListQuery, NewCategory, NewItem,
};
use stockledger_core::{AppError, AppResult, CategoryId, ItemId};
use stockledger_domain::{Category, Item};

mod categories;
mod items;

#[cfg(test)]
mod tests;

/// PostgreSQL-backed repository for category and item persistence.
///
/// Every mutation writes the entity change and its audit log row inside one
/// transaction, so neither can commit without the other.
#[derive(Clone)]
pub struct PostgresInventoryRepository {
    pool: PgPool,
}

impl PostgresInventoryRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

fn category_from_row(row: CategoryRow) -> AppResult<Category> {
    Category::new(
        CategoryId::new(row.id),
        row.name,
        row.description,
        row.created_at,
    )
}

#[derive(Debug, FromRow)]
struct ItemRow {
    id: i64,
    name: String,
    description: String,
    quantity: i64,
    category_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn item_from_row(row: ItemRow) -> AppResult<Item> {
    Item::new(
        ItemId::new(row.id),
        row.name,
        row.description,
        row.quantity,
        CategoryId::new(row.category_id),
        row.created_at,
        row.updated_at,
    )
}

async fn begin(pool: &PgPool, operation: &str) -> AppResult<Transaction<'static, Postgres>> {
    pool.begin().await.map_err(|error| {
        AppError::Storage(format!("failed to start {operation} transaction: {error}"))
    })
}

async fn commit(transaction: Transaction<'static, Postgres>, operation: &str) -> AppResult<()> {
    transaction.commit().await.map_err(|error| {
        AppError::Storage(format!("failed to commit {operation} transaction: {error}"))
    })
}

async fn insert_log(
    transaction: &mut Transaction<'static, Postgres>,
    audit: AuditDraft,
) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO logs (action, item_id, category_id, quantity_change, description)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(audit.action.as_str())
    .bind(audit.item_id.map(|id| id.as_i64()))
    .bind(audit.category_id.map(|id| id.as_i64()))
    .bind(audit.quantity_change)
    .bind(&audit.description)
    .execute(&mut **transaction)
    .await
    .map_err(|error| AppError::Storage(format!("failed to append audit log row: {error}")))?;

    tracing::debug!(action = audit.action.as_str(), "appended audit log row");
    Ok(())
}

#[async_trait]
impl InventoryRepository for PostgresInventoryRepository {
    async fn create_category(&self, new: NewCategory, audit: AuditDraft) -> AppResult<Category> {
        self.create_category_impl(new, audit).await
    }

    async fn find_category(&self, id: CategoryId) -> AppResult<Option<Category>> {
        self.find_category_impl(id).await
    }

    async fn list_categories(&self, query: ListQuery) -> AppResult<Vec<Category>> {
        self.list_categories_impl(query).await
    }

    async fn update_category(&self, updated: Category, audit: AuditDraft) -> AppResult<Category> {
        self.update_category_impl(updated, audit).await
    }

    async fn delete_category(&self, id: CategoryId, audit: AuditDraft) -> AppResult<()> {
        self.delete_category_impl(id, audit).await
    }

    async fn category_has_items(&self, id: CategoryId) -> AppResult<bool> {
        self.category_has_items_impl(id).await
    }

    async fn create_item(&self, new: NewItem, audit: AuditDraft) -> AppResult<Item> {
        self.create_item_impl(new, audit).await
    }

    async fn find_item(&self, id: ItemId) -> AppResult<Option<Item>> {
        self.find_item_impl(id).await
    }

    async fn list_items(&self, query: ListQuery) -> AppResult<Vec<Item>> {
        self.list_items_impl(query).await
    }

    async fn list_items_in_category(&self, category_id: CategoryId) -> AppResult<Vec<Item>> {
        self.list_items_in_category_impl(category_id).await
    }

    async fn search_items(&self, term: &str) -> AppResult<Vec<Item>> {
        self.search_items_impl(term).await
    }

    async fn update_item(&self, updated: Item, audit: AuditDraft) -> AppResult<Item> {
        self.update_item_impl(updated, audit).await
    }

    async fn delete_item(&self, id: ItemId, audit: AuditDraft) -> AppResult<()> {
        self.delete_item_impl(id, audit).await
    }
}

fn clamp_window(query: ListQuery) -> (i64, i64) {
    let limit = query.limit.clamp(1, 200) as i64;
    let offset = query.skip.min(5_000) as i64;
    (limit, offset)
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .is_some_and(|database_error| database_error.is_unique_violation())
}

fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .is_some_and(|database_error| database_error.is_foreign_key_violation())
}

fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
