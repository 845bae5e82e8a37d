use super::*;

impl PostgresInventoryRepository {
    pub(super) async fn create_item_impl(
        &self,
        new: NewItem,
        audit: AuditDraft,
    ) -> AppResult<Item> {
        let mut transaction = begin(&self.pool, "item create").await?;

        let created = sqlx::query_as::<_, ItemRow>(
            r#"
            INSERT INTO items (name, description, quantity, category_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, quantity, category_id, created_at, updated_at
            "#,
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.quantity)
        .bind(new.category_id.as_i64())
        .fetch_one(&mut *transaction)
        .await
        .map_err(|error| {
            if is_foreign_key_violation(&error) {
                AppError::NotFound(format!(
                    "category '{}' does not exist",
                    new.category_id
                ))
            } else {
                AppError::Storage(format!("failed to create item '{}': {error}", new.name))
            }
        })?;

        insert_log(
            &mut transaction,
            AuditDraft {
                item_id: Some(ItemId::new(created.id)),
                ..audit
            },
        )
        .await?;

        commit(transaction, "item create").await?;
        item_from_row(created)
    }

    pub(super) async fn find_item_impl(&self, id: ItemId) -> AppResult<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, name, description, quantity, category_id, created_at, updated_at
            FROM items
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Storage(format!("failed to load item '{id}': {error}")))?;

        row.map(item_from_row).transpose()
    }

    pub(super) async fn list_items_impl(&self, query: ListQuery) -> AppResult<Vec<Item>> {
        let (limit, offset) = clamp_window(query);
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, name, description, quantity, category_id, created_at, updated_at
            FROM items
            ORDER BY id
            LIMIT $1
            OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Storage(format!("failed to list items: {error}")))?;

        rows.into_iter().map(item_from_row).collect()
    }

    pub(super) async fn list_items_in_category_impl(
        &self,
        category_id: CategoryId,
    ) -> AppResult<Vec<Item>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, name, description, quantity, category_id, created_at, updated_at
            FROM items
            WHERE category_id = $1
            ORDER BY id
            "#,
        )
        .bind(category_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Storage(format!(
                "failed to list items for category '{category_id}': {error}"
            ))
        })?;

        rows.into_iter().map(item_from_row).collect()
    }

    pub(super) async fn search_items_impl(&self, term: &str) -> AppResult<Vec<Item>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, name, description, quantity, category_id, created_at, updated_at
            FROM items
            WHERE name ILIKE $1 OR description ILIKE $1
            ORDER BY id
            "#,
        )
        .bind(like_pattern(term))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Storage(format!("failed to search items: {error}")))?;

        rows.into_iter().map(item_from_row).collect()
    }

    pub(super) async fn update_item_impl(
        &self,
        updated: Item,
        audit: AuditDraft,
    ) -> AppResult<Item> {
        let id = updated.id();
        let mut transaction = begin(&self.pool, "item update").await?;

        let stored = sqlx::query_as::<_, ItemRow>(
            r#"
            UPDATE items
            SET name = $2,
                description = $3,
                quantity = $4,
                category_id = $5,
                updated_at = now()
            WHERE id = $1
            RETURNING id, name, description, quantity, category_id, created_at, updated_at
            "#,
        )
        .bind(id.as_i64())
        .bind(updated.name().as_str())
        .bind(updated.description())
        .bind(updated.quantity())
        .bind(updated.category_id().as_i64())
        .fetch_optional(&mut *transaction)
        .await
        .map_err(|error| {
            if is_foreign_key_violation(&error) {
                AppError::NotFound(format!(
                    "category '{}' does not exist",
                    updated.category_id()
                ))
            } else {
                AppError::Storage(format!("failed to update item '{id}': {error}"))
            }
        })?
        .ok_or_else(|| AppError::NotFound(format!("item '{id}' does not exist")))?;

        insert_log(&mut transaction, audit).await?;
        commit(transaction, "item update").await?;
        item_from_row(stored)
    }

    pub(super) async fn delete_item_impl(&self, id: ItemId, audit: AuditDraft) -> AppResult<()> {
        let mut transaction = begin(&self.pool, "item delete").await?;

        let deleted = sqlx::query(
            r#"
            DELETE FROM items
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .execute(&mut *transaction)
        .await
        .map_err(|error| AppError::Storage(format!("failed to delete item '{id}': {error}")))?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("item '{id}' does not exist")));
        }

        insert_log(&mut transaction, audit).await?;
        commit(transaction, "item delete").await
    }
}
