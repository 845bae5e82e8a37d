use super::*;

impl PostgresInventoryRepository {
    pub(super) async fn create_category_impl(
        &self,
        new: NewCategory,
        audit: AuditDraft,
    ) -> AppResult<Category> {
        let mut transaction = begin(&self.pool, "category create").await?;

        let created = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(&new.name)
        .bind(&new.description)
        .fetch_one(&mut *transaction)
        .await
        .map_err(|error| {
            if is_unique_violation(&error) {
                AppError::Conflict(format!("category '{}' already exists", new.name))
            } else {
                AppError::Storage(format!("failed to create category '{}': {error}", new.name))
            }
        })?;

        insert_log(
            &mut transaction,
            AuditDraft {
                category_id: Some(CategoryId::new(created.id)),
                ..audit
            },
        )
        .await?;

        commit(transaction, "category create").await?;
        category_from_row(created)
    }

    pub(super) async fn find_category_impl(&self, id: CategoryId) -> AppResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, description, created_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Storage(format!("failed to load category '{id}': {error}")))?;

        row.map(category_from_row).transpose()
    }

    pub(super) async fn list_categories_impl(&self, query: ListQuery) -> AppResult<Vec<Category>> {
        let (limit, offset) = clamp_window(query);
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, description, created_at
            FROM categories
            ORDER BY id
            LIMIT $1
            OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Storage(format!("failed to list categories: {error}")))?;

        rows.into_iter().map(category_from_row).collect()
    }

    pub(super) async fn update_category_impl(
        &self,
        updated: Category,
        audit: AuditDraft,
    ) -> AppResult<Category> {
        let id = updated.id();
        let mut transaction = begin(&self.pool, "category update").await?;

        let stored = sqlx::query_as::<_, CategoryRow>(
            r#"
            UPDATE categories
            SET name = $2,
                description = $3
            WHERE id = $1
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(id.as_i64())
        .bind(updated.name().as_str())
        .bind(updated.description())
        .fetch_optional(&mut *transaction)
        .await
        .map_err(|error| {
            if is_unique_violation(&error) {
                AppError::Conflict(format!(
                    "category '{}' already exists",
                    updated.name().as_str()
                ))
            } else {
                AppError::Storage(format!("failed to update category '{id}': {error}"))
            }
        })?
        .ok_or_else(|| AppError::NotFound(format!("category '{id}' does not exist")))?;

        insert_log(&mut transaction, audit).await?;
        commit(transaction, "category update").await?;
        category_from_row(stored)
    }

    pub(super) async fn delete_category_impl(
        &self,
        id: CategoryId,
        audit: AuditDraft,
    ) -> AppResult<()> {
        let mut transaction = begin(&self.pool, "category delete").await?;

        let deleted = sqlx::query(
            r#"
            DELETE FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .execute(&mut *transaction)
        .await
        .map_err(|error| {
            if is_foreign_key_violation(&error) {
                AppError::Conflict(format!(
                    "category '{id}' still has items and cannot be deleted"
                ))
            } else {
                AppError::Storage(format!("failed to delete category '{id}': {error}"))
            }
        })?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("category '{id}' does not exist")));
        }

        insert_log(&mut transaction, audit).await?;
        commit(transaction, "category delete").await
    }

    pub(super) async fn category_has_items_impl(&self, id: CategoryId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM items
                WHERE category_id = $1
            )
            "#,
        )
        .bind(id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Storage(format!(
                "failed to check items for category '{id}': {error}"
            ))
        })
    }
}
