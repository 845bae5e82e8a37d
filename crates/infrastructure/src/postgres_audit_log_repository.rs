use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use stockledger_application::{AuditLogRepository, LogEntry};
use stockledger_core::{AppError, AppResult, CategoryId, ItemId, LogId};
use stockledger_domain::LogAction;


/// PostgreSQL-backed read model over committed audit log rows.
#[derive(Clone)]
pub struct PostgresAuditLogRepository {
    pool: PgPool,
}

impl PostgresAuditLogRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct LogRow {
    id: i64,
    action: String,
    item_id: Option<i64>,
    category_id: Option<i64>,
    quantity_change: Option<i64>,
    description: String,
    recorded_at: DateTime<Utc>,
}

fn entry_from_row(row: LogRow) -> AppResult<LogEntry> {
    let action = LogAction::from_str(&row.action).map_err(|_| {
        AppError::Storage(format!(
            "logs row '{}' has unknown action '{}'",
            row.id, row.action
        ))
    })?;

    Ok(LogEntry {
        id: LogId::new(row.id),
        action,
        item_id: row.item_id.map(ItemId::new),
        category_id: row.category_id.map(CategoryId::new),
        quantity_change: row.quantity_change,
        description: row.description,
        recorded_at: row.recorded_at,
    })
}

#[async_trait]
impl AuditLogRepository for PostgresAuditLogRepository {
    async fn list_for_category(&self, category_id: CategoryId) -> AppResult<Vec<LogEntry>> {
        let rows = sqlx::query_as::<_, LogRow>(
            r#"
            SELECT id, action, item_id, category_id, quantity_change, description, recorded_at
            FROM logs
            WHERE category_id = $1
            ORDER BY id
            "#,
        )
        .bind(category_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Storage(format!(
                "failed to list logs for category '{category_id}': {error}"
            ))
        })?;

        rows.into_iter().map(entry_from_row).collect()
    }

    async fn list_for_action(&self, action: LogAction) -> AppResult<Vec<LogEntry>> {
        let rows = sqlx::query_as::<_, LogRow>(
            r#"
            SELECT id, action, item_id, category_id, quantity_change, description, recorded_at
            FROM logs
            WHERE action = $1
            ORDER BY id
            "#,
        )
        .bind(action.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Storage(format!("failed to list logs for action '{action}': {error}"))
        })?;

        rows.into_iter().map(entry_from_row).collect()
    }
}
