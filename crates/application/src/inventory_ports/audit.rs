use async_trait::async_trait;
use chrono::{DateTime, Utc};
use stockledger_core::{AppResult, CategoryId, ItemId, LogId};
use stockledger_domain::LogAction;

/// Audit payload paired with a mutation before either is persisted.
///
/// Subject identifiers that only exist after an insert (the created category
/// or item id) are left unset here; the repository stamps them into the log
/// row inside the same transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditDraft {
    /// Kind of mutation being recorded.
    pub action: LogAction,
    /// Affected item, when the action targets one.
    pub item_id: Option<ItemId>,
    /// Affected or owning category, when known.
    pub category_id: Option<CategoryId>,
    /// Signed quantity delta, set only when an item's quantity changed.
    pub quantity_change: Option<i64>,
    /// Human-readable description of the mutation.
    pub description: String,
}

/// One immutable, committed audit log row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Store-assigned identifier.
    pub id: LogId,
    /// Kind of mutation that was recorded.
    pub action: LogAction,
    /// Affected item, when the action targeted one.
    pub item_id: Option<ItemId>,
    /// Affected or owning category, when one was recorded.
    pub category_id: Option<CategoryId>,
    /// Signed quantity delta, present only for quantity-changing item updates.
    pub quantity_change: Option<i64>,
    /// Human-readable description of the mutation.
    pub description: String,
    /// Time the row was written.
    pub recorded_at: DateTime<Utc>,
}

/// Read-only port over committed audit log rows.
///
/// Log rows are write-once; no update or delete surface exists anywhere in
/// the system. Rows keep referencing their subject after it is deleted.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Lists log rows recorded against one category, oldest first.
    async fn list_for_category(&self, category_id: CategoryId) -> AppResult<Vec<LogEntry>>;

    /// Lists log rows for one action kind, oldest first.
    async fn list_for_action(&self, action: LogAction) -> AppResult<Vec<LogEntry>>;
}
