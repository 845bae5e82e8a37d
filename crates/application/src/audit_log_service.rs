use std::sync::Arc;

use stockledger_core::{AppResult, CategoryId};
use stockledger_domain::LogAction;

use crate::inventory_ports::{AuditLogRepository, LogEntry};

/// Read-only application service over the audit log.
#[derive(Clone)]
pub struct AuditLogService {
    audit_log_repository: Arc<dyn AuditLogRepository>,
}

impl AuditLogService {
    /// Creates a new audit log service from a repository implementation.
    #[must_use]
    pub fn new(audit_log_repository: Arc<dyn AuditLogRepository>) -> Self {
        Self {
            audit_log_repository,
        }
    }

    /// Lists every log row recorded against one category.
    ///
    /// The category itself may no longer exist; log rows outlive their
    /// subjects.
    pub async fn list_for_category(&self, category_id: CategoryId) -> AppResult<Vec<LogEntry>> {
        self.audit_log_repository
            .list_for_category(category_id)
            .await
    }

    /// Lists the `delete_category` rows, recovering the history of
    /// categories that no longer exist.
    pub async fn deleted_category_history(&self) -> AppResult<Vec<LogEntry>> {
        self.audit_log_repository
            .list_for_action(LogAction::DeleteCategory)
            .await
    }
}
