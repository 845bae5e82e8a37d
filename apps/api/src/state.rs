use stockledger_application::{AuditLogService, InventoryService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub inventory_service: InventoryService,
    pub audit_log_service: AuditLogService,
}
