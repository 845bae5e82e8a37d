//! Application services and repository ports for Stockledger.

#![forbid(unsafe_code)]

mod audit_log_service;
mod inventory_ports;
mod inventory_service;

pub use audit_log_service::AuditLogService;
pub use inventory_ports::{
    AuditDraft, AuditLogRepository, InventoryRepository, ListQuery, LogEntry, NewCategory, NewItem,
};
pub use inventory_service::InventoryService;
