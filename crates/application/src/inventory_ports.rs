//! Ports between the inventory services and the entity store.

mod audit;
mod inputs;
mod repository;

pub use audit::{AuditDraft, AuditLogRepository, LogEntry};
pub use inputs::{ListQuery, NewCategory, NewItem};
pub use repository::InventoryRepository;
