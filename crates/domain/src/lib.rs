//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod audit;
mod category;
mod change;
mod item;

pub use audit::LogAction;
pub use category::{Category, CategoryUpdate, CategoryUpdatePlan};
pub use change::{ChangeSet, FieldChange, FieldPatch};
pub use item::{Item, ItemUpdate, ItemUpdatePlan};
