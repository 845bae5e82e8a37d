mod categories;
mod health;
mod items;
mod logs;

pub use categories::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};
pub use health::HealthResponse;
pub use items::{CreateItemRequest, ItemResponse, UpdateItemRequest};
pub use logs::LogEntryResponse;
