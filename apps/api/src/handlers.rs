pub mod categories;
pub mod health;
pub mod items;
pub mod logs;
