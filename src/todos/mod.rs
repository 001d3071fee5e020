//! Todo lists, one per user

pub mod api;
pub mod models;
pub mod store;

pub use models::{Todo, TodoRequest};
pub use store::TodoStore;
