//! In-memory stores for groups and message logs.

pub mod chat_store;
pub mod group_registry;

pub use chat_store::ChatStore;
pub use group_registry::GroupRegistry;
