//! In-memory stores owned by the messaging engine.

pub mod directory;
pub mod handles;
pub mod sessions;

pub use directory::UserDirectory;
pub use handles::{HandleOwner, HandleRegistry};
pub use sessions::ConnectionRegistry;
