//! # chathub Users Crate
//!
//! Presence-side stores of the hub: the user directory, the session registry and the
//! handle namespace that users share with groups.
//!
//! ## Architecture
//!
//! - **Entities**: Domain models (User, RegisterRequest)
//! - **Services**: In-memory stores (UserDirectory, ConnectionRegistry, HandleRegistry)
//! - **Types**: Identifiers and errors
//! - **Utils**: Handle normalisation and avatar colours
//!
//! ## Usage
//!
//! ```rust
//! use chathub_users::{HandleRegistry, RegisterRequest, UserDirectory};
//!
//! let mut handles = HandleRegistry::new();
//! let mut directory = UserDirectory::new();
//! let user = directory
//!     .register(&mut handles, RegisterRequest::new("alice@example.com", "Alice"))
//!     .unwrap();
//! assert_eq!(user.username, "@alice");
//! ```

pub mod entities;
pub mod services;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use entities::{RegisterRequest, User, UserListing};
pub use services::{ConnectionRegistry, HandleOwner, HandleRegistry, UserDirectory};
pub use types::{SessionId, UserError, UserId, UserResult};
