//! Domain entities for the user directory.

pub mod user;

pub use user::{RegisterRequest, User, UserListing};
