//! Internal utilities for the user side of the hub.

pub mod avatar;
pub mod validation;

pub use avatar::color_for;
pub use validation::{clean_handle, default_handle_base, display_handle};
