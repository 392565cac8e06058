//! Core types - pure abstractions shared across the codebase.

mod category;
mod state;

pub use category::FileCategory;
pub use state::{is_shutdown, setup_shutdown_handler};
