//! Configuration module for the portfolio analyzer.

pub mod api;
pub mod form;

mod debug; // Private: callers go through the re-export (crate::config::DEBUG_FLAGS)
pub use debug::DEBUG_FLAGS;

// Re-export commonly used items
pub use api::{API, ApiSettings};
pub use form::FORM;
