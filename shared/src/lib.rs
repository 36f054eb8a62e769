//! Job Board Shared Library
//!
//! This crate contains shared types, models, and utilities used by the
//! backend service and its clients.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::UserRole;
pub use types::*;
