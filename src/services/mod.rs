//! Capability layer: single-purpose services the orchestrator composes.

pub mod password_cache;
pub mod reporter;

pub use password_cache::PasswordCache;
pub use reporter::{ProgressReporter, Stage};
