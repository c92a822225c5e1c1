//! Data model shared between the orchestrator and its controller.

pub mod batch;
pub mod event;

pub use batch::{resolve_output_path, BatchJob, FileOutcome};
pub use event::{BatchEvent, OverwriteChoice};
