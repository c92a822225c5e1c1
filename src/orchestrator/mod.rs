//! Orchestration layer: the batch-conversion run itself.
//!
//! ## Module split
//!
//! - `batch_worker` - owns the external application for the run, drives the
//!   file loop, emits the summary, releases the resource
//! - `file_task` - the per-file state machine (overwrite conflict, password
//!   chain, export, unconditional close)
//! - `control` - stop flag and the single-slot question/answer rendezvous
//!   between worker and controller
//!
//! ## Layering
//!
//! ```text
//! batch_worker (Vec<PathBuf>, resource owner)
//!     ↓
//! file_task (one source file)
//!     ↓
//! infrastructure::DocumentService (open / export / close)
//! ```

pub mod batch_worker;
pub mod control;
mod file_task;

pub use batch_worker::{spawn_batch, BatchWorker};
pub use control::{Answer, BatchControl, BatchHandle, QuestionKind};
