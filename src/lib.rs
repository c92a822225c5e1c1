//! # word2pdf-batch
//!
//! Batch conversion of Word documents to PDF by driving a locally installed
//! office application through its automation interface.
//!
//! ## Architecture
//!
//! The crate is layered strictly, leaf-first:
//!
//! ### ① Infrastructure
//! - `infrastructure/` - owns the scarce resource (the external office
//!   application) and exposes only capabilities
//! - `DocumentService` / `DocumentHandle` - the collaborator contract:
//!   launch, open (with optional password), accept revisions, export, close,
//!   quit
//! - `SofficeService` - headless LibreOffice backend for the CLI
//!
//! ### ② Services
//! - `services/` - single-purpose capabilities, no flow control
//! - `PasswordCache` - per-path password store and the ordered candidate
//!   chain for open attempts
//! - `ProgressReporter` - event emission and monotonic progress arithmetic
//!
//! ### ③ Orchestration
//! - `orchestrator/batch_worker` - one background worker per run: sequential
//!   file loop, resource lifecycle, summary
//! - `orchestrator/file_task` - the per-file state machine
//! - `orchestrator/control` - stop flag plus the single-slot question/answer
//!   rendezvous with the controller
//!
//! The controller (CLI, GUI, test harness) consumes `BatchEvent`s from a
//! `BatchHandle` and feeds answers back through it; the worker suspends on
//! password and overwrite questions without ever blocking the controller.

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// Re-export the common surface.
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{
    DocumentHandle, DocumentService, OpenRequest, ServiceError, ServiceResult, SofficeService,
};
pub use models::{resolve_output_path, BatchEvent, BatchJob, FileOutcome, OverwriteChoice};
pub use orchestrator::{spawn_batch, BatchControl, BatchHandle, BatchWorker};
