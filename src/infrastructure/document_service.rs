//! External document service contract - infrastructure layer
//!
//! The office application that performs the actual conversion is an
//! out-of-process collaborator. This module defines the narrow capability
//! surface the orchestrator consumes: launch, open (with optional password),
//! inspect/accept revisions, export to PDF, close, quit. Every operation may
//! fail; failures carry the raw diagnostic text of the backing application.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

/// Error raised by the external document application.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The application could not be started or reached at all.
    #[error("failed to launch {app}: {message}")]
    Launch { app: String, message: String },
    /// A document could not be opened (bad password, corrupt file, locked
    /// file, ...). The message is the application's own diagnostic.
    #[error("{message}")]
    Open { path: PathBuf, message: String },
    /// Exporting the open document to PDF failed.
    #[error("export to {path} failed: {message}")]
    Export { path: PathBuf, message: String },
    /// Any other operation on an open document handle failed.
    #[error("{message}")]
    Document { message: String },
}

impl ServiceError {
    /// Whether the diagnostic text signals a password problem.
    ///
    /// The automation layer does not expose a structured error code for this,
    /// so the contract is a case-insensitive substring match on "password".
    pub fn is_password_error(&self) -> bool {
        self.to_string().to_lowercase().contains("password")
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Parameters for opening a source document.
#[derive(Debug, Clone)]
pub struct OpenRequest {
    pub path: PathBuf,
    pub password: Option<String>,
    pub read_only: bool,
    pub add_to_recent: bool,
    pub repair_on_open: bool,
}

impl OpenRequest {
    /// Request with the defaults the batch pipeline uses: read-only, kept out
    /// of the recent-files list, repaired on open, no password.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            password: None,
            read_only: true,
            add_to_recent: false,
            repair_on_open: true,
        }
    }

    pub fn with_password(mut self, password: Option<String>) -> Self {
        self.password = password;
        self
    }
}

/// A single running instance of the external office application.
///
/// The orchestrator is the sole holder for the duration of one run; no
/// concurrent access to the instance is permitted.
#[async_trait]
pub trait DocumentService: Send {
    type Doc: DocumentHandle + Send;

    /// Starts (or connects to) the application, hidden from the user.
    async fn launch(&mut self) -> ServiceResult<()>;

    /// Opens a source document and hands back an exclusive handle to it.
    async fn open(&mut self, request: &OpenRequest) -> ServiceResult<Self::Doc>;

    /// Shuts the application down. Called exactly once per run, on every
    /// exit path after a successful launch.
    async fn quit(&mut self) -> ServiceResult<()>;
}

/// An open document inside the external application.
#[async_trait]
pub trait DocumentHandle: Send {
    /// Number of pending tracked changes in the document.
    async fn revision_count(&mut self) -> ServiceResult<usize>;

    /// Accepts all tracked changes, producing the clean final content.
    async fn accept_all_revisions(&mut self) -> ServiceResult<()>;

    /// Exports the document as PDF to `output`.
    async fn save_as_pdf(&mut self, output: &Path) -> ServiceResult<()>;

    /// Closes the document, discarding any changes made since open.
    async fn close(&mut self) -> ServiceResult<()>;
}
