//! Infrastructure layer: ownership of the external application handle.
//!
//! Holds the scarce resource (the office application instance) and exposes
//! only capabilities: open, export, close, quit. Nothing here knows about
//! batches, prompts, or progress.

pub mod document_service;
pub mod soffice;

pub use document_service::{
    DocumentHandle, DocumentService, OpenRequest, ServiceError, ServiceResult,
};
pub use soffice::SofficeService;
