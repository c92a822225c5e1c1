//! Events published by the batch worker to its controller.

use std::path::PathBuf;

use crate::models::batch::FileOutcome;

/// Controller decision for a pre-existing output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteChoice {
    Yes,
    No,
}

/// One message on the worker → controller reporting channel.
///
/// Ordering guarantees per run: `OverallProgress` values never decrease,
/// `FileFinished` fires exactly once per processed index, and exactly one of
/// `BatchFinished` / `FatalError` terminates the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    /// Coarse progress for the whole run, 0–100.
    OverallProgress(u8),
    /// Label describing what the worker is doing right now.
    CurrentFile(String),
    /// Terminal result for one file.
    FileFinished(FileOutcome),
    /// Aggregate summary, emitted once after the last file.
    BatchFinished(String),
    /// The run could not start at all; no outcomes were or will be emitted.
    FatalError(String),
    /// The worker is suspended until `answer_password` is called.
    PasswordNeeded { index: usize, path: PathBuf },
    /// The worker is suspended until `answer_overwrite` is called.
    OverwriteNeeded {
        index: usize,
        output_path: PathBuf,
        pdf_name: String,
    },
}
