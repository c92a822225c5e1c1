//! Batch run inputs and per-file results.

use std::path::{Path, PathBuf};

/// Everything one conversion run needs, fixed at start.
///
/// The input order is preserved; files are processed strictly in the order
/// they appear here. Duplicate paths are allowed.
#[derive(Debug, Clone)]
pub struct BatchJob {
    /// Source documents, in processing order.
    pub input_paths: Vec<PathBuf>,
    /// Target directory for the PDFs. `None` means "beside the source file".
    pub output_dir: Option<PathBuf>,
    /// Password tried for every protected document before prompting.
    pub default_password: Option<String>,
}

impl BatchJob {
    pub fn new(input_paths: Vec<PathBuf>) -> Self {
        Self {
            input_paths,
            output_dir: None,
            default_password: None,
        }
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_default_password(mut self, password: Option<String>) -> Self {
        self.default_password = password;
        self
    }
}

/// Terminal result for one file of the batch.
///
/// Exactly one outcome is emitted per file that reaches a terminal state
/// (converted, skipped, or errored).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// Position of the file in the batch input list.
    pub index: usize,
    /// Human-readable status line, shown next to the file in the UI.
    pub message: String,
    pub success: bool,
}

impl FileOutcome {
    pub fn converted(index: usize) -> Self {
        Self {
            index,
            message: "Converted".to_string(),
            success: true,
        }
    }

    pub fn skipped(index: usize, reason: &str) -> Self {
        Self {
            index,
            message: format!("Skipped ({reason})"),
            success: false,
        }
    }

    pub fn error(index: usize, diagnostic: impl std::fmt::Display) -> Self {
        Self {
            index,
            message: format!("Error: {diagnostic}"),
            success: false,
        }
    }
}

/// Derives where the PDF for `source` goes. Pure, no I/O.
///
/// With an explicit output directory the file stem gets its spaces replaced
/// by underscores; without one the PDF lands beside the source under the
/// original stem. Returns the full output path and the display name shown to
/// the user in prompts.
pub fn resolve_output_path(source: &Path, output_dir: Option<&Path>) -> (PathBuf, String) {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    match output_dir {
        Some(dir) => {
            let pdf_name = format!("{}_converted.pdf", stem.replace(' ', "_"));
            (dir.join(&pdf_name), pdf_name)
        }
        None => {
            let pdf_name = format!("{stem}_converted.pdf");
            let full = match source.parent() {
                Some(parent) => parent.join(&pdf_name),
                None => PathBuf::from(&pdf_name),
            };
            (full, pdf_name)
        }
    }
}
