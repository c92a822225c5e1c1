//! Single-file conversion task - orchestration layer
//!
//! The per-file state machine: resolve the output path, settle an overwrite
//! conflict, open the document through the password candidate chain (with one
//! interactive prompt as the last resort), accept tracked changes, export,
//! and always close the handle once one exists. Every path out of here
//! produces exactly one `FileOutcome`.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::FileError;
use crate::infrastructure::{DocumentHandle, DocumentService, OpenRequest, ServiceResult};
use crate::models::{resolve_output_path, FileOutcome, OverwriteChoice};
use crate::orchestrator::control::{Answer, BatchControl, QuestionKind};
use crate::services::{PasswordCache, ProgressReporter, Stage};

/// Per-file slice of the batch context.
pub(crate) struct FileCtx<'a> {
    pub index: usize,
    pub source: &'a Path,
    pub output_dir: Option<&'a Path>,
    pub default_password: Option<&'a str>,
}

/// Runs one file through the state machine to its terminal outcome.
pub(crate) async fn convert_file<S: DocumentService>(
    service: &mut S,
    ctx: &FileCtx<'_>,
    passwords: &mut PasswordCache,
    reporter: &mut ProgressReporter,
    control: &BatchControl,
) -> FileOutcome {
    let file_name = ctx
        .source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| ctx.source.display().to_string());
    reporter.file_started(ctx.index, &file_name);

    let source = absolute(ctx.source);
    let (output_path, pdf_name) = resolve_output_path(ctx.source, ctx.output_dir);
    reporter.stage(ctx.index, Stage::PathResolved);

    // Overwrite conflict: a user decision, not an error.
    if output_path.exists() {
        let wait = control.begin_question(QuestionKind::Overwrite);
        reporter.overwrite_needed(ctx.index, &output_path, &pdf_name);
        match wait.wait().await {
            Answer::Overwrite(OverwriteChoice::Yes) => {
                if let Err(e) = std::fs::remove_file(&output_path) {
                    // Surfaced as its own outcome instead of bleeding into
                    // the open/export error paths.
                    return FileOutcome::error(
                        ctx.index,
                        FileError::delete_failed(&output_path, e),
                    );
                }
                debug!("removed existing output {}", output_path.display());
            }
            _ => {
                return FileOutcome::skipped(ctx.index, "user chose not to overwrite");
            }
        }
    }

    // Candidate chain: no password, then the run default, then the password
    // cached for this exact path. First success wins.
    let mut document = None;
    let mut last_error = None;
    for password in passwords.candidates(&source, ctx.default_password) {
        let request = OpenRequest::new(&source).with_password(password);
        match service.open(&request).await {
            Ok(doc) => {
                document = Some(doc);
                break;
            }
            Err(e) => last_error = Some(e),
        }
    }

    let mut document = match document {
        Some(doc) => doc,
        None => {
            let Some(error) = last_error else {
                return FileOutcome::error(ctx.index, "no open attempt was made");
            };
            if !error.is_password_error() {
                return FileOutcome::error(ctx.index, error);
            }

            // Password problem: suspend for exactly one prompt.
            let wait = control.begin_question(QuestionKind::Password);
            reporter.password_needed(ctx.index, &source);
            let prompted = match wait.wait().await {
                Answer::Password(Some(password)) if !password.is_empty() => password,
                _ => return FileOutcome::skipped(ctx.index, "password required"),
            };

            let request = OpenRequest::new(&source).with_password(Some(prompted.clone()));
            match service.open(&request).await {
                Ok(doc) => {
                    passwords.store(&source, prompted);
                    doc
                }
                Err(e) => return FileOutcome::error(ctx.index, e),
            }
        }
    };
    reporter.stage(ctx.index, Stage::Opened);

    let exported = export_document(&mut document, ctx.index, &output_path, reporter).await;

    // Cleanup that must run on every path once a handle exists.
    if let Err(e) = document.close().await {
        warn!("[file {}] close failed: {e}", ctx.index + 1);
    }

    match exported {
        Ok(()) => FileOutcome::converted(ctx.index),
        Err(e) => FileOutcome::error(ctx.index, e),
    }
}

/// Accept pending tracked changes, then export as PDF.
async fn export_document<D: DocumentHandle>(
    document: &mut D,
    index: usize,
    output_path: &Path,
    reporter: &mut ProgressReporter,
) -> ServiceResult<()> {
    if document.revision_count().await? > 0 {
        debug!("[file {}] accepting tracked changes", index + 1);
        document.accept_all_revisions().await?;
    }
    reporter.stage(index, Stage::PreSave);

    document.save_as_pdf(output_path).await?;
    reporter.stage(index, Stage::Saved);
    Ok(())
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
