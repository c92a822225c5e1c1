//! Batch worker - orchestration layer
//!
//! ## Responsibilities
//!
//! The top of the pipeline: owns the external application handle for the
//! whole run and drives the file loop.
//!
//! 1. **Resource lifecycle**: launch the document service, release it
//!    unconditionally when the run ends, however it ends
//! 2. **Sequential processing**: one file at a time, strictly in input order
//! 3. **Cancellation**: stop requests observed at file boundaries
//! 4. **Reporting**: per-file outcomes while running, one summary at the end
//! 5. **Fatal path**: a launch failure aborts before any file is touched
//!
//! Single-file details are delegated to `file_task`.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{info, warn};

use crate::infrastructure::DocumentService;
use crate::models::{BatchEvent, BatchJob};
use crate::orchestrator::control::{BatchControl, BatchHandle};
use crate::orchestrator::file_task::{self, FileCtx};
use crate::services::{PasswordCache, ProgressReporter};

/// Background worker for one conversion run.
pub struct BatchWorker<S: DocumentService> {
    job: BatchJob,
    service: S,
    reporter: ProgressReporter,
    control: Arc<BatchControl>,
    passwords: PasswordCache,
}

/// Spawns a worker for `job` onto the runtime and returns the controller's
/// handle: the event stream plus stop/answer calls. One handle per run; the
/// caller must not start a second run against the same external application.
pub fn spawn_batch<S>(job: BatchJob, service: S) -> BatchHandle
where
    S: DocumentService + 'static,
    S::Doc: 'static,
{
    let (events, receiver) = mpsc::unbounded_channel();
    let control = Arc::new(BatchControl::new());
    let worker = BatchWorker::new(job, service, events, Arc::clone(&control));
    tokio::spawn(worker.run());
    BatchHandle::new(receiver, control)
}

impl<S: DocumentService> BatchWorker<S> {
    pub fn new(
        job: BatchJob,
        service: S,
        events: UnboundedSender<BatchEvent>,
        control: Arc<BatchControl>,
    ) -> Self {
        let total = job.input_paths.len();
        Self {
            job,
            service,
            reporter: ProgressReporter::new(events, total),
            control,
            passwords: PasswordCache::new(),
        }
    }

    /// Runs the batch to completion. Emits exactly one of batch-summary or
    /// fatal-error, and releases the service on every exit path after a
    /// successful launch.
    pub async fn run(mut self) {
        let total = self.job.input_paths.len();
        if total == 0 {
            self.reporter.finish("No files were selected to process.");
            return;
        }

        log_run_start(total);
        self.reporter.label("Starting the document application...");
        if let Err(e) = self.service.launch().await {
            self.reporter.fatal(format!(
                "A fatal error occurred: {e}. \
                 Ensure the office application is installed and not blocked."
            ));
            return;
        }

        let inputs = self.job.input_paths.clone();
        let output_dir = self.job.output_dir.clone();
        let default_password = self.job.default_password.clone();

        let mut success_count = 0;
        for (index, source) in inputs.iter().enumerate() {
            if self.control.stop_requested() {
                info!("stop requested, ending run after {index} of {total} files");
                break;
            }

            let ctx = FileCtx {
                index,
                source,
                output_dir: output_dir.as_deref(),
                default_password: default_password.as_deref(),
            };
            let outcome = file_task::convert_file(
                &mut self.service,
                &ctx,
                &mut self.passwords,
                &mut self.reporter,
                &self.control,
            )
            .await;

            if outcome.success {
                success_count += 1;
            }
            self.reporter.outcome(outcome);
        }

        self.reporter.finish(format!(
            "Batch complete. {success_count} of {total} files converted successfully."
        ));
        log_run_complete(success_count, total);

        // Scoped acquisition: the external application must never outlive
        // the run.
        if let Err(e) = self.service.quit().await {
            warn!("⚠️ failed to release the document application: {e}");
        }
    }
}

// ========== log helpers ==========

fn log_run_start(total: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 starting batch conversion of {total} file(s)");
    info!("{}", "=".repeat(60));
}

fn log_run_complete(success: usize, total: usize) {
    info!("{}", "─".repeat(60));
    info!("✓ batch finished: {success}/{total} converted");
    info!("{}", "─".repeat(60));
}
