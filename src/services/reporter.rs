//! Progress reporter - capability layer
//!
//! Owns the worker's end of the event channel and all progress arithmetic.
//! Each file gets the slice `[i*100/N, (i+1)*100/N)` of the bar; stage ticks
//! land at fixed fractions inside that slice, so the overall value is
//! monotonic non-decreasing across the whole run and hits 100 exactly once,
//! at the end.

use std::path::Path;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info};

use crate::models::{BatchEvent, FileOutcome};

/// Fixed checkpoints inside one file's progress slice, in percent of the
/// slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    FileStart,
    PathResolved,
    Opened,
    PreSave,
    Saved,
}

impl Stage {
    fn fraction(self) -> usize {
        match self {
            Stage::FileStart => 0,
            Stage::PathResolved => 10,
            Stage::Opened => 25,
            Stage::PreSave => 50,
            Stage::Saved => 90,
        }
    }
}

/// Emits progress, labels, outcomes, prompts and the final summary.
///
/// Dropped receivers are tolerated: a controller that went away only mutes
/// the reporting, it never fails the conversion.
pub struct ProgressReporter {
    events: UnboundedSender<BatchEvent>,
    total: usize,
    last_percent: u8,
}

impl ProgressReporter {
    pub fn new(events: UnboundedSender<BatchEvent>, total: usize) -> Self {
        Self {
            events,
            total,
            last_percent: 0,
        }
    }

    pub fn label(&self, text: impl Into<String>) {
        let text = text.into();
        debug!("{text}");
        self.send(BatchEvent::CurrentFile(text));
    }

    /// Announces the file currently being processed and resets progress to
    /// the file's base.
    pub fn file_started(&mut self, index: usize, file_name: &str) {
        self.label(format!(
            "Processing ({}/{}): {}",
            index + 1,
            self.total,
            file_name
        ));
        self.stage(index, Stage::FileStart);
    }

    pub fn stage(&mut self, index: usize, stage: Stage) {
        self.progress(self.percent_for(index, stage));
    }

    pub fn outcome(&self, outcome: FileOutcome) {
        if outcome.success {
            info!("✓ [file {}] {}", outcome.index + 1, outcome.message);
        } else {
            error!("[file {}] {}", outcome.index + 1, outcome.message);
        }
        self.send(BatchEvent::FileFinished(outcome));
    }

    pub fn password_needed(&self, index: usize, path: &Path) {
        self.send(BatchEvent::PasswordNeeded {
            index,
            path: path.to_path_buf(),
        });
    }

    pub fn overwrite_needed(&self, index: usize, output_path: &Path, pdf_name: &str) {
        self.send(BatchEvent::OverwriteNeeded {
            index,
            output_path: output_path.to_path_buf(),
            pdf_name: pdf_name.to_string(),
        });
    }

    /// Final progress tick plus the one-and-only summary event.
    pub fn finish(&mut self, summary: impl Into<String>) {
        let summary = summary.into();
        self.progress(100);
        info!("{summary}");
        self.send(BatchEvent::BatchFinished(summary));
    }

    pub fn fatal(&self, message: impl Into<String>) {
        let message = message.into();
        error!("{message}");
        self.send(BatchEvent::FatalError(message));
    }

    fn percent_for(&self, index: usize, stage: Stage) -> u8 {
        let base = index * 100 / self.total;
        let span = (index + 1) * 100 / self.total - base;
        (base + span * stage.fraction() / 100) as u8
    }

    fn progress(&mut self, percent: u8) {
        // Clamped so a late tick can never walk the bar backwards.
        let percent = percent.max(self.last_percent);
        self.last_percent = percent;
        self.send(BatchEvent::OverallProgress(percent));
    }

    fn send(&self, event: BatchEvent) {
        let _ = self.events.send(event);
    }
}
