//! Stop and question/answer control plane - orchestration layer
//!
//! The worker and its controller live on different tasks. Two question types
//! (password, overwrite) share one rendezvous pattern: the worker registers a
//! pending question, publishes an event, then blocks on a oneshot until the
//! controller answers or the run is stopped. One slot, so at most one
//! question is outstanding per run, and answers are idempotent-once: a late
//! or duplicate answer, or an answer of the wrong kind, is a no-op.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc::UnboundedReceiver, oneshot};
use tracing::debug;

use crate::models::{BatchEvent, OverwriteChoice};

/// What kind of input the worker is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Password,
    Overwrite,
}

/// Controller's reply to a pending question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// `None` means the prompt was cancelled.
    Password(Option<String>),
    Overwrite(OverwriteChoice),
    /// The run was stopped while the question was pending.
    Aborted,
}

struct PendingQuestion {
    kind: QuestionKind,
    tx: oneshot::Sender<Answer>,
}

/// Shared control surface for one batch run.
///
/// Held by both sides: the worker registers questions and polls the stop
/// flag; the controller answers and stops.
pub struct BatchControl {
    stop: AtomicBool,
    pending: Mutex<Option<PendingQuestion>>,
}

impl BatchControl {
    pub(crate) fn new() -> Self {
        Self {
            stop: AtomicBool::new(false),
            pending: Mutex::new(None),
        }
    }

    /// Requests the run to stop. Observed at the next file boundary; if the
    /// worker is suspended on a question, the wait is woken immediately.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
        // Dropping the sender resolves the worker's wait as Aborted.
        let _ = self.pending.lock().map(|mut slot| slot.take());
    }

    pub fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    /// Resolves a pending password question. No-op unless a password
    /// question is actually outstanding.
    pub fn answer_password(&self, password: Option<String>) {
        self.resolve(QuestionKind::Password, Answer::Password(password));
    }

    /// Resolves a pending overwrite question. No-op unless an overwrite
    /// question is actually outstanding.
    pub fn answer_overwrite(&self, choice: OverwriteChoice) {
        self.resolve(QuestionKind::Overwrite, Answer::Overwrite(choice));
    }

    fn resolve(&self, kind: QuestionKind, answer: Answer) {
        let Ok(mut slot) = self.pending.lock() else {
            return;
        };
        match slot.as_ref() {
            Some(pending) if pending.kind == kind => {
                if let Some(pending) = slot.take() {
                    let _ = pending.tx.send(answer);
                }
            }
            _ => debug!("ignoring answer for {kind:?}: no such question pending"),
        }
    }

    /// Worker side: registers the question and hands back the wait half.
    ///
    /// The slot is filled before the corresponding event is published, so an
    /// answer can never race past the registration.
    pub(crate) fn begin_question(&self, kind: QuestionKind) -> PendingAnswer {
        if self.stop_requested() {
            return PendingAnswer::Aborted;
        }
        let (tx, rx) = oneshot::channel();
        match self.pending.lock() {
            Ok(mut slot) => {
                *slot = Some(PendingQuestion { kind, tx });
                PendingAnswer::Waiting(rx)
            }
            Err(_) => PendingAnswer::Aborted,
        }
    }
}

/// Worker-side wait handle for one question.
pub(crate) enum PendingAnswer {
    Aborted,
    Waiting(oneshot::Receiver<Answer>),
}

impl PendingAnswer {
    /// Suspends until the controller answers or the run is stopped.
    pub(crate) async fn wait(self) -> Answer {
        match self {
            PendingAnswer::Aborted => Answer::Aborted,
            PendingAnswer::Waiting(rx) => rx.await.unwrap_or(Answer::Aborted),
        }
    }
}

/// Controller's grip on a spawned batch run: the event stream plus the
/// control surface.
pub struct BatchHandle {
    events: UnboundedReceiver<BatchEvent>,
    control: Arc<BatchControl>,
}

impl BatchHandle {
    pub(crate) fn new(events: UnboundedReceiver<BatchEvent>, control: Arc<BatchControl>) -> Self {
        Self { events, control }
    }

    /// Next event from the worker; `None` once the worker is done and the
    /// channel has drained.
    pub async fn next_event(&mut self) -> Option<BatchEvent> {
        self.events.recv().await
    }

    pub fn control(&self) -> Arc<BatchControl> {
        Arc::clone(&self.control)
    }

    pub fn stop(&self) {
        self.control.stop();
    }

    pub fn answer_password(&self, password: Option<String>) {
        self.control.answer_password(password);
    }

    pub fn answer_overwrite(&self, choice: OverwriteChoice) {
        self.control.answer_overwrite(choice);
    }
}
