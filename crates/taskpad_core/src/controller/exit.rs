//! Exit-animation sequencing for deferred removals.
//!
//! Removals are not applied to the store until every affected row has
//! finished its exit animation. The barrier here is the explicit
//! completion point for that: one expected signal per row, with a fast
//! path when no rows participate.
//!
//! # Invariants
//! - `CompletionBarrier::wait` with zero expected signals returns
//!   immediately.
//! - A hung-up signal side unblocks the barrier instead of deadlocking.

use crate::model::task::TaskId;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Fires one completion signal per finished row animation.
#[derive(Debug, Clone)]
pub struct CompletionSignal {
    tx: mpsc::UnboundedSender<()>,
}

impl CompletionSignal {
    /// Reports one row as finished.
    pub fn notify(&self) {
        let _ = self.tx.send(());
    }
}

/// Releases a batched mutation once all expected per-row signals arrive.
#[derive(Debug)]
pub struct CompletionBarrier {
    expected: usize,
    rx: mpsc::UnboundedReceiver<()>,
}

impl CompletionBarrier {
    /// Creates a barrier expecting `expected` signals, plus the signal
    /// handle the presentation layer fires from.
    pub fn new(expected: usize) -> (Self, CompletionSignal) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { expected, rx }, CompletionSignal { tx })
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Waits until every expected signal has arrived.
    ///
    /// Zero expected signals return immediately. If every signal handle is
    /// dropped unfired, the wait ends rather than hanging forever.
    pub async fn wait(mut self) {
        let mut seen = 0;
        while seen < self.expected {
            match self.rx.recv().await {
                Some(()) => seen += 1,
                None => break,
            }
        }
    }
}

/// Plays exit animations for the listed rows and resolves once all of
/// them have finished.
#[async_trait]
pub trait ExitAnimator {
    async fn animate_exit(&self, ids: &[TaskId]);
}

/// Headless animator: removals apply immediately.
pub struct NoAnimations;

#[async_trait]
impl ExitAnimator for NoAnimations {
    async fn animate_exit(&self, _ids: &[TaskId]) {}
}

/// One batch of rows leaving the view, handed to the presentation layer.
///
/// The receiver starts the exit animation for every listed row and fires
/// the signal once per row as each animation ends.
#[derive(Debug)]
pub struct ExitBatch {
    pub ids: Vec<TaskId>,
    pub signal: CompletionSignal,
}

/// Channel-backed animator delegating to an external presentation layer.
pub struct ChannelExitAnimator {
    batches: mpsc::UnboundedSender<ExitBatch>,
}

impl ChannelExitAnimator {
    /// Creates the animator plus the receiving end the presentation layer
    /// listens on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ExitBatch>) {
        let (batches, inbox) = mpsc::unbounded_channel();
        (Self { batches }, inbox)
    }
}

#[async_trait]
impl ExitAnimator for ChannelExitAnimator {
    async fn animate_exit(&self, ids: &[TaskId]) {
        if ids.is_empty() {
            return;
        }

        let (barrier, signal) = CompletionBarrier::new(ids.len());
        let batch = ExitBatch {
            ids: ids.to_vec(),
            signal,
        };
        if self.batches.send(batch).is_err() {
            // Presentation side is gone; fall through to the mutation.
            return;
        }
        barrier.wait().await;
    }
}
