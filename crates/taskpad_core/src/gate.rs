//! Confirmation gate: async yes/no prompt in front of destructive actions.
//!
//! # Responsibility
//! - Suspend a controller flow until the user answers yes or no.
//! - Encode the one-modal-at-a-time constraint as an explicit invariant.
//!
//! # Invariants
//! - At most one confirmation request is in flight per gate.
//! - The only resolutions are yes and no; both arrive after unbounded
//!   wall-clock delay.

use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};
use tokio::sync::{mpsc, oneshot, Mutex};

pub type GateResult<T> = Result<T, GateError>;

/// Failure modes of a confirmation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateError {
    /// A confirmation is already pending; the modal is a single shared
    /// resource.
    Busy,
    /// The presentation side hung up before answering.
    Closed,
}

impl Display for GateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Busy => write!(f, "a confirmation prompt is already pending"),
            Self::Closed => write!(f, "confirmation prompt channel is closed"),
        }
    }
}

impl Error for GateError {}

/// Async yes/no prompt gating destructive or state-changing actions.
#[async_trait]
pub trait ConfirmationGate {
    /// Presents `message` and resolves to the user's answer.
    async fn confirm(&self, message: &str) -> GateResult<bool>;
}

/// One outstanding prompt handed to the presentation layer.
///
/// Dropping the request without answering resolves the caller with
/// `GateError::Closed`.
#[derive(Debug)]
pub struct ConfirmationRequest {
    message: String,
    respond: oneshot::Sender<bool>,
}

impl ConfirmationRequest {
    /// Message to show in the modal.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Resolves the prompt with the user's decision.
    pub fn answer(self, yes: bool) {
        let _ = self.respond.send(yes);
    }
}

/// Channel-backed gate implementation.
///
/// Requests are delivered to the presentation layer over an mpsc channel;
/// each carries its own oneshot responder. A `try_lock` on the in-flight
/// slot makes a second concurrent `confirm` fail fast with `Busy` instead
/// of queueing.
pub struct ChannelConfirmationGate {
    requests: mpsc::Sender<ConfirmationRequest>,
    in_flight: Mutex<()>,
}

impl ChannelConfirmationGate {
    /// Creates the gate plus the receiving end the presentation layer
    /// listens on.
    pub fn new() -> (Self, mpsc::Receiver<ConfirmationRequest>) {
        let (requests, inbox) = mpsc::channel(1);
        (
            Self {
                requests,
                in_flight: Mutex::new(()),
            },
            inbox,
        )
    }
}

#[async_trait]
impl ConfirmationGate for ChannelConfirmationGate {
    async fn confirm(&self, message: &str) -> GateResult<bool> {
        let _slot = self.in_flight.try_lock().map_err(|_| GateError::Busy)?;

        let (respond, answer) = oneshot::channel();
        self.requests
            .send(ConfirmationRequest {
                message: message.to_string(),
                respond,
            })
            .await
            .map_err(|_| GateError::Closed)?;

        answer.await.map_err(|_| GateError::Closed)
    }
}
