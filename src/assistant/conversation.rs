//! Conversation state management
//!
//! Owns the message log and the "reply is being generated" flag, and the
//! channel handles for talking to the suggestion worker thread.
//!
//! Every generation is tagged with an epoch. Submitting and resetting both
//! advance it, and a worker response is applied only when its epoch is the
//! one currently in flight. That is what keeps a reply from reappearing after
//! the user reset the conversation.

use std::sync::mpsc::{Receiver, Sender};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use super::engine::{EngineError, Reply};
use super::message::Message;

mod lifecycle;
mod response;

/// Assistant text shown when a generation fails for any reason
pub const FAILURE_TEXT: &str = "I couldn't generate a suggestion, please try again.";

/// Request messages sent to the suggestion worker thread
#[derive(Debug)]
pub enum GenerationRequest {
    Generate {
        utterance: String,
        /// Copy of the message log at submission time, including the utterance
        history: Vec<Message>,
        /// Generation epoch, used to filter stale responses
        epoch: u64,
        /// Cancelled when the conversation is reset
        cancel_token: CancellationToken,
    },
}

/// Response messages received from the suggestion worker thread
#[derive(Debug)]
pub enum GenerationResponse {
    /// The engine produced a reply
    Complete { epoch: u64, reply: Reply },
    /// The engine failed
    Failed { epoch: u64, message: String },
    /// The request was cancelled before the engine resolved
    Cancelled { epoch: u64 },
    /// The worker crashed; not tied to any epoch
    Crashed(EngineError),
}

/// Immutable view of the conversation, handed to observers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSnapshot {
    pub messages: Vec<Message>,
    pub is_generating: bool,
}

/// Conversation store
pub struct ConversationStore {
    /// Append-only message log, in creation order
    messages: Vec<Message>,
    /// True between a submission and the appending of its reply
    is_generating: bool,
    /// Current generation epoch
    epoch: u64,
    /// Epoch of the request awaiting a reply, if any
    in_flight_epoch: Option<u64>,
    /// Token for the in-flight request, cancelled on reset
    current_cancel_token: Option<CancellationToken>,
    /// Channel to send requests to the worker thread
    request_tx: Option<Sender<GenerationRequest>>,
    /// Channel to receive responses from the worker thread
    response_rx: Option<Receiver<GenerationResponse>>,
    /// Publishes a fresh snapshot after every change
    snapshot_tx: watch::Sender<ConversationSnapshot>,
}

impl ConversationStore {
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    /// Current generation epoch
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether a worker is attached
    pub fn has_worker(&self) -> bool {
        self.request_tx.is_some()
    }

    pub fn find_message(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> ConversationSnapshot {
        ConversationSnapshot {
            messages: self.messages.clone(),
            is_generating: self.is_generating,
        }
    }

    /// Receiver that observes a new snapshot after every state change
    pub fn subscribe(&self) -> watch::Receiver<ConversationSnapshot> {
        self.snapshot_tx.subscribe()
    }

    fn notify(&self) {
        self.snapshot_tx.send_replace(self.snapshot());
    }
}

#[cfg(test)]
#[path = "conversation_tests.rs"]
mod conversation_tests;
