//! Conversation lifecycle
//!
//! Handles creation, submission and reset.

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::assistant::conversation::{
    ConversationSnapshot, ConversationStore, FAILURE_TEXT, GenerationRequest,
};
use crate::assistant::message::Message;

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationStore {
    /// Create a store seeded with the welcome message and no worker attached
    pub fn new() -> Self {
        let messages = vec![Message::welcome()];
        let (snapshot_tx, _) = watch::channel(ConversationSnapshot {
            messages: messages.clone(),
            is_generating: false,
        });
        Self {
            messages,
            is_generating: false,
            epoch: 0,
            in_flight_epoch: None,
            current_cancel_token: None,
            request_tx: None,
            response_rx: None,
            snapshot_tx,
        }
    }

    /// Submit a user utterance
    ///
    /// Blank utterances and submissions while a reply is being generated are
    /// ignored and return false. Otherwise the trimmed text is appended as a
    /// user message and a generation request is handed to the worker; this
    /// never waits for the reply.
    pub fn submit(&mut self, utterance: &str) -> bool {
        let utterance = utterance.trim();
        if utterance.is_empty() || self.is_generating {
            #[cfg(debug_assertions)]
            log::debug!(
                "Ignoring submission (blank={}, generating={})",
                utterance.is_empty(),
                self.is_generating
            );
            return false;
        }

        self.messages.push(Message::user(utterance));
        self.is_generating = true;
        self.epoch = self.epoch.wrapping_add(1);
        let epoch = self.epoch;
        self.in_flight_epoch = Some(epoch);

        let cancel_token = CancellationToken::new();
        let request = GenerationRequest::Generate {
            utterance: utterance.to_string(),
            history: self.messages.clone(),
            epoch,
            cancel_token: cancel_token.clone(),
        };

        let sent = match self.request_tx {
            Some(ref tx) => tx.send(request).is_ok(),
            None => false,
        };

        if sent {
            log::debug!("Dispatched generation {}", epoch);
            self.current_cancel_token = Some(cancel_token);
            self.notify();
        } else {
            log::warn!("No suggestion worker available for generation {}", epoch);
            self.finish_with_failure();
        }
        true
    }

    /// Restore the conversation to its seed state
    ///
    /// Cancels the in-flight generation, if any, and advances the epoch so a
    /// late reply for it is discarded.
    pub fn reset(&mut self) {
        if let Some(token) = self.current_cancel_token.take() {
            log::debug!("Cancelling in-flight generation {:?}", self.in_flight_epoch);
            token.cancel();
        }
        self.epoch = self.epoch.wrapping_add(1);
        self.in_flight_epoch = None;
        self.is_generating = false;
        self.messages = vec![Message::welcome()];
        self.notify();
    }

    /// Append the failure reply and leave the generating state
    pub(super) fn finish_with_failure(&mut self) {
        self.finish(Message::assistant(FAILURE_TEXT, Vec::new()));
    }

    /// Append the reply for the in-flight generation and leave the generating state
    pub(super) fn finish(&mut self, reply: Message) {
        self.messages.push(reply);
        self.is_generating = false;
        self.in_flight_epoch = None;
        self.current_cancel_token = None;
        self.notify();
    }
}
