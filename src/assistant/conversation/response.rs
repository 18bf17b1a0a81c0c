//! Worker response handling
//!
//! Handles channel setup, response polling and stale-response filtering.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};

use crate::assistant::conversation::{ConversationStore, GenerationRequest, GenerationResponse};
use crate::assistant::message::Message;

impl ConversationStore {
    /// Set the channel handles for communication with the worker thread
    pub fn set_channels(
        &mut self,
        request_tx: Sender<GenerationRequest>,
        response_rx: Receiver<GenerationResponse>,
    ) {
        self.request_tx = Some(request_tx);
        self.response_rx = Some(response_rx);
    }

    /// Drain the response channel and apply what arrived
    ///
    /// Non-blocking; call it from the event loop. Returns true if the
    /// conversation changed.
    pub fn poll(&mut self) -> bool {
        let mut responses = Vec::new();
        let mut disconnected = false;

        if let Some(ref rx) = self.response_rx {
            loop {
                match rx.try_recv() {
                    Ok(response) => responses.push(response),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                }
            }
        }

        let mut changed = false;
        for response in responses {
            changed |= self.apply_response(response);
        }

        if disconnected {
            log::warn!("Suggestion worker disconnected");
            self.request_tx = None;
            self.response_rx = None;
            if self.is_generating {
                self.finish_with_failure();
                changed = true;
            }
        }

        changed
    }

    /// Apply a single worker response
    ///
    /// Responses whose epoch is not the in-flight one are discarded.
    /// Returns true if the conversation changed.
    pub fn apply_response(&mut self, response: GenerationResponse) -> bool {
        match response {
            GenerationResponse::Complete { epoch, reply } => {
                if !self.is_current(epoch) {
                    log::debug!(
                        "Ignoring stale reply from generation {} (current: {:?})",
                        epoch,
                        self.in_flight_epoch
                    );
                    return false;
                }
                log::debug!(
                    "Generation {} completed with {} blocks",
                    epoch,
                    reply.blocks.len()
                );
                self.finish(Message::assistant(reply.text, reply.blocks));
                true
            }
            GenerationResponse::Failed { epoch, message } => {
                if !self.is_current(epoch) {
                    log::debug!("Ignoring stale failure from generation {}", epoch);
                    return false;
                }
                log::warn!("Generation {} failed: {}", epoch, message);
                self.finish_with_failure();
                true
            }
            GenerationResponse::Cancelled { epoch } => {
                log::debug!("Generation {} cancelled", epoch);
                // A reset already left the generating state; anything else still waits on us
                if !self.is_current(epoch) {
                    return false;
                }
                self.finish_with_failure();
                true
            }
            GenerationResponse::Crashed(error) => {
                log::error!("{}", error);
                if self.is_generating {
                    self.finish_with_failure();
                    return true;
                }
                false
            }
        }
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.in_flight_epoch == Some(epoch)
    }
}
