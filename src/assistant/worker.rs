//! Suggestion worker thread
//!
//! Runs the suggestion engine off the UI thread. Receives requests via
//! channel, awaits the engine on a single-threaded tokio runtime and sends the
//! outcome back tagged with the request's epoch.
//!
//! Engine panics are caught and reported as a crash response so the UI never
//! waits on a reply that will not come.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::conversation::{GenerationRequest, GenerationResponse};
use super::engine::{EngineError, SuggestionEngine};
use super::message::Message;

/// Spawn the suggestion worker thread
///
/// # Arguments
/// * `engine` - The engine, or the configuration error that prevented building it
/// * `timeout` - Optional upper bound on each generation
/// * `request_rx` - Channel to receive requests from the UI thread
/// * `response_tx` - Channel to send responses to the UI thread
pub fn spawn_worker(
    engine: Result<Box<dyn SuggestionEngine>, EngineError>,
    timeout: Option<Duration>,
    request_rx: Receiver<GenerationRequest>,
    response_tx: Sender<GenerationResponse>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let crash_tx = response_tx.clone();

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("Failed to create tokio runtime: {}", e);
                    let _ = response_tx.send(GenerationResponse::Crashed(
                        EngineError::WorkerCrashed(e.to_string()),
                    ));
                    return;
                }
            };

            rt.block_on(worker_loop(engine, timeout, request_rx, response_tx));
        }));

        if let Err(e) = result {
            let panic_msg = if let Some(s) = e.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = e.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            log::error!("Suggestion worker panicked: {}", panic_msg);
            let _ = crash_tx.send(GenerationResponse::Crashed(EngineError::WorkerCrashed(
                panic_msg,
            )));
        }
    })
}

/// Main worker loop - processes requests until the channel is closed
///
/// Uses blocking `recv()` on the request channel, which is fine in a
/// dedicated thread.
async fn worker_loop(
    engine: Result<Box<dyn SuggestionEngine>, EngineError>,
    timeout: Option<Duration>,
    request_rx: Receiver<GenerationRequest>,
    response_tx: Sender<GenerationResponse>,
) {
    while let Ok(request) = request_rx.recv() {
        match request {
            GenerationRequest::Generate {
                utterance,
                history,
                epoch,
                cancel_token,
            } => {
                let response =
                    handle_generate(&engine, &utterance, &history, epoch, timeout, cancel_token)
                        .await;
                if response_tx.send(response).is_err() {
                    // UI thread is gone
                    break;
                }
            }
        }
    }
    log::debug!("Suggestion worker shutting down");
}

/// Run one generation, racing it against cancellation and the timeout
async fn handle_generate(
    engine: &Result<Box<dyn SuggestionEngine>, EngineError>,
    utterance: &str,
    history: &[Message],
    epoch: u64,
    timeout: Option<Duration>,
    cancel_token: CancellationToken,
) -> GenerationResponse {
    if cancel_token.is_cancelled() {
        return GenerationResponse::Cancelled { epoch };
    }

    let engine = match engine {
        Ok(engine) => engine,
        Err(e) => {
            return GenerationResponse::Failed {
                epoch,
                message: e.to_string(),
            };
        }
    };

    let generation = async {
        match timeout {
            Some(limit) => tokio::time::timeout(limit, engine.generate(utterance, history))
                .await
                .unwrap_or(Err(EngineError::Timeout(limit.as_millis() as u64))),
            None => engine.generate(utterance, history).await,
        }
    };

    let outcome = tokio::select! {
        biased;

        _ = cancel_token.cancelled() => Err(EngineError::Cancelled),
        result = generation => result,
    };

    match outcome {
        Ok(reply) => GenerationResponse::Complete { epoch, reply },
        Err(EngineError::Cancelled) if cancel_token.is_cancelled() => {
            log::debug!("Generation {} cancelled", epoch);
            GenerationResponse::Cancelled { epoch }
        }
        Err(e) => GenerationResponse::Failed {
            epoch,
            message: e.to_string(),
        },
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
