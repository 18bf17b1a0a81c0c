//! Tests for the conversation store

use std::sync::mpsc::{self, Receiver, Sender};

use super::*;
use crate::assistant::engine::heuristic::{FALLBACK_REPLY, WELCOME_REPLY, classify};
use crate::assistant::message::{Role, Suggestions, WELCOME_MESSAGE_ID};
use crate::blocks::create_title_block;
use proptest::prelude::*;

/// Store wired to test-controlled channels instead of a worker thread
fn wired_store() -> (
    ConversationStore,
    Receiver<GenerationRequest>,
    Sender<GenerationResponse>,
) {
    let (request_tx, request_rx) = mpsc::channel();
    let (response_tx, response_rx) = mpsc::channel();
    let mut store = ConversationStore::new();
    store.set_channels(request_tx, response_rx);
    (store, request_rx, response_tx)
}

fn next_request(rx: &Receiver<GenerationRequest>) -> (String, Vec<Message>, u64, CancellationToken) {
    match rx.try_recv().expect("a request should have been dispatched") {
        GenerationRequest::Generate {
            utterance,
            history,
            epoch,
            cancel_token,
        } => (utterance, history, epoch, cancel_token),
    }
}

fn assert_seed_state(store: &ConversationStore) {
    assert_eq!(store.messages().len(), 1);
    assert_eq!(store.messages()[0].id, WELCOME_MESSAGE_ID);
    assert_eq!(store.messages()[0].role, Role::Assistant);
    assert_eq!(store.messages()[0].suggestions, Suggestions::None);
    assert!(!store.is_generating());
}

#[test]
fn test_new_store_is_seeded() {
    let store = ConversationStore::new();
    assert_seed_state(&store);
    assert!(!store.has_worker());
}

#[test]
fn test_submit_appends_user_message_immediately() {
    let (mut store, request_rx, _response_tx) = wired_store();

    assert!(store.submit("  Create a welcome email  "));

    assert_eq!(store.messages().len(), 2);
    let user = &store.messages()[1];
    assert_eq!(user.role, Role::User);
    assert_eq!(user.content, "Create a welcome email");
    assert!(store.is_generating());

    let (utterance, history, epoch, _) = next_request(&request_rx);
    assert_eq!(utterance, "Create a welcome email");
    assert_eq!(history.len(), 2);
    assert_eq!(epoch, store.epoch());
}

#[test]
fn test_completion_appends_assistant_message() {
    let (mut store, request_rx, response_tx) = wired_store();
    store.submit("welcome");
    let (_, _, epoch, _) = next_request(&request_rx);

    let reply = classify("welcome");
    let expected_blocks = reply.blocks.clone();
    response_tx
        .send(GenerationResponse::Complete { epoch, reply })
        .unwrap();

    assert!(store.poll());
    assert_eq!(store.messages().len(), 3);
    let assistant = &store.messages()[2];
    assert_eq!(assistant.role, Role::Assistant);
    assert_eq!(assistant.content, WELCOME_REPLY);
    assert_eq!(assistant.suggestions.blocks(), expected_blocks.as_slice());
    assert!(!store.is_generating());
}

#[test]
fn test_blank_submission_is_ignored() {
    let (mut store, request_rx, _response_tx) = wired_store();
    assert!(!store.submit(""));
    assert!(!store.submit("   \t\n"));
    assert_seed_state(&store);
    assert!(request_rx.try_recv().is_err());
}

#[test]
fn test_submission_while_generating_is_ignored() {
    let (mut store, request_rx, _response_tx) = wired_store();
    store.submit("first");
    let before = store.snapshot();

    assert!(!store.submit("second"));

    assert_eq!(store.snapshot(), before);
    next_request(&request_rx);
    assert!(request_rx.try_recv().is_err(), "only one request in flight");
}

#[test]
fn test_replies_alternate_with_utterances() {
    let (mut store, request_rx, response_tx) = wired_store();

    for utterance in ["welcome", "product", "anything"] {
        assert!(store.submit(utterance));
        let (u, _, epoch, _) = next_request(&request_rx);
        response_tx
            .send(GenerationResponse::Complete {
                epoch,
                reply: classify(&u),
            })
            .unwrap();
        store.poll();
    }

    let roles: Vec<Role> = store.messages().iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            Role::Assistant,
            Role::User,
            Role::Assistant,
            Role::User,
            Role::Assistant,
            Role::User,
            Role::Assistant,
        ]
    );
}

#[test]
fn test_engine_failure_becomes_failure_message() {
    let (mut store, request_rx, response_tx) = wired_store();
    store.submit("welcome");
    let (_, _, epoch, _) = next_request(&request_rx);

    response_tx
        .send(GenerationResponse::Failed {
            epoch,
            message: "[Endpoint] API error (500): boom".to_string(),
        })
        .unwrap();

    assert!(store.poll());
    let last = store.messages().last().unwrap();
    assert_eq!(last.role, Role::Assistant);
    assert_eq!(last.content, FAILURE_TEXT);
    assert!(!last.has_suggestions());
    assert!(!store.is_generating());
}

#[test]
fn test_submit_without_worker_fails_gracefully() {
    let mut store = ConversationStore::new();
    assert!(store.submit("welcome"));
    assert_eq!(store.messages().len(), 3);
    assert_eq!(store.messages()[1].role, Role::User);
    assert_eq!(store.messages()[2].content, FAILURE_TEXT);
    assert!(!store.is_generating());
}

#[test]
fn test_worker_disconnect_while_generating_fails_gracefully() {
    let (mut store, request_rx, response_tx) = wired_store();
    store.submit("welcome");
    drop(response_tx);
    drop(request_rx);

    assert!(store.poll());
    assert_eq!(store.messages().last().unwrap().content, FAILURE_TEXT);
    assert!(!store.is_generating());
    assert!(!store.has_worker());
}

#[test]
fn test_worker_crash_while_generating_fails_gracefully() {
    let (mut store, _request_rx, _response_tx) = wired_store();
    store.submit("welcome");
    assert!(store.apply_response(GenerationResponse::Crashed(
        EngineError::WorkerCrashed("panic".to_string())
    )));
    assert_eq!(store.messages().last().unwrap().content, FAILURE_TEXT);
    assert!(!store.is_generating());
}

#[test]
fn test_reset_restores_seed_state() {
    let (mut store, request_rx, response_tx) = wired_store();
    store.submit("welcome");
    let (_, _, epoch, _) = next_request(&request_rx);
    response_tx
        .send(GenerationResponse::Complete {
            epoch,
            reply: classify("welcome"),
        })
        .unwrap();
    store.poll();
    store.submit("product");

    store.reset();

    assert_seed_state(&store);
}

#[test]
fn test_reset_cancels_in_flight_request() {
    let (mut store, request_rx, _response_tx) = wired_store();
    store.submit("welcome");
    let (_, _, _, cancel_token) = next_request(&request_rx);
    assert!(!cancel_token.is_cancelled());

    store.reset();

    assert!(cancel_token.is_cancelled());
}

#[test]
fn test_completion_after_reset_is_discarded() {
    let (mut store, request_rx, response_tx) = wired_store();
    store.submit("welcome");
    let (_, _, stale_epoch, _) = next_request(&request_rx);

    store.reset();
    let after_reset = store.snapshot();

    response_tx
        .send(GenerationResponse::Complete {
            epoch: stale_epoch,
            reply: classify("welcome"),
        })
        .unwrap();

    assert!(!store.poll());
    assert_eq!(store.snapshot(), after_reset);
    assert_seed_state(&store);
}

#[test]
fn test_stale_completion_does_not_answer_new_submission() {
    let (mut store, request_rx, response_tx) = wired_store();
    store.submit("welcome");
    let (_, _, stale_epoch, _) = next_request(&request_rx);
    store.reset();

    store.submit("make it pop");
    let (_, _, fresh_epoch, _) = next_request(&request_rx);
    assert_ne!(stale_epoch, fresh_epoch);

    response_tx
        .send(GenerationResponse::Complete {
            epoch: stale_epoch,
            reply: classify("welcome"),
        })
        .unwrap();
    store.poll();
    assert!(store.is_generating(), "stale reply must not end the new generation");
    assert_eq!(store.messages().len(), 2);

    response_tx
        .send(GenerationResponse::Complete {
            epoch: fresh_epoch,
            reply: classify("make it pop"),
        })
        .unwrap();
    store.poll();
    assert_eq!(store.messages().len(), 3);
    assert_eq!(store.messages()[2].content, FALLBACK_REPLY);
}

#[test]
fn test_stale_failure_is_discarded() {
    let (mut store, request_rx, _response_tx) = wired_store();
    store.submit("welcome");
    let (_, _, stale_epoch, _) = next_request(&request_rx);
    store.reset();

    assert!(!store.apply_response(GenerationResponse::Failed {
        epoch: stale_epoch,
        message: "late".to_string(),
    }));
    assert_seed_state(&store);
}

#[test]
fn test_cancelled_response_changes_nothing() {
    let (mut store, request_rx, _response_tx) = wired_store();
    store.submit("welcome");
    let (_, _, epoch, _) = next_request(&request_rx);
    store.reset();
    assert!(!store.apply_response(GenerationResponse::Cancelled { epoch }));
    assert_seed_state(&store);
}

#[test]
fn test_cancellation_without_reset_fails_current_generation() {
    let (mut store, request_rx, _response_tx) = wired_store();
    store.submit("welcome");
    let (_, _, epoch, _) = next_request(&request_rx);

    assert!(store.apply_response(GenerationResponse::Cancelled { epoch }));

    assert_eq!(store.messages().len(), 3);
    assert_eq!(store.messages()[2].content, FAILURE_TEXT);
    assert!(!store.is_generating());
}

#[test]
fn test_find_message() {
    let (mut store, request_rx, response_tx) = wired_store();
    store.submit("welcome");
    let (_, _, epoch, _) = next_request(&request_rx);
    response_tx
        .send(GenerationResponse::Complete {
            epoch,
            reply: Reply::new("One block", vec![create_title_block("Hi")]),
        })
        .unwrap();
    store.poll();

    let id = store.messages()[2].id.clone();
    assert_eq!(store.find_message(&id).unwrap().content, "One block");
    assert!(store.find_message("missing").is_none());
}

#[test]
fn test_subscribers_observe_each_transition() {
    let (mut store, request_rx, response_tx) = wired_store();
    let mut rx = store.subscribe();
    assert!(!rx.has_changed().unwrap());

    store.submit("welcome");
    assert!(rx.has_changed().unwrap());
    {
        let snapshot = rx.borrow_and_update();
        assert!(snapshot.is_generating);
        assert_eq!(snapshot.messages.len(), 2);
    }

    let (_, _, epoch, _) = next_request(&request_rx);
    response_tx
        .send(GenerationResponse::Complete {
            epoch,
            reply: classify("welcome"),
        })
        .unwrap();
    store.poll();

    assert!(rx.has_changed().unwrap());
    let snapshot = rx.borrow_and_update();
    assert!(!snapshot.is_generating);
    assert_eq!(snapshot.messages.len(), 3);
}

#[test]
fn test_ignored_submission_does_not_notify() {
    let mut store = ConversationStore::new();
    let rx = store.subscribe();
    store.submit("   ");
    assert!(!rx.has_changed().unwrap());
}

// For any sequence of utterances, each accepted submission adds exactly one
// user message and, once its reply is applied, exactly one assistant message.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_log_grows_by_two_per_accepted_utterance(
        utterances in prop::collection::vec("[ a-z]{0,12}", 0..8)
    ) {
        let (mut store, request_rx, response_tx) = wired_store();
        let mut expected_len = 1;

        for utterance in &utterances {
            let accepted = store.submit(utterance);
            prop_assert_eq!(accepted, !utterance.trim().is_empty());
            if !accepted {
                prop_assert_eq!(store.messages().len(), expected_len);
                continue;
            }

            expected_len += 1;
            prop_assert_eq!(store.messages().len(), expected_len);
            prop_assert!(store.is_generating());

            let (u, _, epoch, _) = next_request(&request_rx);
            response_tx.send(GenerationResponse::Complete { epoch, reply: classify(&u) }).unwrap();
            store.poll();

            expected_len += 1;
            prop_assert_eq!(store.messages().len(), expected_len);
            prop_assert!(!store.is_generating());
        }
    }
}
