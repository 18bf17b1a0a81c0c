//! Tests for app_events

use crate::app::Focus;
use crate::assistant::conversation::GenerationRequest;
use crate::assistant::message::{Role, WELCOME_MESSAGE_ID};
use crate::test_utils::test_helpers::{converse, key, key_with_mods, test_app, wired_app};
use ratatui::crossterm::event::{KeyCode, KeyModifiers};

fn type_text(app: &mut crate::app::App, text: &str) {
    for c in text.chars() {
        app.handle_key_event(key(KeyCode::Char(c)));
    }
}

#[test]
fn test_typing_goes_to_input() {
    let mut app = test_app();
    type_text(&mut app, "hello");
    assert_eq!(app.input.text(), "hello");
}

#[test]
fn test_enter_submits_and_clears_input() {
    let (mut app, worker) = wired_app();
    type_text(&mut app, "welcome");

    app.handle_key_event(key(KeyCode::Enter));

    assert_eq!(app.input.text(), "");
    assert!(app.is_generating());
    let GenerationRequest::Generate { utterance, .. } = worker.requests.try_recv().unwrap();
    assert_eq!(utterance, "welcome");
}

#[test]
fn test_enter_on_blank_input_keeps_text() {
    let (mut app, worker) = wired_app();
    type_text(&mut app, "   ");

    app.handle_key_event(key(KeyCode::Enter));

    assert_eq!(app.input.text(), "   ");
    assert!(!app.is_generating());
    assert!(worker.requests.try_recv().is_err());
}

#[test]
fn test_input_ignored_while_generating() {
    let (mut app, _worker) = wired_app();
    type_text(&mut app, "welcome");
    app.handle_key_event(key(KeyCode::Enter));

    type_text(&mut app, "more");
    app.handle_key_event(key(KeyCode::Enter));

    assert_eq!(app.input.text(), "");
    assert_eq!(app.panel.store().messages().len(), 2);
}

#[test]
fn test_paste_ignored_while_generating() {
    let (mut app, _worker) = wired_app();
    type_text(&mut app, "welcome");
    app.handle_key_event(key(KeyCode::Enter));

    app.handle_paste_event("pasted".to_string());
    assert_eq!(app.input.text(), "");
}

#[test]
fn test_tab_toggles_focus() {
    let mut app = test_app();
    app.handle_key_event(key(KeyCode::Tab));
    assert_eq!(app.focus, Focus::Suggestions);
    app.handle_key_event(key(KeyCode::BackTab));
    assert_eq!(app.focus, Focus::InputField);
}

#[test]
fn test_add_selected_block_from_suggestions_pane() {
    let (mut app, worker) = wired_app();
    converse(&mut app, &worker, "Create a welcome email");

    app.handle_key_event(key(KeyCode::Tab));
    app.handle_key_event(key(KeyCode::Down));
    app.handle_key_event(key(KeyCode::Down));
    app.handle_key_event(key(KeyCode::Char('a')));

    let reply = app.panel.store().messages().last().unwrap();
    assert_eq!(reply.role, Role::Assistant);
    let expected = reply.suggestions.blocks()[1].clone();
    assert_eq!(app.template().blocks, vec![expected]);
    assert!(app.editor().is_dirty());
    assert_eq!(app.notification.current_message(), Some("Block added"));
}

#[test]
fn test_adding_twice_gives_distinct_ids() {
    let (mut app, worker) = wired_app();
    converse(&mut app, &worker, "welcome");

    app.handle_key_event(key(KeyCode::Tab));
    app.handle_key_event(key(KeyCode::Down));
    app.handle_key_event(key(KeyCode::Char('a')));
    app.handle_key_event(key(KeyCode::Char('a')));

    let blocks = &app.template().blocks;
    assert_eq!(blocks.len(), 2);
    assert_ne!(blocks[0].id, blocks[1].id);
    assert_eq!(blocks[0].payload, blocks[1].payload);
}

#[test]
fn test_apply_all_requires_confirmation() {
    let (mut app, worker) = wired_app();
    converse(&mut app, &worker, "Add a product section about new sneakers");
    let reply_id = app.panel.store().messages().last().unwrap().id.clone();

    app.handle_key_event(key(KeyCode::Tab));
    app.handle_key_event(key(KeyCode::Down));
    app.handle_key_event(key(KeyCode::Char('A')));

    assert_eq!(app.pending_apply.as_deref(), Some(reply_id.as_str()));
    assert!(app.template().blocks.is_empty());

    app.handle_key_event(key(KeyCode::Char('y')));

    assert!(app.pending_apply.is_none());
    assert_eq!(app.template().blocks.len(), 3);
    assert_eq!(app.panel.template().blocks.len(), 3);
}

#[test]
fn test_apply_all_cancelled_by_other_key() {
    let (mut app, worker) = wired_app();
    converse(&mut app, &worker, "welcome");

    app.handle_key_event(key(KeyCode::Tab));
    app.handle_key_event(key(KeyCode::Down));
    app.handle_key_event(key(KeyCode::Char('A')));
    app.handle_key_event(key(KeyCode::Esc));

    assert!(app.pending_apply.is_none());
    assert!(app.template().blocks.is_empty());
    // Esc only dismissed the popup
    assert!(!app.should_quit());
}

#[test]
fn test_ctrl_r_resets_conversation() {
    let (mut app, worker) = wired_app();
    converse(&mut app, &worker, "welcome");
    app.handle_key_event(key(KeyCode::Tab));
    app.handle_key_event(key(KeyCode::Down));

    app.handle_key_event(key_with_mods(KeyCode::Char('r'), KeyModifiers::CONTROL));

    let messages = app.panel.store().messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].id, WELCOME_MESSAGE_ID);
    assert_eq!(app.selection.get_selected(), None);
}

#[test]
fn test_ctrl_s_without_path_warns() {
    let mut app = test_app();
    app.handle_key_event(key_with_mods(KeyCode::Char('s'), KeyModifiers::CONTROL));
    assert!(app.notification.current_message().is_some());
    assert!(!app.should_quit());
}

#[test]
fn test_quit_keys() {
    let mut app = test_app();
    app.handle_key_event(key(KeyCode::Esc));
    assert!(app.should_quit());

    let mut app = test_app();
    app.handle_key_event(key_with_mods(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit());
}
