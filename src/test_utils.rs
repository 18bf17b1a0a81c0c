//! Shared test utilities for mailsmith

#[cfg(test)]
pub mod test_helpers {
    use std::sync::mpsc::{self, Receiver, Sender};

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::app::App;
    use crate::assistant::conversation::{GenerationRequest, GenerationResponse};
    use crate::assistant::engine::heuristic::classify;
    use crate::template::{EmailTemplate, TemplateEditor};

    /// Test end of the conversation channels
    pub struct FakeWorker {
        pub requests: Receiver<GenerationRequest>,
        pub responses: Sender<GenerationResponse>,
    }

    impl FakeWorker {
        /// Answer the next pending request with the heuristic reply
        pub fn answer_next(&self) {
            let GenerationRequest::Generate {
                utterance, epoch, ..
            } = self.requests.try_recv().expect("a pending request");
            self.responses
                .send(GenerationResponse::Complete {
                    epoch,
                    reply: classify(&utterance),
                })
                .expect("store alive");
        }
    }

    /// App with an empty untitled template and no worker
    pub fn test_app() -> App {
        App::new(TemplateEditor::new(EmailTemplate::untitled()))
    }

    /// App wired to a fake worker the test drives by hand
    pub fn wired_app() -> (App, FakeWorker) {
        let mut app = test_app();
        let (request_tx, request_rx) = mpsc::channel();
        let (response_tx, response_rx) = mpsc::channel();
        app.panel.store_mut().set_channels(request_tx, response_rx);
        (
            app,
            FakeWorker {
                requests: request_rx,
                responses: response_tx,
            },
        )
    }

    /// Submit `utterance` through the input and apply the heuristic reply
    pub fn converse(app: &mut App, worker: &FakeWorker, utterance: &str) {
        app.input.insert_paste(utterance);
        app.handle_key_event(key(KeyCode::Enter));
        worker.answer_next();
        app.poll_conversation();
    }

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    pub fn key_with_mods(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }
}
