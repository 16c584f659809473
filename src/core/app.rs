//! Session state: the transcript, the input buffer, and the lifecycle of the
//! single in-flight request.
//!
//! `App` is deliberately free of rendering concerns so the submit/settle
//! state machine can be exercised without a terminal. The UI layer reads it
//! to draw and calls [`App::submit_input`] / [`App::handle_outcome`] to move
//! it forward.

use crate::core::constants::REQUEST_TIMEOUT;
use crate::core::message::{Message, Transcript};
use crate::core::request::{RequestOutcome, RequestParams};

pub struct App {
    pub transcript: Transcript,
    pub input: String,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
    client: reqwest::Client,
    endpoint: String,
    /// Id of the in-flight request, if any. `Some` is the busy indicator:
    /// it disables submission and mounts the rain animation.
    in_flight: Option<u64>,
    next_request_id: u64,
}

impl App {
    pub fn new(endpoint: String) -> Self {
        Self {
            transcript: Transcript::new(),
            input: String::new(),
            scroll_offset: 0,
            auto_scroll: true,
            client: reqwest::Client::new(),
            endpoint,
            in_flight: None,
            next_request_id: 1,
        }
    }

    /// True strictly between a submission and its settlement.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Turns the current input into a request.
    ///
    /// Empty (after trimming) input and submission while a request is in
    /// flight are both no-ops: nothing is appended, nothing is dispatched,
    /// and the input buffer is left alone. Otherwise the user entry is
    /// appended before this returns, so it always precedes the assistant
    /// entry that settlement will append.
    pub fn submit_input(&mut self) -> Option<RequestParams> {
        if self.is_busy() {
            return None;
        }
        let message = self.input.trim();
        if message.is_empty() {
            return None;
        }

        let message = message.to_string();
        self.input.clear();
        self.transcript.push_user(message.clone());
        self.auto_scroll = true;

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight = Some(request_id);

        Some(RequestParams {
            client: self.client.clone(),
            endpoint: self.endpoint.clone(),
            message,
            timeout: REQUEST_TIMEOUT,
            request_id,
        })
    }

    /// Settles the in-flight request: appends exactly one assistant entry
    /// (reply text, or the fault's user message) and clears the busy state.
    /// Outcomes for any other request id are discarded.
    ///
    /// Returns the appended entry so the caller can log it.
    pub fn handle_outcome(&mut self, outcome: RequestOutcome, request_id: u64) -> Option<&Message> {
        if self.in_flight != Some(request_id) {
            return None;
        }
        self.in_flight = None;

        let text = match outcome {
            RequestOutcome::Reply(text) => text,
            RequestOutcome::Fault(fault) => fault.user_message(),
        };
        self.transcript.push_assistant(text);
        self.auto_scroll = true;
        self.transcript.last()
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16, max_offset: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines).min(max_offset);
        // Scrolling back to the bottom re-engages follow mode.
        if self.scroll_offset >= max_offset {
            self.auto_scroll = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fault::RequestFault;

    fn test_app() -> App {
        App::new("http://127.0.0.1:9/".to_string())
    }

    #[test]
    fn submit_appends_user_entry_and_goes_busy() {
        let mut app = test_app();
        app.input = "  wake up, Neo  ".to_string();

        let params = app.submit_input().expect("should dispatch");
        assert_eq!(params.message, "wake up, Neo");
        assert_eq!(params.request_id, 1);

        assert!(app.is_busy());
        assert!(app.input.is_empty());
        assert_eq!(app.transcript.len(), 1);
        let entry = app.transcript.last().unwrap();
        assert!(entry.is_user);
        assert_eq!(entry.text, "wake up, Neo");
    }

    #[test]
    fn empty_or_whitespace_input_is_a_noop() {
        let mut app = test_app();
        assert!(app.submit_input().is_none());

        app.input = "   \t  ".to_string();
        assert!(app.submit_input().is_none());
        assert_eq!(app.input, "   \t  ");
        assert!(app.transcript.is_empty());
        assert!(!app.is_busy());
    }

    #[test]
    fn submitting_while_busy_is_a_noop() {
        let mut app = test_app();
        app.input = "first".to_string();
        assert!(app.submit_input().is_some());

        app.input = "second".to_string();
        assert!(app.submit_input().is_none());
        // Input is preserved so nothing typed is lost.
        assert_eq!(app.input, "second");
        assert_eq!(app.transcript.len(), 1);
    }

    #[test]
    fn settlement_appends_exactly_one_assistant_entry() {
        let mut app = test_app();
        app.input = "hello".to_string();
        let params = app.submit_input().unwrap();

        let entry = app
            .handle_outcome(RequestOutcome::Reply("hi".to_string()), params.request_id)
            .expect("entry appended");
        assert!(!entry.is_user);
        assert_eq!(entry.text, "hi");

        assert!(!app.is_busy());
        assert_eq!(app.transcript.len(), 2);
        let entries: Vec<_> = app.transcript.entries().collect();
        assert!(entries[0].is_user);
        assert!(!entries[1].is_user);
    }

    #[test]
    fn faulted_settlement_appends_classified_message() {
        let mut app = test_app();
        app.input = "hello".to_string();
        let params = app.submit_input().unwrap();

        app.handle_outcome(
            RequestOutcome::Fault(RequestFault::Timeout),
            params.request_id,
        );
        assert!(!app.is_busy());
        assert_eq!(
            app.transcript.last().unwrap().text,
            "The AI is taking longer than expected to respond. Please try again."
        );
    }

    #[test]
    fn stale_outcomes_are_discarded() {
        let mut app = test_app();
        app.input = "hello".to_string();
        let params = app.submit_input().unwrap();

        assert!(app
            .handle_outcome(RequestOutcome::Reply("ghost".to_string()), 999)
            .is_none());
        assert!(app.is_busy());
        assert_eq!(app.transcript.len(), 1);

        app.handle_outcome(RequestOutcome::Reply("real".to_string()), params.request_id);
        assert_eq!(app.transcript.len(), 2);
    }

    #[test]
    fn busy_is_false_outside_the_request_window() {
        let mut app = test_app();
        assert!(!app.is_busy());

        app.input = "a".to_string();
        let params = app.submit_input().unwrap();
        assert!(app.is_busy());

        app.handle_outcome(
            RequestOutcome::Fault(RequestFault::Unclassified),
            params.request_id,
        );
        assert!(!app.is_busy());

        // Next submission opens a fresh window with a fresh id.
        app.input = "b".to_string();
        let params = app.submit_input().unwrap();
        assert_eq!(params.request_id, 2);
        assert!(app.is_busy());
    }

    #[test]
    fn scrolling_toggles_auto_follow() {
        let mut app = test_app();
        app.scroll_offset = 5;
        app.scroll_up(2);
        assert!(!app.auto_scroll);
        assert_eq!(app.scroll_offset, 3);

        app.scroll_down(10, 8);
        assert_eq!(app.scroll_offset, 8);
        assert!(app.auto_scroll);
    }
}
