//! Slot-filling dialogue engine.
//!
//! Both state machines are synchronous and I/O free: every operation
//! returns a [`Transition`] listing the messages to show and, when the
//! machine needs a prompt, the [`PromptRequest`] it is now waiting on.
//! While a request is outstanding the machine is *pending* and rejects
//! `submit`. The [`Session`] resolves requests through the
//! [`PromptSource`] and feeds the answer back with `deliver`.

pub mod extract;
pub mod prompt;
pub mod recording;
pub mod report;
pub mod schema;
pub mod session;

pub use prompt::{Prompt, PromptOrigin, PromptRequest, PromptSource, Synthesis};
pub use recording::{RecordingMachine, RecordingState, TimeRangePolicy};
pub use report::{ReportMachine, ReportState};
pub use session::{Session, SessionOptions};

use crate::models::ConversationMessage;

/// Outcome of one state machine operation.
#[derive(Debug)]
pub struct Transition<T> {
    pub messages: Vec<ConversationMessage>,
    pub request: Option<PromptRequest>,
    pub finished: Option<T>,
}

impl<T> Transition<T> {
    pub(crate) fn new(messages: Vec<ConversationMessage>) -> Self {
        Self {
            messages,
            request: None,
            finished: None,
        }
    }

    pub(crate) fn waiting_on(mut self, request: PromptRequest) -> Self {
        self.request = Some(request);
        self
    }

    pub(crate) fn finishing(mut self, entity: T) -> Self {
        self.finished = Some(entity);
        self
    }
}

/// Case-insensitive substring match against any token.
pub(crate) fn matches_any(input: &str, tokens: &[&str]) -> bool {
    let lowered = input.to_lowercase();
    tokens.iter().any(|t| lowered.contains(&t.to_lowercase()))
}
