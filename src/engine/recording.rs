//! Recording state machine: one WorkRecord, one field per turn.

use super::schema::{FIELDS, LAST_STEP};
use super::{Prompt, PromptRequest, Transition};
use crate::errors::{AppError, AppResult};
use crate::models::{ConversationMessage, WorkRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

const TIME_RANGE_HINT: &str =
    "作業時間を読み取れませんでした。「9:00-17:00」のように入力してください。";

/// What to do when the time-range answer does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRangePolicy {
    /// Leave the times unset and move on.
    #[default]
    Tolerate,
    /// Stay on the step and ask again.
    Retry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingState {
    Idle,
    Active(usize),
    Complete,
}

#[derive(Debug)]
pub struct RecordingMachine {
    state: RecordingState,
    pending: bool,
    record: Option<WorkRecord>,
    answers: Vec<String>,
    policy: TimeRangePolicy,
}

impl Default for RecordingMachine {
    fn default() -> Self {
        Self::new(TimeRangePolicy::default())
    }
}

impl RecordingMachine {
    pub fn new(policy: TimeRangePolicy) -> Self {
        Self {
            state: RecordingState::Idle,
            pending: false,
            record: None,
            answers: Vec::new(),
            policy,
        }
    }

    pub fn state(&self) -> RecordingState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// The in-progress shell, if any.
    pub fn record(&self) -> Option<&WorkRecord> {
        self.record.as_ref()
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn start(&mut self, user_name: &str, date: NaiveDate) -> AppResult<Transition<WorkRecord>> {
        if matches!(self.state, RecordingState::Active(_)) {
            return Err(AppError::InvalidState(
                "a recording is already in progress".into(),
            ));
        }

        self.state = RecordingState::Active(0);
        self.record = Some(WorkRecord::shell(user_name, date));
        self.answers.clear();
        self.pending = true;

        Ok(Transition::new(Vec::new()).waiting_on(PromptRequest::Step {
            step: 0,
            answers: Vec::new(),
            latest: None,
        }))
    }

    /// Leave the pending sub-state with the resolved prompt.
    pub fn deliver(&mut self, prompt: Prompt) -> AppResult<Vec<ConversationMessage>> {
        if !self.pending {
            return Err(AppError::InvalidState("no prompt was requested".into()));
        }
        self.pending = false;
        Ok(vec![ConversationMessage::system(prompt.text)])
    }

    pub fn submit(&mut self, input: &str) -> AppResult<Transition<WorkRecord>> {
        let RecordingState::Active(step) = self.state else {
            return Err(AppError::InvalidState("no recording in progress".into()));
        };
        if self.pending {
            return Err(AppError::InvalidState(
                "waiting for the next prompt".into(),
            ));
        }

        let mut messages = vec![ConversationMessage::user(input)];
        let field = FIELDS[step];

        let record = self
            .record
            .as_mut()
            .ok_or_else(|| AppError::InvalidState("recording has no record".into()))?;
        let hit = field.apply(record, input);

        if !hit && self.policy == TimeRangePolicy::Retry {
            debug!(step, "time range not recognised, asking again");
            messages.push(ConversationMessage::system(TIME_RANGE_HINT));
            self.pending = true;
            return Ok(Transition::new(messages).waiting_on(PromptRequest::Step {
                step,
                answers: self.answers.clone(),
                latest: Some(input.to_string()),
            }));
        }
        if !hit {
            debug!(step, field = field.name(), "extraction miss tolerated");
        }

        self.answers.push(input.to_string());

        if step < LAST_STEP {
            let next = step + 1;
            self.state = RecordingState::Active(next);
            self.pending = true;
            return Ok(Transition::new(messages).waiting_on(PromptRequest::Step {
                step: next,
                answers: self.answers.clone(),
                latest: Some(input.to_string()),
            }));
        }

        // ---- finalization ----
        let finished = self
            .record
            .take()
            .ok_or_else(|| AppError::InvalidState("recording has no record".into()))?;
        self.state = RecordingState::Complete;

        messages.push(ConversationMessage::system(format!(
            "記録が完了しました！{}での{}が保存されました。",
            finished.client_name, finished.work_type
        )));

        Ok(Transition::new(messages).finishing(finished))
    }
}
