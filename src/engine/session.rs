//! Session coordinator: owns the active machine, resolves its prompt
//! requests and hands finished entities to the store.

use super::recording::TimeRangePolicy;
use super::{Prompt, PromptSource, RecordingMachine, ReportMachine, ReportState, Transition};
use crate::errors::{AppError, AppResult};
use crate::models::{ConversationMessage, DailyReport, WorkRecord};
use crate::store::RecordStore;
use crate::utils::date::today;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub user_name: String,
    /// Pause before each delivered system prompt.
    pub typing_delay: Duration,
    pub time_range_policy: TimeRangePolicy,
}

impl SessionOptions {
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            typing_delay: Duration::ZERO,
            time_range_policy: TimeRangePolicy::default(),
        }
    }
}

enum ActiveMachine {
    None,
    Recording(RecordingMachine),
    Report(ReportMachine),
}

/// Common face of both machines for the prompt-resolution loop.
trait Machine {
    fn deliver(&mut self, prompt: Prompt) -> AppResult<Vec<ConversationMessage>>;
}

impl Machine for RecordingMachine {
    fn deliver(&mut self, prompt: Prompt) -> AppResult<Vec<ConversationMessage>> {
        RecordingMachine::deliver(self, prompt)
    }
}

impl Machine for ReportMachine {
    fn deliver(&mut self, prompt: Prompt) -> AppResult<Vec<ConversationMessage>> {
        ReportMachine::deliver(self, prompt)
    }
}

enum Finished {
    Record(WorkRecord),
    Report(DailyReport),
}

pub struct Session {
    store: Arc<dyn RecordStore>,
    prompts: PromptSource,
    options: SessionOptions,
    active: ActiveMachine,
    transcript: Vec<ConversationMessage>,
}

impl Session {
    pub fn new(store: Arc<dyn RecordStore>, prompts: PromptSource, options: SessionOptions) -> Self {
        Self {
            store,
            prompts,
            options,
            active: ActiveMachine::None,
            transcript: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.active, ActiveMachine::None)
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.active, ActiveMachine::Recording(_))
    }

    pub fn is_reporting(&self) -> bool {
        matches!(self.active, ActiveMachine::Report(_))
    }

    pub fn recording(&self) -> Option<&RecordingMachine> {
        match &self.active {
            ActiveMachine::Recording(m) => Some(m),
            _ => None,
        }
    }

    pub fn reporting(&self) -> Option<&ReportMachine> {
        match &self.active {
            ActiveMachine::Report(m) => Some(m),
            _ => None,
        }
    }

    /// Every message emitted so far, in emission order.
    pub fn transcript(&self) -> &[ConversationMessage] {
        &self.transcript
    }

    pub async fn start_recording(&mut self) -> AppResult<Vec<ConversationMessage>> {
        self.ensure_idle()?;

        let mut machine = RecordingMachine::new(self.options.time_range_policy);
        let transition = machine.start(&self.options.user_name, today())?;
        let (messages, _) = drive(&mut machine, transition, &self.prompts, &self.options).await?;

        self.active = ActiveMachine::Recording(machine);
        Ok(self.emit(messages))
    }

    pub async fn start_report(&mut self) -> AppResult<Vec<ConversationMessage>> {
        self.ensure_idle()?;

        let records = match self.store.load_records().await {
            Ok(r) => r,
            Err(e) => {
                error!(error = %e, "failed to load work records");
                return Ok(self.emit(vec![ConversationMessage::notice(format!(
                    "履歴の読み込みに失敗しました: {e}"
                ))]));
            }
        };

        let mut machine = ReportMachine::new();
        let transition = machine.start(&self.options.user_name, today(), records)?;
        if machine.state() == ReportState::Idle {
            return Ok(self.emit(transition.messages));
        }

        let (messages, _) = drive(&mut machine, transition, &self.prompts, &self.options).await?;
        self.active = ActiveMachine::Report(machine);
        Ok(self.emit(messages))
    }

    /// Route one user turn to the active machine.
    ///
    /// The returned future resolves once the next prompt (or fallback) has
    /// been delivered, so the caller can accept the following turn.
    pub async fn submit(&mut self, input: &str) -> AppResult<Vec<ConversationMessage>> {
        let (mut messages, finished) = match &mut self.active {
            ActiveMachine::None => {
                return Err(AppError::InvalidState(
                    "no conversation in progress".into(),
                ));
            }
            ActiveMachine::Recording(machine) => {
                let transition = machine.submit(input)?;
                let (messages, done) =
                    drive(machine, transition, &self.prompts, &self.options).await?;
                (messages, done.map(Finished::Record))
            }
            ActiveMachine::Report(machine) => {
                let transition = machine.submit(input)?;
                let (messages, done) =
                    drive(machine, transition, &self.prompts, &self.options).await?;
                (messages, done.map(Finished::Report))
            }
        };

        if let Some(entity) = finished {
            self.active = ActiveMachine::None;
            if let Err(e) = self.persist(entity).await {
                error!(error = %e, "failed to persist finished entity");
                messages.push(ConversationMessage::notice(format!(
                    "保存に失敗しました: {e}"
                )));
            }
        }

        Ok(self.emit(messages))
    }

    async fn persist(&self, entity: Finished) -> AppResult<()> {
        match entity {
            Finished::Record(record) => {
                self.store.append_record(&record).await?;
                info!(id = %record.id, client = %record.client_name, "work record saved");
            }
            Finished::Report(report) => {
                self.store.append_report(&report).await?;
                self.store.mark_included(&report.related_history_ids).await?;
                info!(id = %report.id, records = report.related_history_ids.len(), "daily report saved");
            }
        }
        Ok(())
    }

    fn ensure_idle(&self) -> AppResult<()> {
        match self.active {
            ActiveMachine::None => Ok(()),
            ActiveMachine::Recording(_) => Err(AppError::InvalidState(
                "a work record is being recorded".into(),
            )),
            ActiveMachine::Report(_) => Err(AppError::InvalidState(
                "a daily report is being created".into(),
            )),
        }
    }

    fn emit(&mut self, messages: Vec<ConversationMessage>) -> Vec<ConversationMessage> {
        self.transcript.extend(messages.iter().cloned());
        messages
    }
}

/// Resolve the transition's outstanding request, if any, and deliver it.
async fn drive<M: Machine, T>(
    machine: &mut M,
    transition: Transition<T>,
    prompts: &PromptSource,
    options: &SessionOptions,
) -> AppResult<(Vec<ConversationMessage>, Option<T>)> {
    let Transition {
        mut messages,
        request,
        finished,
    } = transition;

    if let Some(request) = request {
        let prompt = prompts.resolve(&request).await;
        if !options.typing_delay.is_zero() {
            tokio::time::sleep(options.typing_delay).await;
        }
        messages.extend(machine.deliver(prompt)?);
    }

    Ok((messages, finished))
}
