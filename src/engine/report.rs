//! Report state machine: summary → tomorrow's goals → manager report,
//! each stage AI-drafted (or prompted) and confirmed by the user.

use super::prompt::ReportContext;
use super::{Prompt, PromptRequest, Synthesis, Transition, matches_any};
use crate::errors::{AppError, AppResult};
use crate::models::{ConversationMessage, DailyReport, WorkRecord};
use crate::utils::formatting::mins2hm;
use chrono::NaiveDate;

pub const AFFIRMATIVE_TOKENS: [&str; 3] = ["ok", "問題ない", "大丈夫"];
pub const COMPLETION_TOKENS: [&str; 2] = ["完成", "ok"];

pub const NO_RECORDS_NOTICE: &str = "日報を作成するには、先に履歴を記録してください。";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportState {
    Idle,
    Analyzing,
    AwaitingSummaryConfirm,
    AwaitingGoalsConfirm,
    AwaitingManagerConfirm,
    Complete,
}

#[derive(Debug)]
pub struct ReportMachine {
    state: ReportState,
    pending: Option<Synthesis>,
    report: Option<DailyReport>,
    records: Vec<WorkRecord>,
    summary_draft: Option<String>,
    manager_draft: Option<String>,
    manager_override: Option<String>,
}

impl Default for ReportMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportMachine {
    pub fn new() -> Self {
        Self {
            state: ReportState::Idle,
            pending: None,
            report: None,
            records: Vec::new(),
            summary_draft: None,
            manager_draft: None,
            manager_override: None,
        }
    }

    pub fn state(&self) -> ReportState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn report(&self) -> Option<&DailyReport> {
        self.report.as_ref()
    }

    /// Start from a snapshot of every known record.
    ///
    /// With no records the machine stays idle and only a notice is returned.
    pub fn start(
        &mut self,
        user_name: &str,
        date: NaiveDate,
        records: Vec<WorkRecord>,
    ) -> AppResult<Transition<DailyReport>> {
        if self.state != ReportState::Idle && self.state != ReportState::Complete {
            return Err(AppError::InvalidState(
                "a daily report is already in progress".into(),
            ));
        }

        if records.is_empty() {
            return Ok(Transition::new(vec![ConversationMessage::notice(
                NO_RECORDS_NOTICE,
            )]));
        }

        let analysis = analysis_message(&records);
        self.report = Some(DailyReport::shell(user_name, date, &records));
        self.records = records;
        self.summary_draft = None;
        self.manager_draft = None;
        self.manager_override = None;
        self.state = ReportState::Analyzing;

        let request = self.request(Synthesis::DailySummary);
        Ok(Transition::new(vec![ConversationMessage::system(analysis)]).waiting_on(request))
    }

    /// Leave the pending sub-state with the resolved synthesis.
    pub fn deliver(&mut self, prompt: Prompt) -> AppResult<Vec<ConversationMessage>> {
        let kind = self
            .pending
            .take()
            .ok_or_else(|| AppError::InvalidState("no synthesis was requested".into()))?;

        let synthesized = prompt.is_synthesized();
        let text = match kind {
            Synthesis::DailySummary => {
                self.state = ReportState::AwaitingSummaryConfirm;
                self.summary_draft = synthesized.then(|| prompt.text.clone());
                if synthesized {
                    format!(
                        "【本日の総括（案）】\n{}\n\nこの内容でよろしければ「OK」、修正する場合は総括を入力してください。",
                        prompt.text
                    )
                } else {
                    prompt.text
                }
            }
            Synthesis::TomorrowGoals => {
                if synthesized {
                    format!(
                        "【明日の目標（案）】\n{}\n\n明日の目標を入力してください。",
                        prompt.text
                    )
                } else {
                    prompt.text
                }
            }
            Synthesis::ManagerReport => {
                self.manager_draft = synthesized.then(|| prompt.text.clone());
                if synthesized {
                    format!(
                        "【上司への報告（案）】\n{}\n\nこの内容で確定する場合は「完成」、修正する場合は報告内容を入力してください。",
                        prompt.text
                    )
                } else {
                    prompt.text
                }
            }
        };

        Ok(vec![ConversationMessage::system(text)])
    }

    pub fn submit(&mut self, input: &str) -> AppResult<Transition<DailyReport>> {
        if self.pending.is_some() {
            return Err(AppError::InvalidState(
                "waiting for the next prompt".into(),
            ));
        }

        let answer = input.trim();
        let mut messages = vec![ConversationMessage::user(input)];

        match self.state {
            ReportState::AwaitingSummaryConfirm => {
                let summary = match &self.summary_draft {
                    Some(draft) if matches_any(answer, &AFFIRMATIVE_TOKENS) => draft.clone(),
                    _ => answer.to_string(),
                };
                self.report_mut()?.daily_summary = summary;
                self.state = ReportState::AwaitingGoalsConfirm;

                let request = self.request(Synthesis::TomorrowGoals);
                Ok(Transition::new(messages).waiting_on(request))
            }
            ReportState::AwaitingGoalsConfirm => {
                // No affirmative branch here: whatever was typed becomes the goals.
                self.report_mut()?.tomorrow_goals = answer.to_string();
                self.state = ReportState::AwaitingManagerConfirm;

                let request = self.request(Synthesis::ManagerReport);
                Ok(Transition::new(messages).waiting_on(request))
            }
            ReportState::AwaitingManagerConfirm => {
                if matches_any(answer, &COMPLETION_TOKENS) {
                    let text = self
                        .manager_override
                        .take()
                        .or_else(|| self.manager_draft.take())
                        .unwrap_or_default();

                    let mut report = self
                        .report
                        .take()
                        .ok_or_else(|| AppError::InvalidState("report has no shell".into()))?;
                    report.report_to_manager = text;
                    self.state = ReportState::Complete;

                    messages.push(ConversationMessage::system(
                        "日報が完成しました！お疲れさまでした。",
                    ));
                    return Ok(Transition::new(messages).finishing(report));
                }

                self.manager_override = Some(answer.to_string());
                messages.push(ConversationMessage::system(format!(
                    "上司への報告を次の内容に更新しました。\n{}\n\nこの内容で確定する場合は「完成」、さらに修正する場合は報告内容を入力してください。",
                    answer
                )));
                Ok(Transition::new(messages))
            }
            ReportState::Idle | ReportState::Analyzing | ReportState::Complete => Err(
                AppError::InvalidState("no daily report awaiting input".into()),
            ),
        }
    }

    fn report_mut(&mut self) -> AppResult<&mut DailyReport> {
        self.report
            .as_mut()
            .ok_or_else(|| AppError::InvalidState("report has no shell".into()))
    }

    /// Mark the machine pending on `kind` and build the request for it.
    fn request(&mut self, kind: Synthesis) -> PromptRequest {
        self.pending = Some(kind);
        let (summary, goals) = self
            .report
            .as_ref()
            .map(|r| (r.daily_summary.clone(), r.tomorrow_goals.clone()))
            .unwrap_or_default();

        PromptRequest::Synthesis {
            kind,
            context: ReportContext {
                records: self.records.clone(),
                summary,
                goals,
            },
        }
    }
}

/// Deterministic overview of the snapshotted records.
pub fn analysis_message(records: &[WorkRecord]) -> String {
    let clients = distinct(records.iter().map(|r| r.client_name.as_str()));
    let kinds = distinct(records.iter().map(|r| r.work_type.as_str()));
    let total: i64 = records.iter().map(WorkRecord::minutes).sum();

    format!(
        "今日は{}で計{}件の作業がありましたね。\n{}が中心で、総作業時間は{}でした。",
        clients.join("、"),
        records.len(),
        kinds.join("、"),
        mins2hm(total)
    )
}

/// Distinct values in first-seen order.
fn distinct<'a>(items: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
