//! Prompt source: static table or generative backend, with deterministic
//! fallback whenever synthesis is unavailable or fails.

use crate::ai::{GenerateError, TextGenerator};
use crate::models::WorkRecord;
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Static prompts for recording steps 0..=5.
pub const STATIC_PROMPTS: [&str; 6] = [
    "お疲れさまでした！今日の作業履歴を記録していきましょう。どちらの客先での作業が完了しましたか？",
    "ありがとうございます。どのような種類の作業でしたか？",
    "作業時間について教えてください。何時から何時まで作業されましたか？",
    "作業の詳しい内容について教えてください。",
    "今日の作業の成果はいかがでしたか？",
    "作業中に感じた課題や問題点はありましたか？",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOrigin {
    Static,
    Synthesized,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub origin: PromptOrigin,
}

impl Prompt {
    fn new(text: impl Into<String>, origin: PromptOrigin) -> Self {
        Self {
            text: text.into(),
            origin,
        }
    }

    pub fn is_synthesized(&self) -> bool {
        self.origin == PromptOrigin::Synthesized
    }
}

/// Report-stage content generated from accumulated records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Synthesis {
    DailySummary,
    TomorrowGoals,
    ManagerReport,
}

impl Synthesis {
    /// Text returned verbatim when synthesis is not possible.
    pub fn fallback(&self) -> &'static str {
        match self {
            Synthesis::DailySummary => {
                "それでは日報を作成していきましょう！今日一日を振り返って、全体的にはいかがでしたか？"
            }
            Synthesis::TomorrowGoals => "明日の目標を教えてください。",
            Synthesis::ManagerReport => {
                "上司への報告内容を入力してください。確定する場合は「完成」と入力してください。"
            }
        }
    }
}

/// Everything a report-stage synthesis may draw on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportContext {
    pub records: Vec<WorkRecord>,
    pub summary: String,
    pub goals: String,
}

/// Outstanding request a machine is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptRequest {
    Step {
        step: usize,
        answers: Vec<String>,
        latest: Option<String>,
    },
    Synthesis {
        kind: Synthesis,
        context: ReportContext,
    },
}

#[derive(Clone)]
pub enum PromptSource {
    Static,
    Generative {
        generator: Arc<dyn TextGenerator>,
        timeout: Option<Duration>,
    },
}

impl PromptSource {
    pub fn generative(generator: Arc<dyn TextGenerator>, timeout: Option<Duration>) -> Self {
        PromptSource::Generative { generator, timeout }
    }

    pub fn is_generative(&self) -> bool {
        matches!(self, PromptSource::Generative { .. })
    }

    pub async fn resolve(&self, request: &PromptRequest) -> Prompt {
        match request {
            PromptRequest::Step {
                step,
                answers,
                latest,
            } => self.next_prompt(*step, answers, latest.as_deref()).await,
            PromptRequest::Synthesis { kind, context } => self.synthesize(*kind, context).await,
        }
    }

    /// Prompt for a recording step.
    ///
    /// Steps inside the static table always get the static entry. Past the
    /// table a continuation is synthesized, cycling the table on failure.
    pub async fn next_prompt(&self, step: usize, answers: &[String], latest: Option<&str>) -> Prompt {
        if let Some(text) = STATIC_PROMPTS.get(step) {
            return Prompt::new(*text, PromptOrigin::Static);
        }

        let request = continuation_template(answers, latest);
        match self.try_generate(&request).await {
            Ok(text) => Prompt::new(text, PromptOrigin::Synthesized),
            Err(e) => {
                log_fallback(&e, "continuation prompt fell back to static table");
                Prompt::new(
                    STATIC_PROMPTS[step % STATIC_PROMPTS.len()],
                    PromptOrigin::Fallback,
                )
            }
        }
    }

    pub async fn synthesize(&self, kind: Synthesis, context: &ReportContext) -> Prompt {
        let request = synthesis_template(kind, context);
        match self.try_generate(&request).await {
            Ok(text) => Prompt::new(text, PromptOrigin::Synthesized),
            Err(e) => {
                log_fallback(&e, "synthesis fell back to static text");
                Prompt::new(kind.fallback(), PromptOrigin::Fallback)
            }
        }
    }

    /// Single attempt, bounded by the optional timeout.
    async fn try_generate(&self, request: &str) -> Result<String, GenerateError> {
        let PromptSource::Generative { generator, timeout } = self else {
            return Err(GenerateError::Unavailable);
        };

        debug!(chars = request.chars().count(), "sending synthesis request");
        match timeout {
            Some(limit) => tokio::time::timeout(*limit, generator.generate(request))
                .await
                .map_err(|_| GenerateError::Http(format!("timed out after {:?}", limit)))?,
            None => generator.generate(request).await,
        }
    }
}

/// An unconfigured backend is the normal static mode, not a warning.
fn log_fallback(err: &GenerateError, what: &str) {
    match err {
        GenerateError::Unavailable => debug!(error = %err, "{what}"),
        _ => warn!(error = %err, "{what}"),
    }
}

fn continuation_template(answers: &[String], latest: Option<&str>) -> String {
    let mut out = String::from("作業履歴を対話形式で記録しています。これまでの回答:\n");
    for (i, a) in answers.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, a);
    }
    if let Some(l) = latest {
        let _ = writeln!(out, "最新の回答: {}", l);
    }
    out.push_str("次に尋ねるべき短い質問を1つだけ日本語で出力してください。");
    out
}

fn synthesis_template(kind: Synthesis, ctx: &ReportContext) -> String {
    let mut out = String::from("以下は今日の作業履歴です。\n");
    for r in &ctx.records {
        let _ = writeln!(
            out,
            "- {} / {} / {}-{} ({}分) / 内容: {} / 成果: {} / 課題: {}",
            r.client_name,
            r.work_type,
            r.start_str(),
            r.end_str(),
            r.minutes(),
            r.work_detail,
            r.result,
            r.issues
        );
    }

    match kind {
        Synthesis::DailySummary => {
            out.push_str("\n日報の「本日の総括」を200字程度の日本語で作成してください。");
        }
        Synthesis::TomorrowGoals => {
            let _ = write!(
                out,
                "\n本日の総括:\n{}\n\n明日の目標を箇条書きで3つ提案してください。",
                ctx.summary
            );
        }
        Synthesis::ManagerReport => {
            let _ = write!(
                out,
                "\n本日の総括:\n{}\n\n明日の目標:\n{}\n\n上司への簡潔な報告文を丁寧な日本語で作成してください。",
                ctx.summary, ctx.goals
            );
        }
    }
    out
}
