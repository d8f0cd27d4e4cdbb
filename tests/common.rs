#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use async_trait::async_trait;
use chrono::NaiveDate;
use rworklog::ai::{GenerateError, TextGenerator};
use rworklog::engine::{PromptSource, Session, SessionOptions};
use rworklog::errors::{AppError, AppResult};
use rworklog::models::{DailyReport, WorkRecord};
use rworklog::store::RecordStore;
use std::collections::VecDeque;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

pub const USER: &str = "テスト太郎";

pub fn rwl() -> Command {
    let mut cmd = cargo_bin_cmd!("rworklog");
    cmd.env_remove("GEMINI_API_KEY");
    cmd
}

/// Unique path inside the system temp dir; any existing file is removed.
pub fn temp_path(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rworklog.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh, empty directory inside the system temp dir.
pub fn temp_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rworklog", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

/// Finished record with a known duration, for seeding stores.
pub fn sample_record(client: &str, kind: &str, start: &str, end: &str, minutes: i64) -> WorkRecord {
    let mut r = WorkRecord::shell(USER, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
    r.client_name = client.to_string();
    r.work_type = kind.to_string();
    r.start_time = Some(start.to_string());
    r.end_time = Some(end.to_string());
    r.duration = Some(minutes);
    r.work_detail = format!("{}の{}", client, kind);
    r.result = format!("{}完了", kind);
    r.issues = String::new();
    r
}

/// In-memory store with switchable failures.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<WorkRecord>>,
    reports: Mutex<Vec<DailyReport>>,
    fail_writes: bool,
    fail_loads: bool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_records(records: Vec<WorkRecord>) -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(records),
            ..Self::default()
        })
    }

    /// Loads succeed, every write fails.
    pub fn failing_writes(records: Vec<WorkRecord>) -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(records),
            fail_writes: true,
            ..Self::default()
        })
    }

    pub fn failing_loads() -> Arc<Self> {
        Arc::new(Self {
            fail_loads: true,
            ..Self::default()
        })
    }

    pub fn records(&self) -> Vec<WorkRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn reports(&self) -> Vec<DailyReport> {
        self.reports.lock().unwrap().clone()
    }

    fn write_guard(&self) -> AppResult<()> {
        if self.fail_writes {
            return Err(AppError::Storage("disk full".into()));
        }
        Ok(())
    }

    fn load_guard(&self) -> AppResult<()> {
        if self.fail_loads {
            return Err(AppError::Storage("unreachable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn append_record(&self, record: &WorkRecord) -> AppResult<()> {
        self.write_guard()?;
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn append_report(&self, report: &DailyReport) -> AppResult<()> {
        self.write_guard()?;
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }

    async fn load_records(&self) -> AppResult<Vec<WorkRecord>> {
        self.load_guard()?;
        Ok(self.records())
    }

    async fn load_reports(&self) -> AppResult<Vec<DailyReport>> {
        self.load_guard()?;
        Ok(self.reports())
    }

    async fn mark_included(&self, ids: &[Uuid]) -> AppResult<()> {
        self.write_guard()?;
        for r in self.records.lock().unwrap().iter_mut() {
            if ids.contains(&r.id) {
                r.daily_report_included = true;
            }
        }
        Ok(())
    }
}

/// Returns its replies in order, then fails.
#[derive(Default)]
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<String>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(replies: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.iter().map(|s| s.to_string()).collect()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| GenerateError::Http("script exhausted".into()))
    }
}

pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
        Err(GenerateError::Http("HTTP 500: boom".into()))
    }
}

/// Answers only after the given delay.
pub struct SlowGenerator(pub Duration);

#[async_trait]
impl TextGenerator for SlowGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
        tokio::time::sleep(self.0).await;
        Ok("late reply".into())
    }
}

pub fn session(store: Arc<MemoryStore>, prompts: PromptSource) -> Session {
    Session::new(store, prompts, SessionOptions::new(USER))
}

pub fn generative(generator: Arc<dyn TextGenerator>) -> PromptSource {
    PromptSource::generative(generator, Some(Duration::from_secs(5)))
}
