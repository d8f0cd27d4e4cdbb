//! Storage boundary for finished records and reports.

mod local;
mod remote;

pub use local::LocalStore;
pub use remote::{RemoteStore, RowFilter};

use crate::config::{Config, StorageMode};
use crate::errors::AppResult;
use crate::models::{DailyReport, WorkRecord};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Append-and-load persistence, "eventually visible to load" semantics.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn append_record(&self, record: &WorkRecord) -> AppResult<()>;

    async fn append_report(&self, report: &DailyReport) -> AppResult<()>;

    async fn load_records(&self) -> AppResult<Vec<WorkRecord>>;

    async fn load_reports(&self) -> AppResult<Vec<DailyReport>>;

    /// Flag the given records as folded into a daily report.
    async fn mark_included(&self, ids: &[Uuid]) -> AppResult<()>;
}

/// Build the store selected by the configuration.
pub fn open_store(cfg: &Config) -> AppResult<Arc<dyn RecordStore>> {
    match cfg.storage {
        StorageMode::Local => Ok(Arc::new(LocalStore::open(&cfg.database)?)),
        StorageMode::Remote => Ok(Arc::new(RemoteStore::from_config(cfg)?)),
    }
}
