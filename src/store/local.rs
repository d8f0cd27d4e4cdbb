//! Local store: JSON collections under fixed keys in a SQLite kv table.
//!
//! rusqlite is blocking, so every operation runs on tokio's blocking pool.

use super::RecordStore;
use crate::db::kv::{self, DAILY_REPORTS_KEY, WORK_HISTORIES_KEY};
use crate::db::log::wlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{DailyReport, WorkRecord};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};
use uuid::Uuid;

pub struct LocalStore {
    pool: Arc<Mutex<DbPool>>,
}

impl LocalStore {
    pub fn open(path: &str) -> AppResult<Self> {
        Ok(Self {
            pool: Arc::new(Mutex::new(DbPool::new(path)?)),
        })
    }

    pub fn in_memory() -> AppResult<Self> {
        Ok(Self {
            pool: Arc::new(Mutex::new(DbPool::in_memory()?)),
        })
    }

    /// Run `work` against the connection on the blocking pool.
    async fn with_pool<T, F>(&self, work: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&DbPool) -> AppResult<T> + Send + 'static,
    {
        let pool = Arc::clone(&self.pool);
        tokio::task::spawn_blocking(move || {
            let guard = pool
                .lock()
                .map_err(|_| AppError::Storage("local store lock poisoned".into()))?;
            work(&guard)
        })
        .await
        .map_err(|e| AppError::Storage(format!("local store task failed: {e}")))?
    }

    async fn load<T>(&self, key: &'static str) -> AppResult<Vec<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.with_pool(move |pool| kv::load_collection(&pool.conn, key))
            .await
    }

    /// Read-modify-write of one collection.
    async fn update<T, F>(&self, key: &'static str, change: F) -> AppResult<()>
    where
        T: Serialize + DeserializeOwned + 'static,
        F: FnOnce(&mut Vec<T>) + Send + 'static,
    {
        self.with_pool(move |pool| {
            let mut items: Vec<T> = kv::load_collection(&pool.conn, key)?;
            change(&mut items);
            kv::save_collection(&pool.conn, key, &items)?;
            debug!(key, len = items.len(), "collection written");

            if let Err(e) = wlog(&pool.conn, "update", key, &format!("{} items", items.len())) {
                warn!(error = %e, "failed to write internal log");
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl RecordStore for LocalStore {
    async fn append_record(&self, record: &WorkRecord) -> AppResult<()> {
        let record = record.clone();
        self.update(WORK_HISTORIES_KEY, move |items: &mut Vec<WorkRecord>| {
            items.push(record)
        })
        .await
    }

    async fn append_report(&self, report: &DailyReport) -> AppResult<()> {
        let report = report.clone();
        self.update(DAILY_REPORTS_KEY, move |items: &mut Vec<DailyReport>| {
            items.push(report)
        })
        .await
    }

    async fn load_records(&self) -> AppResult<Vec<WorkRecord>> {
        self.load(WORK_HISTORIES_KEY).await
    }

    async fn load_reports(&self) -> AppResult<Vec<DailyReport>> {
        self.load(DAILY_REPORTS_KEY).await
    }

    async fn mark_included(&self, ids: &[Uuid]) -> AppResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let ids = ids.to_vec();
        self.update(WORK_HISTORIES_KEY, move |items: &mut Vec<WorkRecord>| {
            for r in items.iter_mut().filter(|r| ids.contains(&r.id)) {
                r.daily_report_included = true;
            }
        })
        .await
    }
}
