//! Remote store: PostgREST-style record API over HTTP.

use super::RecordStore;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{DailyReport, WorkRecord};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use uuid::Uuid;

pub const WORK_HISTORIES_TABLE: &str = "workhistories";
pub const DAILY_REPORTS_TABLE: &str = "daily_reports";

/// Optional equality filters for `select`.
#[derive(Debug, Clone, Default)]
pub struct RowFilter {
    pub user_email: Option<String>,
    pub date: Option<String>,
}

/// Row as stored remotely: the entity plus its author's e-mail.
#[derive(Serialize)]
struct Row<'a, T: Serialize> {
    #[serde(flatten)]
    entity: &'a T,
    user_email: &'a str,
}

pub struct RemoteStore {
    client: Client,
    base_url: String,
    api_key: String,
    user_email: String,
}

impl RemoteStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, user_email: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            user_email: user_email.into(),
        }
    }

    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        if cfg.remote_url.trim().is_empty() || cfg.remote_api_key.trim().is_empty() {
            return Err(AppError::Config(
                "remote storage requires remote_url and remote_api_key".into(),
            ));
        }
        Ok(Self::new(&cfg.remote_url, &cfg.remote_api_key, &cfg.user_email))
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    /// Insert one row and return the stored representation.
    pub async fn insert<T: Serialize + Sync>(&self, table: &str, entity: &T) -> AppResult<serde_json::Value> {
        let row = Row {
            entity,
            user_email: &self.user_email,
        };

        let response = self
            .authorized(self.client.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await?;

        let inserted: Vec<serde_json::Value> = check(response).await?.json().await?;
        info!(table, "remote insert succeeded");
        Ok(inserted.into_iter().next().unwrap_or(serde_json::Value::Null))
    }

    pub async fn select<T: DeserializeOwned>(&self, table: &str, filter: &RowFilter) -> AppResult<Vec<T>> {
        let mut query: Vec<(&str, String)> = vec![("select", "*".to_string())];
        if let Some(email) = &filter.user_email {
            query.push(("user_email", format!("eq.{email}")));
        }
        if let Some(date) = &filter.date {
            query.push(("date", format!("eq.{date}")));
        }

        let response = self
            .authorized(self.client.get(self.table_url(table)))
            .query(&query)
            .send()
            .await?;

        let rows: Vec<T> = check(response).await?.json().await?;
        debug!(table, rows = rows.len(), "remote select succeeded");
        Ok(rows)
    }

    /// Connection check: a filtered select on the records table.
    pub async fn ping(&self) -> AppResult<usize> {
        let rows: Vec<serde_json::Value> = self
            .select(WORK_HISTORIES_TABLE, &self.own_rows())
            .await?;
        Ok(rows.len())
    }

    fn own_rows(&self) -> RowFilter {
        RowFilter {
            user_email: Some(self.user_email.clone()),
            date: None,
        }
    }
}

/// Map non-2xx responses to `HTTP <status>: <body>`.
async fn check(response: Response) -> AppResult<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(AppError::Storage(format!("HTTP {}: {}", status.as_u16(), body)))
}

#[async_trait]
impl RecordStore for RemoteStore {
    async fn append_record(&self, record: &WorkRecord) -> AppResult<()> {
        self.insert(WORK_HISTORIES_TABLE, record).await.map(|_| ())
    }

    async fn append_report(&self, report: &DailyReport) -> AppResult<()> {
        self.insert(DAILY_REPORTS_TABLE, report).await.map(|_| ())
    }

    async fn load_records(&self) -> AppResult<Vec<WorkRecord>> {
        self.select(WORK_HISTORIES_TABLE, &self.own_rows()).await
    }

    async fn load_reports(&self) -> AppResult<Vec<DailyReport>> {
        self.select(DAILY_REPORTS_TABLE, &self.own_rows()).await
    }

    async fn mark_included(&self, ids: &[Uuid]) -> AppResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let list = ids
            .iter()
            .map(Uuid::to_string)
            .collect::<Vec<_>>()
            .join(",");

        let response = self
            .authorized(self.client.patch(self.table_url(WORK_HISTORIES_TABLE)))
            .query(&[("id", format!("in.({list})"))])
            .json(&serde_json::json!({ "daily_report_included": true }))
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }
}
