use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One completed work activity.
///
/// `start_time`, `end_time` and `duration` stay `None` when the time-range
/// answer could not be read; every free-text field defaults to "".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub user_name: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub work_type: String,
    #[serde(default)]
    pub start_time: Option<String>, // "HH:MM"
    #[serde(default)]
    pub end_time: Option<String>, // "HH:MM"
    #[serde(default)]
    pub duration: Option<i64>, // minutes, end - start
    #[serde(default)]
    pub work_detail: String,
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub issues: String,
    pub created_at: String, // RFC 3339
    #[serde(default)]
    pub daily_report_included: bool,
}

impl WorkRecord {
    /// Empty shell created when a recording conversation starts.
    pub fn shell(user_name: &str, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            user_name: user_name.to_string(),
            client_name: String::new(),
            work_type: String::new(),
            start_time: None,
            end_time: None,
            duration: None,
            work_detail: String::new(),
            result: String::new(),
            issues: String::new(),
            created_at: Local::now().to_rfc3339(),
            daily_report_included: false,
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Duration in minutes, zero when unknown.
    pub fn minutes(&self) -> i64 {
        self.duration.unwrap_or(0)
    }

    pub fn start_str(&self) -> &str {
        self.start_time.as_deref().unwrap_or("")
    }

    pub fn end_str(&self) -> &str {
        self.end_time.as_deref().unwrap_or("")
    }
}
