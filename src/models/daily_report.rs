use super::work_record::WorkRecord;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyReport {
    pub id: Uuid,
    pub date: NaiveDate,
    pub user_name: String,
    pub related_history_ids: Vec<Uuid>,
    #[serde(default)]
    pub daily_summary: String,
    #[serde(default)]
    pub achievements: String,
    #[serde(default)]
    pub tomorrow_goals: String,
    #[serde(default)]
    pub overall_issues: String,
    #[serde(default)]
    pub report_to_manager: String,
    pub created_at: String,
}

impl DailyReport {
    /// Shell snapshotting every record known at report start.
    ///
    /// Achievements and overall issues are derived from the records'
    /// outcome and issues texts, one non-empty entry per line.
    pub fn shell(user_name: &str, date: NaiveDate, records: &[WorkRecord]) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            user_name: user_name.to_string(),
            related_history_ids: records.iter().map(|r| r.id).collect(),
            daily_summary: String::new(),
            achievements: join_non_empty(records.iter().map(|r| r.result.as_str())),
            tomorrow_goals: String::new(),
            overall_issues: join_non_empty(records.iter().map(|r| r.issues.as_str())),
            report_to_manager: String::new(),
            created_at: Local::now().to_rfc3339(),
        }
    }
}

fn join_non_empty<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
