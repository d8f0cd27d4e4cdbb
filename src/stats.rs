//! Totals over recorded activities.

use crate::models::{DailyReport, WorkRecord};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    pub records: usize,
    pub total_minutes: i64,
    pub clients: usize,
    pub work_types: usize,
    pub reports: usize,
}

impl Stats {
    pub fn compute(records: &[WorkRecord], reports: &[DailyReport]) -> Self {
        let clients: HashSet<&str> = records.iter().map(|r| r.client_name.as_str()).collect();
        let work_types: HashSet<&str> = records.iter().map(|r| r.work_type.as_str()).collect();

        Self {
            records: records.len(),
            total_minutes: records.iter().map(WorkRecord::minutes).sum(),
            clients: clients.len(),
            work_types: work_types.len(),
            reports: reports.len(),
        }
    }
}
