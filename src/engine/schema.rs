//! Fixed field sequence collected by the recording conversation.

use super::extract::{parse_time_range, passthrough};
use crate::models::WorkRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ClientName,
    WorkType,
    TimeRange,
    WorkDetail,
    Result,
    Issues,
}

/// Ordered slots, one per conversation step.
pub const FIELDS: [Field; 6] = [
    Field::ClientName,
    Field::WorkType,
    Field::TimeRange,
    Field::WorkDetail,
    Field::Result,
    Field::Issues,
];

pub const LAST_STEP: usize = FIELDS.len() - 1;

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::ClientName => "client_name",
            Field::WorkType => "work_type",
            Field::TimeRange => "start_time",
            Field::WorkDetail => "work_detail",
            Field::Result => "result",
            Field::Issues => "issues",
        }
    }

    /// Run this slot's extractor onto the record.
    ///
    /// Returns `false` on an extraction miss; the record is left untouched.
    pub fn apply(&self, record: &mut WorkRecord, input: &str) -> bool {
        match self {
            Field::ClientName => record.client_name = passthrough(input),
            Field::WorkType => record.work_type = passthrough(input),
            Field::WorkDetail => record.work_detail = passthrough(input),
            Field::Result => record.result = passthrough(input),
            Field::Issues => record.issues = passthrough(input),
            Field::TimeRange => match parse_time_range(input) {
                Some(range) => {
                    record.start_time = Some(range.start);
                    record.end_time = Some(range.end);
                    record.duration = Some(range.duration);
                }
                None => return false,
            },
        }
        true
    }
}
