// src/export/model.rs

use crate::models::WorkRecord;
use chrono::NaiveDate;

/// Fixed 12-column header of the work-record CSV.
pub const CSV_HEADERS: [&str; 12] = [
    "ID",
    "日付",
    "氏名",
    "客先名",
    "作業種別",
    "開始時刻",
    "終了時刻",
    "所要時間(分)",
    "作業内容詳細",
    "成果・結果",
    "課題・問題点",
    "登録日時",
];

/// `work_histories_<YYYY-MM-DD>.csv`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("work_histories_{}.csv", date.format("%Y-%m-%d"))
}

/// One CSV row; unset times are empty and an unknown duration is 0.
pub fn record_to_row(r: &WorkRecord) -> [String; 12] {
    [
        r.id.to_string(),
        r.date_str(),
        r.user_name.clone(),
        r.client_name.clone(),
        r.work_type.clone(),
        r.start_str().to_string(),
        r.end_str().to_string(),
        r.minutes().to_string(),
        r.work_detail.clone(),
        r.result.clone(),
        r.issues.clone(),
        r.created_at.clone(),
    ]
}
