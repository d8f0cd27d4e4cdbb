use crate::config::Config;
use crate::errors::AppResult;
use crate::stats::Stats;
use crate::store::open_store;
use crate::ui::messages::header;
use crate::utils::formatting::pad_right;

/// Handle the `stats` command
pub async fn handle(cfg: &Config) -> AppResult<()> {
    let store = open_store(cfg)?;
    let records = store.load_records().await?;
    let reports = store.load_reports().await?;

    let s = Stats::compute(&records, &reports);

    header("統計");
    let rows = [
        ("作業件数", s.records.to_string()),
        ("総作業時間（分）", s.total_minutes.to_string()),
        ("訪問客先数", s.clients.to_string()),
        ("作業種別数", s.work_types.to_string()),
        ("作成済日報", s.reports.to_string()),
    ];
    for (label, value) in rows {
        println!("{} {}", pad_right(label, 18), value);
    }
    Ok(())
}
