use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{DailyReport, WorkRecord};
use crate::store::open_store;
use crate::ui::messages::{header, info};
use crate::utils::colors::{colorize_included, colorize_optional};
use crate::utils::date::{parse_date, today};
use crate::utils::table::{Column, Table};

pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { all, date, reports } = cmd {
        let store = open_store(cfg)?;

        if *reports {
            let reports = store.load_reports().await?;
            if reports.is_empty() {
                info("まだ日報がありません");
                return Ok(());
            }
            header("日報一覧");
            print_reports(&reports);
            return Ok(());
        }

        let mut records = store.load_records().await?;
        if !*all {
            let d = match date {
                Some(s) => parse_date(s)
                    .ok_or_else(|| AppError::InvalidDate(s.clone()))?,
                None => today(),
            };
            records.retain(|r| r.date == d);
        }

        if records.is_empty() {
            info("まだ履歴がありません");
            return Ok(());
        }

        header(match (all, date) {
            (true, _) => "全履歴",
            (false, Some(_)) => "指定日の履歴",
            (false, None) => "本日の履歴",
        });
        for r in &records {
            print_record(r);
        }
    }
    Ok(())
}

fn print_record(r: &WorkRecord) {
    let range = if r.start_time.is_some() || r.end_time.is_some() {
        format!("{} - {}", r.start_str(), r.end_str())
    } else {
        "--:--".to_string()
    };

    println!(
        "🏢 {}  {}  {} ({})  {}",
        r.date_str(),
        r.client_name,
        colorize_optional(&range),
        colorize_optional(&format!("{}分", r.minutes())),
        colorize_included(r.daily_report_included)
    );
    println!("   作業：{}", r.work_type);
    println!("   内容：{}", r.work_detail);
    println!("   成果：{}", r.result);
    if !r.issues.is_empty() {
        println!("   課題：{}", r.issues);
    }
    println!();
}

fn print_reports(reports: &[DailyReport]) {
    let mut table = Table::new(vec![
        Column::new("日付", 10),
        Column::new("件数", 4),
        Column::new("総括", 40),
        Column::new("明日の目標", 30),
    ]);

    for r in reports {
        table.add_row(vec![
            r.date.format("%Y-%m-%d").to_string(),
            r.related_history_ids.len().to_string(),
            r.daily_summary.replace('\n', " "),
            r.tomorrow_goals.replace('\n', " "),
        ]);
    }

    print!("{}", table.render());
}
