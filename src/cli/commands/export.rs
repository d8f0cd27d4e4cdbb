use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::export_records_csv;
use crate::store::open_store;
use crate::ui::messages::warning;
use crate::utils::date::today;
use crate::utils::path::expand_tilde;

/// Handle the `export` command
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export { dir, force } = cmd {
        let store = open_store(cfg)?;
        let records = store.load_records().await?;

        if records.is_empty() {
            warning("エクスポートする履歴がありません。");
            return Ok(());
        }

        let dir = expand_tilde(dir.as_deref().unwrap_or(&cfg.export_dir));
        export_records_csv(&records, &dir, today(), *force)?;
    }
    Ok(())
}
