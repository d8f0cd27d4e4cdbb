use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::path::Path;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    else {
        return Ok(());
    };

    if *print_config {
        println!("📄 Current configuration:\n");
        println!("{}", cfg.redacted().to_yaml()?);
    }

    if *edit_config {
        let path = Config::config_file();
        if !path.exists() {
            info("No configuration file yet; run `rworklog init` first.");
            return Ok(());
        }

        let fallback = default_editor();
        let requested = editor.clone().unwrap_or_else(|| fallback.clone());

        if open_in(&requested, &path) {
            success(format!("Configuration file edited with '{requested}'"));
        } else if requested != fallback && open_in(&fallback, &path) {
            warning(format!("Editor '{requested}' not available, used '{fallback}'"));
        } else {
            return Err(AppError::Config(format!(
                "could not open {} with '{requested}'",
                path.display()
            )));
        }
    }

    Ok(())
}

/// $EDITOR, then $VISUAL, then the platform default.
fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

fn open_in(editor: &str, path: &Path) -> bool {
    Command::new(editor)
        .arg(path)
        .status()
        .is_ok_and(|s| s.success())
}
