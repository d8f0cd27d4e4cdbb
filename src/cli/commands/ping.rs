use crate::config::{Config, StorageMode};
use crate::errors::AppResult;
use crate::store::RemoteStore;
use crate::ui::messages::{error, info, success, warning};

/// Handle the `ping` command: check the remote store and report whether
/// the generative backend is configured.
pub async fn handle(cfg: &Config) -> AppResult<()> {
    if cfg.ai_enabled() {
        info(format!("Generative backend: Gemini ({})", cfg.gemini_model));
    } else {
        warning("Generative backend: not configured (static prompts in use)");
    }

    if cfg.storage == StorageMode::Local {
        info(format!("Local storage in use: {}", cfg.database));
        return Ok(());
    }

    info(format!("Remote store: {}", cfg.remote_url));
    let store = RemoteStore::from_config(cfg)?;
    match store.ping().await {
        Ok(rows) => {
            success(format!("Connected to the remote store ({rows} rows visible)."));
            Ok(())
        }
        Err(e) => {
            error(format!("Remote store connection failed: {e}"));
            Err(e)
        }
    }
}
