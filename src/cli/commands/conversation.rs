//! Interactive loop shared by `record` and `report`.

use crate::ai::GeminiClient;
use crate::config::Config;
use crate::engine::{PromptSource, Session, SessionOptions};
use crate::errors::{AppError, AppResult};
use crate::models::ConversationMessage;
use crate::store::open_store;
use crate::ui::messages::{render, warning};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Wire store, prompt source and options from the configuration.
pub fn build_session(cfg: &Config) -> AppResult<Session> {
    let store = open_store(cfg)?;

    let prompts = if cfg.ai_enabled() {
        let client = GeminiClient::new(cfg.gemini_api_key.clone(), cfg.gemini_model.clone());
        PromptSource::generative(Arc::new(client), cfg.synthesis_timeout())
    } else {
        PromptSource::Static
    };

    let options = SessionOptions {
        user_name: cfg.user_name.clone(),
        typing_delay: cfg.typing_delay(),
        time_range_policy: cfg.time_range_policy,
    };

    Ok(Session::new(store, prompts, options))
}

/// Read answers from stdin until the session goes idle.
pub async fn converse(session: &mut Session, opening: Vec<ConversationMessage>) -> AppResult<()> {
    opening.iter().for_each(render);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while session.is_active() {
        print!("> ");
        std::io::stdout().flush().ok();

        let Some(line) = lines.next_line().await? else {
            println!();
            warning("Input closed before the conversation finished; nothing was saved.");
            break;
        };

        // blank lines are not turns
        if line.trim().is_empty() {
            continue;
        }

        match session.submit(&line).await {
            Ok(messages) => messages.iter().for_each(render),
            Err(AppError::InvalidState(msg)) => warning(msg),
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
