use super::conversation::{build_session, converse};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::header;

/// Handle the `record` command
pub async fn handle(cfg: &Config) -> AppResult<()> {
    let mut session = build_session(cfg)?;

    header("作業履歴の記録");
    let opening = session.start_recording().await?;
    converse(&mut session, opening).await
}
