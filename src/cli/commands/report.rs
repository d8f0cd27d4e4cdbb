use super::conversation::{build_session, converse};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::header;

/// Handle the `report` command
///
/// With no recorded activity the session stays idle and only the notice
/// is shown.
pub async fn handle(cfg: &Config) -> AppResult<()> {
    let mut session = build_session(cfg)?;

    header("日報作成");
    let opening = session.start_report().await?;
    converse(&mut session, opening).await
}
