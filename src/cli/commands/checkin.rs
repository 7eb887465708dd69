use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{eligibility, engine};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::source::CheckInSource;
use crate::ui::messages::{success, warning};
use crate::utils::time::{now_local, parse_optional_dt};

/// Handle the `checkin` command (admin/trainer button path).
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Checkin {
        gym,
        member,
        source,
        at,
    } = cmd
    {
        let source = CheckInSource::from_code(source)
            .filter(|s| !matches!(s, CheckInSource::QrScan))
            .ok_or_else(|| AppError::InvalidSource(source.clone()))?;

        let now = parse_optional_dt(at.as_ref())?.unwrap_or_else(now_local);

        let pool = DbPool::new(&cfg.database)?;

        let result = eligibility::resolve_member_by_code(&pool.conn, member, gym).and_then(
            |profile| {
                engine::check_in(
                    &pool.conn,
                    gym,
                    &profile.member_id,
                    source,
                    now,
                    cfg.stale_after(),
                )
            },
        );

        match result {
            Ok(session) => {
                success(format!(
                    "Checked in {} at gym {} ({}).",
                    member,
                    gym,
                    session.check_in_str()
                ));
            }
            Err(e) if e.is_expected() => {
                warning(format!("{} [{}]", e, e.code().unwrap_or_default()));
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
