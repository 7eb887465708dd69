use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::engine::{self, TodayStatus};
use crate::core::eligibility;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use crate::utils::time::{now_local, parse_optional_dt};

/// Handle the `status` command: one of not_checked_in / in_gym /
/// checked_out, plus the underlying session record.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { gym, member, at } = cmd {
        let now = parse_optional_dt(at.as_ref())?.unwrap_or_else(now_local);

        let pool = DbPool::new(&cfg.database)?;

        let profile = match eligibility::resolve_member_by_code(&pool.conn, member, gym) {
            Ok(p) => p,
            Err(e) if e.is_expected() => {
                warning(format!("{} [{}]", e, e.code().unwrap_or_default()));
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let status = engine::status_today(
            &pool.conn,
            gym,
            &profile.member_id,
            now,
            cfg.stale_after(),
        )?;

        match &status {
            TodayStatus::NotCheckedIn => {
                println!("Status: not_checked_in");
                println!("No session today for {} at gym {}.", member, gym);
            }
            TodayStatus::InGym(s) => {
                println!("Status: in_gym");
                println!(
                    "  In:     {}  (source {})",
                    s.check_in_str(),
                    s.source.to_db_str()
                );
            }
            TodayStatus::CheckedOut(s) => {
                println!("Status: checked_out");
                println!(
                    "  In:     {}  (source {})",
                    s.check_in_str(),
                    s.source.to_db_str()
                );
                println!(
                    "  Out:    {}  (exit {})",
                    s.check_out_str(),
                    s.exit_type.map(|e| e.to_db_str()).unwrap_or("-")
                );
            }
        }
    }

    Ok(())
}
