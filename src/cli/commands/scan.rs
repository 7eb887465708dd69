use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::qr::scan::handle_scan;
use crate::ui::messages::{success, warning};
use crate::utils::time::{now_local, parse_optional_dt};

/// Handle the `scan` command (member self-service QR path).
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Scan { user, payload, at } = cmd {
        let now = parse_optional_dt(at.as_ref())?.unwrap_or_else(now_local);

        let pool = DbPool::new(&cfg.database)?;

        match handle_scan(&pool.conn, payload, user, now, cfg.stale_after()) {
            Ok(session) => {
                success(format!(
                    "Checked in at gym {} ({}).",
                    session.gym_id,
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
