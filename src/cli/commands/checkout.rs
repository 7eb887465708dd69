use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{eligibility, engine};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::time::{now_local, parse_optional_dt};

/// Handle the `checkout` command. Checkout is always this explicit path;
/// QR scanning never closes a session.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Checkout { gym, member, at } = cmd {
        let now = parse_optional_dt(at.as_ref())?.unwrap_or_else(now_local);

        let pool = DbPool::new(&cfg.database)?;

        let result = eligibility::resolve_member_by_code(&pool.conn, member, gym).and_then(
            |profile| {
                engine::check_out(&pool.conn, gym, &profile.member_id, now, cfg.stale_after())
            },
        );

        match result {
            Ok(session) => {
                success(format!(
                    "Checked out {} from gym {} ({}).",
                    member,
                    gym,
                    session.check_out_str()
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
