use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{eligibility, query};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::session::AttendanceSession;
use crate::ui::messages::warning;
use crate::utils::colors::{RESET, color_for_status};
use crate::utils::time::{now_local, parse_optional_dt};

/// Handle the `history` command: sessions most recent first.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::History {
        gym,
        member,
        limit,
        at,
    } = cmd
    {
        let now = parse_optional_dt(at.as_ref())?.unwrap_or_else(now_local);
        let limit = limit.unwrap_or(cfg.history_limit);

        let pool = DbPool::new(&cfg.database)?;

        let profile = match eligibility::resolve_member_by_code(&pool.conn, member, gym) {
            Ok(p) => p,
            Err(e) if e.is_expected() => {
                warning(format!("{} [{}]", e, e.code().unwrap_or_default()));
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let sessions = query::history(
            &pool.conn,
            gym,
            &profile.member_id,
            limit,
            now,
            cfg.stale_after(),
        )?;

        if sessions.is_empty() {
            println!("No sessions recorded for {} at gym {}.", member, gym);
            return Ok(());
        }

        println!("📅 Sessions for {} at gym {} (most recent first):\n", member, gym);
        for s in &sessions {
            print_session_line(s);
        }
    }

    Ok(())
}

fn print_session_line(s: &AttendanceSession) {
    let auto_closed = matches!(s.exit_type, Some(crate::models::exit_type::ExitType::Auto));
    let color = color_for_status(s.is_open(), auto_closed);

    let out = if s.is_open() {
        "(in gym)".to_string()
    } else {
        format!(
            "{} [{}]",
            s.check_out_str(),
            s.exit_type.map(|e| e.to_db_str()).unwrap_or("-")
        )
    };

    println!(
        "{:>4}: {}In {} | Out {} | via {}{}",
        s.id,
        color,
        s.check_in_str(),
        out,
        s.source.to_db_str(),
        RESET
    );
}
