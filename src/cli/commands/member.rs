use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::members::{insert_member, list_members};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use chrono::Local;

/// Handle the `member` command: maintain the local membership projection.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Member {
        gym,
        add,
        list,
        member,
        user,
        name,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if *add {
            let member = member
                .as_deref()
                .ok_or_else(|| AppError::Config("Missing --member with --add".into()))?;
            let user = user
                .as_deref()
                .ok_or_else(|| AppError::Config("Missing --user with --add".into()))?;
            let name = name.as_deref().unwrap_or(member);

            insert_member(
                &pool.conn,
                gym,
                member,
                user,
                name,
                &Local::now().to_rfc3339(),
            )?;

            if let Err(e) = ttlog(
                &pool.conn,
                "member_add",
                member,
                &format!("Added member {} (user {}) at gym {}", member, user, gym),
            ) {
                eprintln!("⚠️ Failed to write internal log: {}", e);
            }

            success(format!("Added member {} ({}) at gym {}.", member, name, gym));
        }

        if *list {
            let members = list_members(&pool.conn, gym)?;
            if members.is_empty() {
                println!("No members at gym {}.", gym);
                return Ok(());
            }

            println!("👥 Members at gym {}:\n", gym);
            for m in &members {
                println!("{:>4}: {:<12} {:<12} {}", m.id, m.member_id, m.user_id, m.name);
            }
        }
    }

    Ok(())
}
