use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::query::day_counts;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::colors::{CYAN, GREEN, RESET};
use crate::utils::time::parse_date;
use chrono::Local;

/// Handle the `stats` command: dashboard aggregates for one gym.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { gym, at } = cmd {
        let today = match at {
            Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => Local::now().date_naive(),
        };

        let pool = DbPool::new(&cfg.database)?;
        let counts = day_counts(&pool.conn, gym, today)?;

        println!();
        println!("{}• Gym:{} {}", CYAN, RESET, gym);
        println!(
            "{}• Check-ins today:{} {}{}{}",
            CYAN, RESET, GREEN, counts.today, RESET
        );
        println!(
            "{}• Check-ins yesterday:{} {}",
            CYAN, RESET, counts.yesterday
        );
        println!("{}• 7-day trend:{}", CYAN, RESET);
        for (day, count) in &counts.trend {
            println!("    {}  {:>4}  {}", day, count, "▪".repeat(*count as usize));
        }
        println!();
    }

    Ok(())
}
