use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::export_history;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Handle the `export` command.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        gym,
        member,
        format,
        file,
        force,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        let rows = export_history(&mut pool, gym, member, *format, file, *force)?;

        success(format!(
            "Exported {} session(s) for {} at gym {} to {}.",
            rows, member, gym, file
        ));
    }

    Ok(())
}
