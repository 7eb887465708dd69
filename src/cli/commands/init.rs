use crate::config::Config;
use crate::db::log;
use crate::errors::AppResult;

use crate::cli::parser::Cli;
use crate::db::initialize::init_db;
use rusqlite::Connection;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - the SQLite database (prod or test mode)
///  - all pending DB migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    if let Some(custom) = &cli.db {
        Config::init_all(Some(custom.clone()), cli.test)?;
    } else {
        Config::init_all(None, cli.test)?;
    }

    let path = Config::config_file();
    let cfg = Config::load();
    let db_path = match &cli.db {
        Some(custom) => custom.clone(),
        None => cfg.database.clone(),
    };

    println!("⚙️  Initializing gymgate…");
    println!("📄 Config file : {}", path.display());
    println!("🗄️  Database   : {}", &db_path);

    let conn = Connection::open(&db_path)?;
    init_db(&conn)?;

    println!("✅ Database initialized at {}", &db_path);

    // internal log (non-blocking)
    if let Err(e) = log::ttlog(
        &conn,
        "init",
        if cli.test { "New DB test" } else { "New prod DB" },
        &format!("Database initialized at {}", db_path),
    ) {
        eprintln!("⚠️ Failed to write internal log: {}", e);
    }

    Ok(())
}
