use crate::core::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for gymgate
/// Attendance session tracking for gyms over SQLite
#[derive(Parser)]
#[command(
    name = "gymgate",
    version = env!("CARGO_PKG_VERSION"),
    about = "Gym attendance tracking: QR check-in, checkout and history using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage member profiles at a gym
    Member {
        /// Gym identifier
        gym: String,

        #[arg(long = "add", help = "Add a member profile")]
        add: bool,

        #[arg(long = "list", help = "List member profiles for the gym")]
        list: bool,

        #[arg(long = "member", help = "Badge code within the gym")]
        member: Option<String>,

        #[arg(long = "user", help = "Platform account id behind the badge")]
        user: Option<String>,

        #[arg(long = "name", help = "Member display name")]
        name: Option<String>,
    },

    /// Check a member in (admin/trainer button path)
    Checkin {
        /// Gym identifier
        gym: String,

        /// Member badge code
        member: String,

        #[arg(
            long = "source",
            help = "How the session was opened: button or admin",
            default_value = "button"
        )]
        source: String,

        /// Timestamp override (YYYY-MM-DD HH:MM[:SS])
        #[arg(long = "at", hide = true)]
        at: Option<String>,
    },

    /// Check a member out
    Checkout {
        /// Gym identifier
        gym: String,

        /// Member badge code
        member: String,

        /// Timestamp override (YYYY-MM-DD HH:MM[:SS])
        #[arg(long = "at", hide = true)]
        at: Option<String>,
    },

    /// Check in by scanning a QR payload (member self-service path)
    Scan {
        /// Gym identifier is inside the payload; this is the scanning user
        #[arg(long = "user", help = "Platform account id of the scanning member")]
        user: String,

        #[arg(long = "payload", help = "The scanned QR payload (JSON)")]
        payload: String,

        /// Timestamp override (YYYY-MM-DD HH:MM[:SS])
        #[arg(long = "at", hide = true)]
        at: Option<String>,
    },

    /// Today's attendance status for a member
    Status {
        /// Gym identifier
        gym: String,

        /// Member badge code
        member: String,

        /// Timestamp override (YYYY-MM-DD HH:MM[:SS])
        #[arg(long = "at", hide = true)]
        at: Option<String>,
    },

    /// A member's past sessions, most recent first
    History {
        /// Gym identifier
        gym: String,

        /// Member badge code
        member: String,

        #[arg(long, short, help = "Maximum number of sessions to show")]
        limit: Option<i64>,

        /// Timestamp override (YYYY-MM-DD HH:MM[:SS])
        #[arg(long = "at", hide = true)]
        at: Option<String>,
    },

    /// Manage a gym's QR credential
    Qr {
        /// Gym identifier
        gym: String,

        #[arg(long = "show", help = "Show the current QR payload and enabled flag")]
        show: bool,

        #[arg(long = "rotate", help = "Regenerate the secret (invalidates printed codes)")]
        rotate: bool,

        #[arg(long = "enable", help = "Accept QR scans for this gym")]
        enable: bool,

        #[arg(long = "disable", help = "Reject QR scans for this gym")]
        disable: bool,
    },

    /// Daily check-in counts for a gym (today, yesterday, 7-day trend)
    Stats {
        /// Gym identifier
        gym: String,

        /// Date override (YYYY-MM-DD)
        #[arg(long = "at", hide = true)]
        at: Option<String>,
    },

    /// Export a member's attendance history
    Export {
        /// Gym identifier
        gym: String,

        /// Member badge code
        member: String,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
