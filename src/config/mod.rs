use crate::core::engine::DEFAULT_STALE_AFTER_HOURS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_stale_after_hours")]
    pub stale_after_hours: i64,
    #[serde(default = "default_history_limit")]
    pub history_limit: i64,
}

fn default_stale_after_hours() -> i64 {
    DEFAULT_STALE_AFTER_HOURS
}
fn default_history_limit() -> i64 {
    20
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            stale_after_hours: default_stale_after_hours(),
            history_limit: default_history_limit(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("gymgate")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".gymgate")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("gymgate.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("gymgate.sqlite")
    }

    /// Staleness threshold as a chrono duration.
    pub fn stale_after(&self) -> chrono::Duration {
        chrono::Duration::hours(self.stale_after_hours.max(1))
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Self {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path).expect("❌ Failed to read configuration file");
            serde_yaml::from_str(&content).expect("❌ Failed to parse configuration file")
        } else {
            Config::default()
        }
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> io::Result<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            stale_after_hours: default_stale_after_hours(),
            history_limit: default_history_limit(),
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| io::Error::other(e.to_string()))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(())
    }

    /// Report missing fields in the on-disk config file (serde would fill
    /// them with defaults on load; this makes the gaps visible).
    pub fn check() -> Vec<&'static str> {
        let path = Self::config_file();
        let mut missing = Vec::new();

        let Ok(content) = fs::read_to_string(&path) else {
            return vec!["<config file not found>"];
        };
        let Ok(raw) = serde_yaml::from_str::<serde_yaml::Value>(&content) else {
            return vec!["<config file not parseable>"];
        };

        for field in ["database", "stale_after_hours", "history_limit"] {
            if raw.get(field).is_none() {
                missing.push(field);
            }
        }
        missing
    }
}
