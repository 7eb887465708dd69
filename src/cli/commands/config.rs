use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

pub fn handle(cmd: &Commands, _cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        if *print_config {
            let config = Config::load();
            println!("📄 Current configuration:");
            println!(
                "{}",
                serde_yaml::to_string(&config).unwrap_or_else(|_| "<unprintable>".to_string())
            );
        }

        if *check {
            let missing = Config::check();
            if missing.is_empty() {
                success("Configuration file is complete.");
            } else {
                for field in missing {
                    warning(format!("Missing field: {}", field));
                }
            }
        }
    }

    Ok(())
}
