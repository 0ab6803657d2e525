use clap::Subcommand;
use kidtime_core::{Config, FirePolicy, Locale};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "locale", "reminders.fire_policy")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

const KEYS: &[&str] = &[
    "locale",
    "reminders.default_minutes",
    "reminders.fire_policy",
    "ticker.interval_ms",
];

/// Check a value against the key it is meant for and return the spelling
/// the config file stores, e.g. `AR` becomes `ar`.
fn normalize(key: &str, value: &str) -> Result<String, String> {
    match key {
        "locale" => value
            .parse::<Locale>()
            .map(|locale| locale.code().to_string())
            .map_err(|e| e.to_string()),
        "reminders.fire_policy" => value
            .parse::<FirePolicy>()
            .map(|policy| policy.to_string())
            .map_err(|e| e.to_string()),
        "ticker.interval_ms" => match value.trim().parse::<u64>() {
            Ok(ms) if ms > 0 => Ok(ms.to_string()),
            _ => Err(format!(
                "ticker.interval_ms must be a positive number of milliseconds, got '{value}'"
            )),
        },
        "reminders.default_minutes" => value
            .trim()
            .parse::<i64>()
            .map(|minutes| minutes.to_string())
            .map_err(|_| format!("reminders.default_minutes must be whole minutes, got '{value}'")),
        _ => Err(format!(
            "unknown config key: {key} (known keys: {})",
            KEYS.join(", ")
        )),
    }
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => {
                    return Err(
                        format!("unknown config key: {key} (known keys: {})", KEYS.join(", ")).into(),
                    )
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let value = normalize(&key, &value)?;
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            println!("{key} = {value}");
        }
        ConfigAction::List => {
            let config = Config::load()?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            println!("config reset to defaults at {}", Config::path()?.display());
        }
    }
    Ok(())
}
