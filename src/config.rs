use std::path::PathBuf;

use serde::Deserialize;

use crate::theme::ThemeConfig;

/// The closed category set used when the config names none.
pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Cricket",
    "Darts",
    "Rugby Union",
    "Rugby League",
    "MotorSports",
    "Aussie Rules",
    "Boxing",
    "Snooker",
];

pub const DEFAULT_SNOOZE_MINUTES: i64 = 2;
pub const DEFAULT_POLL_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub categories: Vec<String>,
    pub data_file: PathBuf,
    pub snooze_minutes: i64,
    pub poll_secs: u64,
    pub sound: bool,
    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            data_file: default_data_file(),
            snooze_minutes: DEFAULT_SNOOZE_MINUTES,
            poll_secs: DEFAULT_POLL_SECS,
            sound: true,
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the platform config directory (loaded once
    /// at startup). A missing or unparseable file yields the defaults.
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        let Ok(content) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        toml::from_str::<RawConfig>(&content)
            .map(RawConfig::into_config)
            .unwrap_or_default()
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("reminders-tui").join("config.toml"))
}

fn default_data_file() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("reminders-tui").join("reminders.json"))
        .unwrap_or_else(|| PathBuf::from("reminders.json"))
}

#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    categories: Option<Vec<String>>,
    data_file: Option<PathBuf>,
    snooze_minutes: Option<i64>,
    poll_secs: Option<u64>,
    sound: Option<bool>,
    theme: Option<ThemeConfig>,
}

impl RawConfig {
    fn into_config(self) -> Config {
        let mut config = Config::default();

        if let Some(categories) = self.categories {
            if !categories.is_empty() {
                config.categories = categories;
            }
        }
        if let Some(path) = self.data_file {
            config.data_file = path;
        }
        if let Some(minutes) = self.snooze_minutes {
            config.snooze_minutes = minutes.max(1);
        }
        if let Some(secs) = self.poll_secs {
            config.poll_secs = secs.max(1);
        }
        if let Some(sound) = self.sound {
            config.sound = sound;
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.categories.len(), 8);
        assert!(config.categories.iter().any(|c| c == "Cricket"));
        assert_eq!(config.snooze_minutes, 2);
        assert_eq!(config.poll_secs, 10);
        assert!(config.sound);
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let raw: RawConfig = toml::from_str("").unwrap();
        let config = raw.into_config();
        assert_eq!(config.categories, Config::default().categories);
        assert_eq!(config.data_file, Config::default().data_file);
    }

    #[test]
    fn test_partial_toml_overrides_named_keys_only() {
        let raw: RawConfig = toml::from_str(
            r#"
            categories = ["Cricket", "Darts"]
            snooze_minutes = 5
            sound = false
            "#,
        )
        .unwrap();
        let config = raw.into_config();
        assert_eq!(config.categories, vec!["Cricket", "Darts"]);
        assert_eq!(config.snooze_minutes, 5);
        assert!(!config.sound);
        assert_eq!(config.poll_secs, DEFAULT_POLL_SECS);
    }

    #[test]
    fn test_bad_values_are_clamped() {
        let raw: RawConfig = toml::from_str(
            r#"
            categories = []
            snooze_minutes = 0
            poll_secs = 0
            "#,
        )
        .unwrap();
        let config = raw.into_config();
        assert_eq!(config.categories.len(), 8);
        assert_eq!(config.snooze_minutes, 1);
        assert_eq!(config.poll_secs, 1);
    }
}
