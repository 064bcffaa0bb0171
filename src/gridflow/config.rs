use crate::error::{GridflowError, Result};
use crate::history::DEFAULT_MAX_HISTORY;
use crate::model::Theme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_AUTO_SAVE_INTERVAL_MS: u64 = 30_000;

/// Keys accepted by [`EditorConfig::get`] and [`EditorConfig::set`].
pub const CONFIG_KEYS: [&str; 4] = [
    "auto-save-interval-ms",
    "max-history",
    "theme",
    "case-sensitive",
];

/// Editor configuration, stored in `<dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EditorConfig {
    /// Auto-save period in milliseconds; 0 disables auto-save
    #[serde(default = "default_auto_save_interval_ms")]
    pub auto_save_interval_ms: u64,

    /// Maximum undo (and redo) depth
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    #[serde(default)]
    pub theme: Theme,

    /// Initial case sensitivity for search and replace
    #[serde(default)]
    pub case_sensitive: bool,
}

fn default_auto_save_interval_ms() -> u64 {
    DEFAULT_AUTO_SAVE_INTERVAL_MS
}

fn default_max_history() -> usize {
    DEFAULT_MAX_HISTORY
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            auto_save_interval_ms: DEFAULT_AUTO_SAVE_INTERVAL_MS,
            max_history: DEFAULT_MAX_HISTORY,
            theme: Theme::default(),
            case_sensitive: false,
        }
    }
}

impl EditorConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(GridflowError::Io)?;
        let config: EditorConfig =
            serde_json::from_str(&content).map_err(GridflowError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(GridflowError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(GridflowError::Serialization)?;
        fs::write(config_path, content).map_err(GridflowError::Io)?;
        Ok(())
    }

    /// `None` when auto-save is disabled.
    pub fn auto_save_interval(&self) -> Option<Duration> {
        match self.auto_save_interval_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    pub fn with_auto_save_interval(mut self, interval: Duration) -> Self {
        self.auto_save_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn without_auto_save(mut self) -> Self {
        self.auto_save_interval_ms = 0;
        self
    }

    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "auto-save-interval-ms" => Some(self.auto_save_interval_ms.to_string()),
            "max-history" => Some(self.max_history.to_string()),
            "theme" => Some(self.theme.to_string()),
            "case-sensitive" => Some(self.case_sensitive.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "auto-save-interval-ms" => {
                self.auto_save_interval_ms = parse_value(key, value)?;
            }
            "max-history" => {
                self.max_history = parse_value(key, value)?;
            }
            "theme" => {
                self.theme = value.parse()?;
            }
            "case-sensitive" => {
                self.case_sensitive = parse_value(key, value)?;
            }
            _ => return Err(GridflowError::Config(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| GridflowError::Config(format!("Invalid value for {}: {}", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.auto_save_interval_ms, 30_000);
        assert_eq!(config.max_history, 100);
        assert_eq!(config.theme, Theme::Light);
        assert!(!config.case_sensitive);
    }

    #[test]
    fn test_zero_interval_disables_auto_save() {
        let config = EditorConfig::default().without_auto_save();
        assert_eq!(config.auto_save_interval(), None);

        let config = EditorConfig::default().with_auto_save_interval(Duration::from_millis(250));
        assert_eq!(config.auto_save_interval(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = EditorConfig::load(temp_dir.path().join("nope")).unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILENAME), r#"{"theme": "dark"}"#).unwrap();

        let config = EditorConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.max_history, 100);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("gridflow");

        let mut config = EditorConfig::default();
        config.set("max-history", "25").unwrap();
        config.set("theme", "dark").unwrap();
        config.save(&dir).unwrap();

        let loaded = EditorConfig::load(&dir).unwrap();
        assert_eq!(loaded.max_history, 25);
        assert_eq!(loaded.theme, Theme::Dark);
    }

    #[test]
    fn test_get_and_set_by_key() {
        let mut config = EditorConfig::default();
        for key in CONFIG_KEYS {
            assert!(config.get(key).is_some(), "{} should be readable", key);
        }
        config.set("case-sensitive", "true").unwrap();
        assert_eq!(config.get("case-sensitive").as_deref(), Some("true"));

        assert!(matches!(
            config.set("max-history", "lots"),
            Err(GridflowError::Config(_))
        ));
        assert!(matches!(
            config.set("theme", "sepia"),
            Err(GridflowError::InvalidTheme(_))
        ));
        assert!(matches!(
            config.set("font", "mono"),
            Err(GridflowError::Config(_))
        ));
        assert_eq!(config.get("font"), None);
    }
}
