use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::{
    core::utils::{ensure_dir, write_atomic, PathResolver},
    currency::LocaleConfig,
    domain::{CountingPolicy, StatusBucket},
    errors::Result,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// Buckets counted as attended in attendance percentages.
    #[serde(default = "default_attendance_counted")]
    pub attendance_counted: Vec<StatusBucket>,
    /// Buckets counted as settled in fee percentages.
    #[serde(default = "default_fee_counted")]
    pub fee_counted: Vec<StatusBucket>,
    pub api_base_url: String,
    /// Lifetime of a fresh session; `None` keeps sessions until logout.
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-IN".into(),
            currency: "INR".into(),
            attendance_counted: default_attendance_counted(),
            fee_counted: default_fee_counted(),
            api_base_url: "http://localhost:3000/api".into(),
            session_ttl_hours: default_session_ttl_hours(),
        }
    }
}

impl Config {
    pub fn attendance_policy(&self) -> CountingPolicy {
        CountingPolicy::new(self.attendance_counted.iter().copied())
    }

    pub fn fee_policy(&self) -> CountingPolicy {
        CountingPolicy::new(self.fee_counted.iter().copied())
    }

    /// Locale for amounts; an unknown locale falls back to the currency code.
    pub fn locale_config(&self) -> LocaleConfig {
        LocaleConfig::lookup(&self.locale).unwrap_or_else(|| LocaleConfig::for_tag(&self.currency))
    }

    pub fn session_ttl(&self) -> Option<Duration> {
        self.session_ttl_hours
            .map(|hours| Duration::hours(i64::from(hours)))
    }
}

fn default_attendance_counted() -> Vec<StatusBucket> {
    CountingPolicy::attendance().counted.into_iter().collect()
}

fn default_fee_counted() -> Vec<StatusBucket> {
    CountingPolicy::fees().counted.into_iter().collect()
}

fn default_session_ttl_hours() -> Option<u32> {
    Some(24)
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::from_base(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    /// Defaults when no file has been saved yet.
    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_policies_match_presets() {
        let config = Config::default();
        assert_eq!(config.attendance_policy(), CountingPolicy::attendance());
        assert_eq!(config.fee_policy(), CountingPolicy::fees());
        assert_eq!(config.session_ttl(), Some(Duration::hours(24)));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = Config {
            locale: "en-US".into(),
            attendance_counted: vec![StatusBucket::Present],
            session_ttl_hours: None,
            ..Config::default()
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn older_files_without_policies_get_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(
            manager.path(),
            r#"{"locale":"en-IN","currency":"INR","api_base_url":"http://x"}"#,
        )
        .unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.attendance_policy(), CountingPolicy::attendance());
        assert_eq!(config.session_ttl_hours, Some(24));
        assert_eq!(config.session_ttl(), Config::default().session_ttl());
    }

    #[test]
    fn explicit_null_ttl_disables_expiry() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(
            manager.path(),
            r#"{"locale":"en-IN","currency":"INR","api_base_url":"http://x","session_ttl_hours":null}"#,
        )
        .unwrap();
        assert_eq!(manager.load().unwrap().session_ttl(), None);
    }

    #[test]
    fn unknown_locale_falls_back_to_currency() {
        let config = Config {
            locale: "xx-XX".into(),
            currency: "USD".into(),
            ..Config::default()
        };
        assert_eq!(config.locale_config().language_tag, "en-US");
    }
}
