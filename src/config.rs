//! Settings and per-run configuration.

use crate::error::Result;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Cabinet Office list of national holidays, Shift_JIS encoded
pub const DEFAULT_URL: &str = "https://www8.cao.go.jp/chosei/shukujitsu/syukujitsu.csv";
/// Cache file name, relative to the working directory
pub const DEFAULT_CACHE_PATH: &str = "holidays.csv";

/// Where holiday data comes from and where it is kept.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Source of the holiday CSV
    #[serde(default = "default_url")]
    pub url: String,
    /// Local cache of the converted CSV
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,
    /// Download timeout (in seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Settings {
    /// Load settings from `jpcal.toml` in the working directory (if present) and
    /// `JPCAL_*` environment variables, the latter taking precedence.
    pub fn load() -> Result<Settings> {
        Settings::load_from("jpcal")
    }

    /// Same as [`Settings::load`] with an explicit file name (extension optional)
    pub fn load_from(file: &str) -> Result<Settings> {
        let config = Config::builder()
            .add_source(File::with_name(file).required(false))
            .add_source(Environment::with_prefix("JPCAL").try_parsing(true))
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: default_url(),
            cache_path: default_cache_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn default_cache_path() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_PATH)
}

fn default_timeout_secs() -> u64 {
    30
}

/// What to do about the holiday cache before rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataSource {
    /// Ask before downloading a missing cache
    #[default]
    Prompt,
    /// Download a missing cache without asking
    Download,
    /// Download even if a cache exists
    Refresh,
    /// Never touch the network
    Offline,
}

/// Everything a single run needs, built once from the command line.
/// Missing year or month are asked for interactively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunConfig {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub source: DataSource,
    /// Print the month's holidays as JSON instead of a calendar
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.url, DEFAULT_URL);
        assert_eq!(settings.cache_path, PathBuf::from("holidays.csv"));
        assert_eq!(settings.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_settings_from_file() {
        let dir = std::env::temp_dir().join(format!("jpcal-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join("jpcal.toml");
        fs::write(&file, "cache_path = \"/tmp/shukujitsu.csv\"\ntimeout_secs = 5\n").unwrap();

        let settings = Settings::load_from(dir.join("jpcal").to_str().unwrap()).unwrap();
        assert_eq!(settings.cache_path, PathBuf::from("/tmp/shukujitsu.csv"));
        assert_eq!(settings.timeout_secs, 5);
        assert_eq!(settings.url, DEFAULT_URL);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load_from("no-such-jpcal-config").unwrap();
        assert_eq!(settings.timeout_secs, Settings::default().timeout_secs);
    }
}
