//! meetlight configuration.
//!
//! Stored at ~/.config/meetlight/config.toml. The file is optional; every
//! key falls back to its default.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{CoreError, CoreResult};
use crate::evaluator::DEFAULT_LOOKAHEAD;
use crate::policy::PolicyWindow;

fn default_office_days() -> Vec<u32> {
    vec![0, 1, 2, 3, 4]
}

fn default_office_hours() -> [u32; 2] {
    [9, 20]
}

fn default_lookahead() -> usize {
    DEFAULT_LOOKAHEAD
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Office weekdays, 0 = Monday
    #[serde(default = "default_office_days")]
    pub office_days: Vec<u32>,

    /// Office hours as `[start, end)`
    #[serde(default = "default_office_hours")]
    pub office_hours: [u32; 2],

    /// Number of upcoming events inspected per poll
    #[serde(default = "default_lookahead")]
    pub lookahead: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            office_days: default_office_days(),
            office_hours: default_office_hours(),
            lookahead: default_lookahead(),
        }
    }
}

impl Config {
    pub fn config_dir() -> CoreResult<PathBuf> {
        Ok(dirs::config_dir()
            .ok_or_else(|| CoreError::Config("Could not determine config directory".into()))?
            .join("meetlight"))
    }

    pub fn config_path() -> CoreResult<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the config at `path`, or defaults if the file does not exist.
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents).map_err(|e| {
            let message = format!("Failed to parse {}: {}", path.display(), e);
            CoreError::Config(message)
        })?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CoreResult<()> {
        if self.lookahead == 0 {
            return Err(CoreError::Config("lookahead must be at least 1".into()));
        }
        self.policy().map(|_| ())
    }

    pub fn policy(&self) -> CoreResult<PolicyWindow> {
        let [start, end] = self.office_hours;
        PolicyWindow::new(self.office_days.clone(), start..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config.lookahead, 5);
        assert_eq!(config.policy().unwrap(), PolicyWindow::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let file = write_config("office_hours = [8, 17]\n");
        let config = Config::load(file.path()).unwrap();

        let policy = config.policy().unwrap();
        assert_eq!(policy.hours(), &(8..17));
        assert_eq!(policy.weekdays(), &[0, 1, 2, 3, 4]);
        assert_eq!(config.lookahead, 5);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        for contents in [
            "office_days = [0, 9]\n",
            "office_hours = [18, 9]\n",
            "lookahead = 0\n",
            "colour_busy = [255, 0, 0]\n",
        ] {
            let file = write_config(contents);
            let result = Config::load(file.path());
            assert!(matches!(result, Err(CoreError::Config(_))), "{}", contents);
        }
    }
}
