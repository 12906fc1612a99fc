//! Runtime configuration, read from environment variables.
//!
//! | variable                      | default                          |
//! |-------------------------------|----------------------------------|
//! | `HOLIDAY_DATA_DIR`            | directory of the executable      |
//! | `HOLIDAY_SOURCE_URL`          | [`DEFAULT_SOURCE_URL`]           |
//! | `HOLIDAY_FETCH_TIMEOUT_SECS`  | `30`                             |
//! | `HOLIDAY_GIT`                 | `git`                            |

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::app::DEFAULT_FETCH_TIMEOUT;
use crate::impls::YEAR_PLACEHOLDER;

pub const ENV_DATA_DIR: &str = "HOLIDAY_DATA_DIR";
pub const ENV_SOURCE_URL: &str = "HOLIDAY_SOURCE_URL";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "HOLIDAY_FETCH_TIMEOUT_SECS";
pub const ENV_GIT: &str = "HOLIDAY_GIT";

pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/NateScarlet/holiday-cn/master/{year}.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key}={value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("cannot determine the directory of the running executable")]
    ExecutableDir(#[source] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Git work tree holding `<year>.json` files.
    pub data_dir: PathBuf,
    /// URL with a `{year}` placeholder.
    pub source_url: String,
    pub fetch_timeout: Duration,
    pub git_program: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map here).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = match value(ENV_DATA_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => executable_dir()?,
        };

        let source_url = value(ENV_SOURCE_URL).unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string());
        if !source_url.contains(YEAR_PLACEHOLDER) {
            return Err(ConfigError::Invalid {
                key: ENV_SOURCE_URL,
                value: source_url,
                reason: format!("must contain {YEAR_PLACEHOLDER}"),
            });
        }

        let fetch_timeout = match value(ENV_FETCH_TIMEOUT_SECS) {
            None => DEFAULT_FETCH_TIMEOUT,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        key: ENV_FETCH_TIMEOUT_SECS,
                        value: raw,
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        key: ENV_FETCH_TIMEOUT_SECS,
                        value: raw,
                        reason: e.to_string(),
                    });
                }
            },
        };

        let git_program = value(ENV_GIT).unwrap_or_else(|| "git".to_string());

        Ok(Self {
            data_dir,
            source_url,
            fetch_timeout,
            git_program,
        })
    }
}

/// 実行ファイルのあるディレクトリ（`HOLIDAY_DATA_DIR` が無いときの既定値）
pub fn executable_dir() -> Result<PathBuf, ConfigError> {
    let exe = std::env::current_exe().map_err(ConfigError::ExecutableDir)?;
    exe.parent()
        .map(|dir| dir.to_path_buf())
        .ok_or_else(|| {
            ConfigError::ExecutableDir(std::io::Error::other(format!(
                "{} has no parent directory",
                exe.display()
            )))
        })
}
