//! Base directory resolution.
//!
//! The base directory comes from `MEMO_ROOT_DIR` when set (absolute paths
//! only), otherwise `<cwd>/.<username>/memo`.

use crate::env::Environment;
use crate::util::{clean_path, relative_to, to_slash};
use std::path::{Path, PathBuf};

pub const MEMO_ROOT_DIR_ENV: &str = "MEMO_ROOT_DIR";

/// Directory name used when the username cannot be determined.
pub const FALLBACK_USER_DIR: &str = "memo";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("MEMO_ROOT_DIR must be an absolute path, got {}", .path.display())]
    RelativeOverride { path: PathBuf },
    #[error("failed to get current directory: {source}")]
    CurrentDir { source: std::io::Error },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_dir: PathBuf,
}

impl Config {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: clean_path(&base_dir.into()),
        }
    }

    pub fn from_env(env: &impl Environment) -> Result<Self, ConfigError> {
        let base_dir = resolve_base_dir(env)?;
        log::debug!("memo base directory: {}", base_dir.display());
        Ok(Self::new(base_dir))
    }

    /// The `.gitignore` line covering the base directory, relative to `cwd`
    /// with forward slashes and a trailing slash.
    pub fn ignore_pattern(&self, cwd: &Path) -> String {
        let rel = relative_to(cwd, &self.base_dir).unwrap_or_else(|| self.base_dir.clone());
        let mut pattern = to_slash(&rel);
        if !pattern.ends_with('/') {
            pattern.push('/');
        }
        pattern
    }
}

fn resolve_base_dir(env: &impl Environment) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = env.var(MEMO_ROOT_DIR_ENV)
        && !dir.is_empty()
    {
        let path = PathBuf::from(dir);
        if !path.is_absolute() {
            return Err(ConfigError::RelativeOverride { path });
        }
        return Ok(path);
    }

    let cwd = env
        .current_dir()
        .map_err(|source| ConfigError::CurrentDir { source })?;
    let username = env
        .username()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_USER_DIR.to_string());

    Ok(cwd.join(format!(".{username}")).join("memo"))
}
