//! Process environment and identity lookups.
//!
//! Everything the tool needs from the outside world (environment variables,
//! working directory, home directory, login name, git configuration) goes
//! through [`Environment`], so configuration and gitignore loading can be
//! exercised with a fixed environment in tests.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Command;

#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("failed to run git config: {source}")]
    GitSpawn { source: std::io::Error },
    #[error("git config --get {key} failed: {stderr}")]
    GitConfig { key: String, stderr: String },
}

pub trait Environment {
    /// Value of an environment variable, `None` when unset or not unicode.
    fn var(&self, key: &str) -> Option<String>;

    fn current_dir(&self) -> std::io::Result<PathBuf>;

    fn home_dir(&self) -> Option<PathBuf>;

    /// Login name of the current user.
    fn username(&self) -> Option<String>;

    /// Read a single git configuration value. `Ok(None)` when unset.
    fn git_config(&self, key: &str) -> Result<Option<String>, EnvError>;
}

/// [`Environment`] backed by the running process.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEnv;

impl Environment for SystemEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn current_dir(&self) -> std::io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    /// Account name from the OS user database, then the login variables.
    fn username(&self) -> Option<String> {
        match whoami::fallible::username() {
            Ok(name) if !name.trim().is_empty() => return Some(name.trim().to_string()),
            Ok(_) => log::debug!("identity lookup returned an empty username"),
            Err(err) => log::debug!("identity lookup failed: {err}"),
        }

        ["USER", "USERNAME", "LOGNAME"]
            .iter()
            .filter_map(|key| self.var(key))
            .map(|name| name.trim().to_string())
            .find(|name| !name.is_empty())
    }

    fn git_config(&self, key: &str) -> Result<Option<String>, EnvError> {
        let output = match Command::new("git").args(["config", "--get", key]).output() {
            Ok(output) => output,
            Err(source) if source.kind() == ErrorKind::NotFound => {
                log::debug!("git not found, treating {key} as unset");
                return Ok(None);
            }
            Err(source) => return Err(EnvError::GitSpawn { source }),
        };

        if output.status.success() {
            let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
            return Ok((!value.is_empty()).then_some(value));
        }

        // Exit code 1 means the key is not set.
        if output.status.code() == Some(1) {
            return Ok(None);
        }

        Err(EnvError::GitConfig {
            key: key.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}
