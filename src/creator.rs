//! Memo file and directory creation.
//!
//! Layout: `<base>/<YYYYMMDD>/<HH-MM-SS>[-<name>][.<ext>]`.
//!
//! # Key Functions
//!
//! - [`Creator::create`]: Create an empty memo file
//! - [`Creator::create_directory`]: Create a memo directory
//! - [`Creator::check_gitignore`]: Advisory check that the base directory is ignored

use crate::config::Config;
use crate::env::Environment;
use crate::filename::{date_dir, generate_filename, now};
use crate::gitignore::Matcher;
use crate::sanitize::{DEFAULT_EXTENSION, SanitizeError, sanitize_extension, sanitize_name};
use std::fmt;
use std::fs::{DirBuilder, OpenOptions};
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error(transparent)]
    Sanitize(#[from] SanitizeError),
    #[error("cannot use --directory and --ext together")]
    DirectoryWithExtension,
    #[error("failed to create base directory {}: {source}", .path.display())]
    BaseDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to create date directory {}: {source}", .path.display())]
    DateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to create memo file {}: {source}", .path.display())]
    File {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to create memo directory {}: {source}", .path.display())]
    Directory {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What a `new` invocation produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    File { ext: String },
    Directory,
}

impl Mode {
    /// Validate the CLI flag combination. Directory mode only accepts the
    /// default extension.
    pub fn from_flags(directory: bool, ext: &str) -> Result<Self, CreateError> {
        if directory {
            if ext != DEFAULT_EXTENSION {
                return Err(CreateError::DirectoryWithExtension);
            }
            return Ok(Self::Directory);
        }
        Ok(Self::File {
            ext: ext.to_string(),
        })
    }
}

/// Advisory message shown when the base directory is not gitignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitignoreWarning {
    /// Line to add to `.gitignore`, e.g. `.alice/memo/`.
    pub suggestion: String,
}

impl fmt::Display for GitignoreWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "⚠️  Warning: Memo directory is not in .gitignore")?;
        writeln!(f, "    Please add the following line to your .gitignore:")?;
        write!(f, "    {}", self.suggestion)
    }
}

#[derive(Debug, Clone)]
pub struct Creator {
    config: Config,
}

impl Creator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn create(&self, name: &str, ext: &str) -> Result<PathBuf, CreateError> {
        self.create_at(name, ext, now())
    }

    /// Create an empty memo file named after `at`. Returns its absolute path.
    pub fn create_at(
        &self,
        name: &str,
        ext: &str,
        at: OffsetDateTime,
    ) -> Result<PathBuf, CreateError> {
        let ext = sanitize_extension(ext)?;
        let dir = self.prepare_date_dir(at)?;
        let filename = generate_filename(&sanitize_name(name), at);
        let path = dir.join(format!("{filename}.{ext}"));

        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|source| CreateError::File {
                path: path.clone(),
                source,
            })?;

        log::debug!("created memo file {}", path.display());
        Ok(path)
    }

    pub fn create_directory(&self, name: &str) -> Result<PathBuf, CreateError> {
        self.create_directory_at(name, now())
    }

    pub fn create_directory_at(
        &self,
        name: &str,
        at: OffsetDateTime,
    ) -> Result<PathBuf, CreateError> {
        let dir = self.prepare_date_dir(at)?;
        let path = dir.join(generate_filename(&sanitize_name(name), at));

        dir_builder(false)
            .create(&path)
            .map_err(|source| CreateError::Directory {
                path: path.clone(),
                source,
            })?;

        log::debug!("created memo directory {}", path.display());
        Ok(path)
    }

    /// Returns a warning when the base directory is not covered by the ignore
    /// rules of the current directory. Loader failures yield `None`.
    pub fn check_gitignore(&self, env: &impl Environment) -> Option<GitignoreWarning> {
        let matcher = match Matcher::from_cwd(env) {
            Ok(matcher) => matcher,
            Err(err) => {
                log::debug!("skipping gitignore check: {err}");
                return None;
            }
        };
        self.check_with(&matcher)
    }

    /// Same as [`Creator::check_gitignore`] with a prepared matcher; the
    /// suggestion is relative to the matcher root.
    pub fn check_with(&self, matcher: &Matcher) -> Option<GitignoreWarning> {
        if matcher.is_ignored_dir(&self.config.base_dir) {
            return None;
        }
        Some(GitignoreWarning {
            suggestion: self.config.ignore_pattern(matcher.root()),
        })
    }

    fn prepare_date_dir(&self, at: OffsetDateTime) -> Result<PathBuf, CreateError> {
        let base = &self.config.base_dir;
        dir_builder(true)
            .create(base)
            .map_err(|source| CreateError::BaseDir {
                path: base.clone(),
                source,
            })?;

        let dir = memo_dir(base, at);
        dir_builder(true)
            .create(&dir)
            .map_err(|source| CreateError::DateDir {
                path: dir.clone(),
                source,
            })?;
        Ok(dir)
    }
}

fn dir_builder(recursive: bool) -> DirBuilder {
    let mut builder = DirBuilder::new();
    builder.recursive(recursive);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o750);
    }
    builder
}

/// The date directory a memo created at `at` lands in.
pub fn memo_dir(base: &Path, at: OffsetDateTime) -> PathBuf {
    base.join(date_dir(at))
}
