//! Gitignore rule loading and matching.
//!
//! Rules are read from up to three sources and concatenated in this order:
//!
//! 1. `<root>/.gitignore`
//! 2. the global excludes file (`core.excludesFile`, else
//!    `$XDG_CONFIG_HOME/git/ignore`, else `~/.config/git/ignore`)
//! 3. `<git-dir>/info/exclude`, where `<git-dir>` is `$GIT_DIR` or `<root>/.git`
//!
//! Missing sources are skipped. Matching follows gitignore semantics: the last
//! matching pattern wins and `!` re-includes.
//!
//! # Key Types
//!
//! - [`RuleSet`]: Compiled patterns, matched against root-relative paths
//! - [`Matcher`]: A rule set bound to its root directory

use crate::env::{EnvError, Environment};
use crate::util::{clean_path, expand_home, relative_to, to_slash};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::{Path, PathBuf};

const EXCLUDES_FILE_KEY: &str = "core.excludesFile";

#[derive(Debug, thiserror::Error)]
pub enum GitignoreError {
    #[error("failed to get current directory: {source}")]
    CurrentDir { source: std::io::Error },
    #[error("cannot resolve home directory for {path}")]
    HomeDir { path: String },
    #[error("failed to resolve global excludes file: {source}")]
    Env { source: EnvError },
    #[error("failed to compile ignore rules: {source}")]
    Compile { source: ignore::Error },
}

impl From<EnvError> for GitignoreError {
    fn from(source: EnvError) -> Self {
        Self::Env { source }
    }
}

/// One pattern line and the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleLine {
    pub source: PathBuf,
    pub text: String,
}

impl RuleLine {
    pub fn new(source: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RuleSet {
    inner: Gitignore,
}

impl RuleSet {
    /// Compile pattern lines. Lines that are not valid globs are skipped.
    ///
    /// `root` should be absolute: the engine strips a matching root prefix
    /// from every path it is asked about.
    pub fn compile(root: &Path, lines: &[RuleLine]) -> Result<Self, GitignoreError> {
        let mut builder = GitignoreBuilder::new(root);
        for line in lines {
            if let Err(err) = builder.add_line(Some(line.source.clone()), &line.text) {
                log::debug!(
                    "skipping pattern {:?} from {}: {err}",
                    line.text,
                    line.source.display()
                );
            }
        }

        let inner = builder
            .build()
            .map_err(|source| GitignoreError::Compile { source })?;
        Ok(Self { inner })
    }

    pub fn empty() -> Self {
        Self {
            inner: Gitignore::empty(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.num_ignores() as usize + self.inner.num_whitelists() as usize
    }

    /// Match a root-relative, `/`-separated path. A path counts as ignored
    /// when it or any parent directory is ignored.
    pub fn matches(&self, rel: &str, is_dir: bool) -> bool {
        if self.is_empty() || rel.is_empty() {
            return false;
        }
        self.inner
            .matched_path_or_any_parents(Path::new(rel), is_dir)
            .is_ignore()
    }
}

#[derive(Debug, Clone)]
pub struct Matcher {
    root: PathBuf,
    rules: RuleSet,
}

impl Matcher {
    pub fn new(root: impl Into<PathBuf>, rules: RuleSet) -> Self {
        Self {
            root: clean_path(&root.into()),
            rules,
        }
    }

    /// Load every available ignore source for `root`. A relative root is
    /// resolved against the current directory first.
    pub fn load(root: &Path, env: &impl Environment) -> Result<Self, GitignoreError> {
        let root = if root.is_absolute() {
            clean_path(root)
        } else {
            let cwd = env
                .current_dir()
                .map_err(|source| GitignoreError::CurrentDir { source })?;
            clean_path(&cwd.join(root))
        };
        let mut lines = Vec::new();
        for source in ignore_sources(&root, env)? {
            lines.extend(read_rule_lines(&source));
        }
        let rules = RuleSet::compile(&root, &lines)?;
        log::debug!("compiled {} ignore rules for {}", rules.len(), root.display());
        Ok(Self { root, rules })
    }

    pub fn from_cwd(env: &impl Environment) -> Result<Self, GitignoreError> {
        let cwd = env
            .current_dir()
            .map_err(|source| GitignoreError::CurrentDir { source })?;
        Self::load(&cwd, env)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Whether `path` (absolute, or relative to the root) is ignored. The
    /// filesystem decides whether it is treated as a directory.
    pub fn is_ignored(&self, path: &Path) -> bool {
        let Some(rel) = self.relative(path) else {
            return false;
        };
        let is_dir = self.root.join(&rel).is_dir();
        self.rules.matches(&rel, is_dir)
    }

    /// Like [`Matcher::is_ignored`], treating `path` as a directory even if it
    /// does not exist yet.
    pub fn is_ignored_dir(&self, path: &Path) -> bool {
        let Some(rel) = self.relative(path) else {
            return false;
        };
        self.rules.matches(&rel, true)
    }

    /// Root-relative `/`-separated form of `path`, `None` outside the root.
    fn relative(&self, path: &Path) -> Option<String> {
        if self.rules.is_empty() {
            return None;
        }

        let rel = if path.is_absolute() {
            relative_to(&self.root, path)?
        } else {
            clean_path(path)
        };
        let rel = to_slash(&rel);
        if rel == "." || rel == ".." || rel.starts_with("../") || rel.starts_with('/') {
            return None;
        }
        Some(rel)
    }
}

/// Candidate ignore files for `root`, in precedence order (later wins).
pub fn ignore_sources(root: &Path, env: &impl Environment) -> Result<Vec<PathBuf>, GitignoreError> {
    Ok(vec![
        root.join(".gitignore"),
        global_excludes_path(env)?,
        local_exclude_path(root, env),
    ])
}

pub fn global_excludes_path(env: &impl Environment) -> Result<PathBuf, GitignoreError> {
    if let Some(value) = env.git_config(EXCLUDES_FILE_KEY)? {
        if value == "~" || value.starts_with("~/") {
            let home = env
                .home_dir()
                .ok_or_else(|| GitignoreError::HomeDir { path: value.clone() })?;
            return Ok(expand_home(&value, Some(home.as_path())));
        }
        return Ok(PathBuf::from(value));
    }

    Ok(config_home(env)?.join("git").join("ignore"))
}

pub fn local_exclude_path(root: &Path, env: &impl Environment) -> PathBuf {
    let git_dir = env
        .var("GIT_DIR")
        .filter(|dir| !dir.is_empty())
        .map(|dir| root.join(dir))
        .unwrap_or_else(|| root.join(".git"));
    git_dir.join("info").join("exclude")
}

fn config_home(env: &impl Environment) -> Result<PathBuf, GitignoreError> {
    if let Some(dir) = env.var("XDG_CONFIG_HOME") {
        let dir = PathBuf::from(dir);
        if dir.is_absolute() {
            return Ok(dir);
        }
    }

    env.home_dir()
        .map(|home| home.join(".config"))
        .ok_or_else(|| GitignoreError::HomeDir {
            path: "$XDG_CONFIG_HOME/git/ignore".to_string(),
        })
}

fn read_rule_lines(source: &Path) -> Vec<RuleLine> {
    match std::fs::read_to_string(source) {
        Ok(contents) => {
            log::debug!("reading ignore rules from {}", source.display());
            contents
                .lines()
                .map(|line| RuleLine::new(source, line))
                .collect()
        }
        Err(err) => {
            log::debug!("skipping ignore source {}: {err}", source.display());
            Vec::new()
        }
    }
}
