use memo::config::{Config, ConfigError};
use memo::env::{EnvError, Environment};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Default)]
struct FakeEnv {
    vars: HashMap<String, String>,
    cwd: Option<PathBuf>,
    username: Option<String>,
}

impl Environment for FakeEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn current_dir(&self) -> std::io::Result<PathBuf> {
        self.cwd
            .clone()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "no cwd"))
    }

    fn home_dir(&self) -> Option<PathBuf> {
        None
    }

    fn username(&self) -> Option<String> {
        self.username.clone()
    }

    fn git_config(&self, _key: &str) -> Result<Option<String>, EnvError> {
        Ok(None)
    }
}

#[test]
fn defaults_to_username_dir_under_cwd() {
    let env = FakeEnv {
        cwd: Some(PathBuf::from("/work/repo")),
        username: Some("alice".to_string()),
        ..Default::default()
    };

    let config = Config::from_env(&env).expect("config");
    assert_eq!(config.base_dir, PathBuf::from("/work/repo/.alice/memo"));
    assert!(config.base_dir.is_absolute());
}

#[test]
fn falls_back_when_username_unknown() {
    let env = FakeEnv {
        cwd: Some(PathBuf::from("/work/repo")),
        ..Default::default()
    };

    let config = Config::from_env(&env).expect("config");
    assert_eq!(config.base_dir, PathBuf::from("/work/repo/.memo/memo"));
}

#[test]
fn env_override_wins_and_is_cleaned() {
    let mut env = FakeEnv {
        username: Some("alice".to_string()),
        ..Default::default()
    };
    env.vars
        .insert("MEMO_ROOT_DIR".to_string(), "/data/./notes/../memos/".to_string());

    let config = Config::from_env(&env).expect("config");
    assert_eq!(config.base_dir, PathBuf::from("/data/memos"));
}

#[test]
fn empty_override_is_ignored() {
    let mut env = FakeEnv {
        cwd: Some(PathBuf::from("/work")),
        username: Some("bob".to_string()),
        ..Default::default()
    };
    env.vars.insert("MEMO_ROOT_DIR".to_string(), String::new());

    let config = Config::from_env(&env).expect("config");
    assert_eq!(config.base_dir, PathBuf::from("/work/.bob/memo"));
}

#[test]
fn relative_override_is_rejected() {
    let mut env = FakeEnv {
        cwd: Some(PathBuf::from("/work")),
        ..Default::default()
    };
    env.vars
        .insert("MEMO_ROOT_DIR".to_string(), "relative/memo".to_string());

    let err = Config::from_env(&env).expect_err("relative override");
    assert!(matches!(err, ConfigError::RelativeOverride { .. }));
    assert!(err.to_string().contains("absolute"));
}

#[test]
fn missing_cwd_is_an_error() {
    let env = FakeEnv::default();
    let err = Config::from_env(&env).expect_err("no cwd");
    assert!(matches!(err, ConfigError::CurrentDir { .. }));
}

#[test]
fn ignore_pattern_is_relative_with_trailing_slash() {
    let config = Config::new("/work/repo/.alice/memo");
    assert_eq!(config.ignore_pattern(Path::new("/work/repo")), ".alice/memo/");
}

#[test]
fn ignore_pattern_outside_cwd_walks_up() {
    let config = Config::new("/tmp/memo");
    assert_eq!(config.ignore_pattern(Path::new("/work/repo")), "../../tmp/memo/");
}

#[test]
fn ignore_pattern_for_relative_base_keeps_base() {
    let config = Config::new(".memo/memo");
    let pattern = config.ignore_pattern(Path::new("/work/repo"));
    assert_eq!(pattern, ".memo/memo/");
}
