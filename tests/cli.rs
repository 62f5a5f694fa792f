use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn memo(cwd: &Path, home: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_memo"));
    cmd.args(args)
        .current_dir(cwd)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("MEMO_ROOT_DIR")
        .env_remove("GIT_DIR")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_path(output: &Output) -> PathBuf {
    let stdout = String::from_utf8(output.stdout.clone()).expect("utf8 stdout");
    assert_eq!(stdout.lines().count(), 1, "stdout: {stdout:?}");
    PathBuf::from(stdout.trim_end())
}

#[test]
fn new_prints_path_to_stdout_and_message_to_stderr() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = dir.path().join("memos");

    let output = memo(dir.path(), dir.path(), &["new", "my notes"])
        .env("MEMO_ROOT_DIR", &base)
        .output()
        .expect("run memo");
    assert!(output.status.success(), "{output:?}");

    let path = stdout_path(&output);
    assert!(path.starts_with(&base));
    assert!(path.to_string_lossy().ends_with("-my-notes.md"));
    assert!(path.is_file());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Memo created at:"));
    assert!(stderr.contains("not in .gitignore"));
}

#[test]
fn directory_mode_reports_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = dir.path().join("memos");

    let output = memo(dir.path(), dir.path(), &["new", "-d", "research"])
        .env("MEMO_ROOT_DIR", &base)
        .output()
        .expect("run memo");
    assert!(output.status.success(), "{output:?}");

    let path = stdout_path(&output);
    assert!(path.is_dir());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Directory created at:"));
}

#[test]
fn directory_with_extension_fails_before_writing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = dir.path().join("memos");

    let output = memo(dir.path(), dir.path(), &["new", "-d", "-e", "txt", "x"])
        .env("MEMO_ROOT_DIR", &base)
        .output()
        .expect("run memo");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(
        String::from_utf8_lossy(&output.stderr)
            .contains("cannot use --directory and --ext together")
    );
    assert!(!base.exists());
}

#[test]
fn relative_root_override_fails() {
    let dir = tempfile::tempdir().expect("tempdir");

    let output = memo(dir.path(), dir.path(), &["new"])
        .env("MEMO_ROOT_DIR", "relative/memos")
        .output()
        .expect("run memo");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("absolute"));
}

#[test]
fn default_base_uses_account_name_without_login_vars() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cwd = dir.path().canonicalize().expect("canonical cwd");

    let output = memo(&cwd, &cwd, &["new", "x"])
        .env_remove("USER")
        .env_remove("USERNAME")
        .env_remove("LOGNAME")
        .output()
        .expect("run memo");
    assert!(output.status.success(), "{output:?}");

    let expected_user = whoami::fallible::username()
        .ok()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "memo".to_string());
    let path = stdout_path(&output);
    assert!(
        path.starts_with(cwd.join(format!(".{expected_user}")).join("memo")),
        "{}",
        path.display()
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&format!(".{expected_user}/memo/")));
}

#[test]
fn list_includes_directory_memos() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = dir.path().join("memos");

    let output = memo(dir.path(), dir.path(), &["new", "-d", "research"])
        .env("MEMO_ROOT_DIR", &base)
        .output()
        .expect("run memo new");
    let research = stdout_path(&output);
    std::fs::write(research.join("inner.md"), "").expect("inner file");

    let output = memo(dir.path(), dir.path(), &["list"])
        .env("MEMO_ROOT_DIR", &base)
        .output()
        .expect("run memo list");
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<PathBuf> = stdout.lines().map(PathBuf::from).collect();
    assert_eq!(lines, vec![research.clone(), research.join("inner.md")]);
}
