//! Shared path helpers.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Expand `~` and `~/...` paths against the given home directory.
///
/// Returns the path unchanged if:
/// - `home` is `None`
/// - Path doesn't start with `~`
///
/// # Examples
/// ```
/// use memo::util::expand_home;
/// use std::path::{Path, PathBuf};
///
/// let home = Some(Path::new("/Users/alice"));
/// assert_eq!(expand_home("~/docs", home), PathBuf::from("/Users/alice/docs"));
/// assert_eq!(expand_home("/tmp", home), PathBuf::from("/tmp"));
/// ```
pub fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    if path == "~" {
        return home
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(path));
    }
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = home
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

/// Lexically clean a path: drop `.` segments and fold `..` into its parent.
///
/// Leading `..` segments of a relative path are kept, `..` directly under the
/// root is dropped. An empty result becomes `.`.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Compute `target` relative to `base`, both taken lexically.
///
/// Returns `None` when one path is absolute and the other is not, or when
/// they live under different prefixes (Windows drives).
pub fn relative_to(base: &Path, target: &Path) -> Option<PathBuf> {
    let base = clean_path(base);
    let target = clean_path(target);
    if base.is_absolute() != target.is_absolute() {
        return None;
    }

    let base_parts: Vec<Component<'_>> = base
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let target_parts: Vec<Component<'_>> = target
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    let common = base_parts
        .iter()
        .zip(target_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    if prefix_of(&base_parts) != prefix_of(&target_parts) {
        return None;
    }

    let mut rel = PathBuf::new();
    for part in &base_parts[common..] {
        if matches!(part, Component::ParentDir) {
            // Cannot walk back out of an unknown parent.
            return None;
        }
        rel.push("..");
    }
    for part in &target_parts[common..] {
        rel.push(part.as_os_str());
    }

    if rel.as_os_str().is_empty() {
        rel.push(".");
    }
    Some(rel)
}

fn prefix_of(parts: &[Component<'_>]) -> Option<OsString> {
    parts.iter().find_map(|c| match c {
        Component::Prefix(prefix) => Some(prefix.as_os_str().to_owned()),
        _ => None,
    })
}

/// Render a path with `/` separators regardless of platform.
pub fn to_slash(path: &Path) -> String {
    let parts: Vec<String> = path
        .components()
        .map(|c| match c {
            Component::RootDir => String::new(),
            other => other.as_os_str().to_string_lossy().replace('\\', "/"),
        })
        .collect();

    let joined = parts.join("/");
    if path.has_root() && !joined.starts_with('/') {
        format!("/{joined}")
    } else {
        joined
    }
}
