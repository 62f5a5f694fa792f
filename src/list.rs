use crate::sanitize::{SanitizeError, sanitize_extension};
use crate::util::to_slash;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MemoEntry {
    pub path: PathBuf,
    /// Path relative to the base directory, `/`-separated.
    pub relative: String,
    /// `YYYYMMDD` directory the memo lives in.
    pub date: String,
    pub name: String,
    /// Set for memos created with `--directory`.
    pub is_dir: bool,
}

#[derive(Debug, Default, Clone)]
pub struct ListFilter {
    pub ext: Option<String>,
    pub limit: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error(transparent)]
    Sanitize(#[from] SanitizeError),
    #[error("walk error: {source}")]
    Walk { source: walkdir::Error },
}

impl From<walkdir::Error> for ListError {
    fn from(source: walkdir::Error) -> Self {
        Self::Walk { source }
    }
}

/// List memos under `base`, newest first.
///
/// Directory memos are listed themselves and their files are listed below
/// them. An extension filter only keeps files.
pub fn list_memos(base: &Path, filter: &ListFilter) -> Result<Vec<MemoEntry>, ListError> {
    let ext = filter
        .ext
        .as_deref()
        .map(sanitize_extension)
        .transpose()?;

    if !base.is_dir() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    let walker = WalkDir::new(base)
        .min_depth(2)
        .into_iter()
        .filter_entry(|entry| entry.depth() != 1 || is_date_entry(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if is_permission_denied(&err) => continue,
            Err(err) => return Err(err.into()),
        };

        let file_type = entry.file_type();
        let is_dir = file_type.is_dir();
        if is_dir && (entry.depth() != 2 || ext.is_some()) {
            continue;
        }
        if !is_dir && !file_type.is_file() {
            continue;
        }

        if let Some(ext) = &ext {
            let matches = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(ext));
            if !matches {
                continue;
            }
        }

        let Ok(rel) = entry.path().strip_prefix(base) else {
            continue;
        };
        let relative = to_slash(rel);
        let Some((date, _)) = relative.split_once('/') else {
            continue;
        };

        entries.push(MemoEntry {
            path: entry.path().to_path_buf(),
            date: date.to_string(),
            name: entry.file_name().to_string_lossy().to_string(),
            relative,
            is_dir,
        });
    }

    // Newest memo first; a directory memo precedes its own files.
    entries.sort_by(|a, b| {
        memo_key(&b.relative)
            .cmp(memo_key(&a.relative))
            .then_with(|| a.relative.cmp(&b.relative))
    });
    if filter.limit > 0 {
        entries.truncate(filter.limit);
    }
    Ok(entries)
}

/// `<date>/<memo>` prefix of a relative path.
fn memo_key(relative: &str) -> &str {
    match relative.match_indices('/').nth(1) {
        Some((idx, _)) => &relative[..idx],
        None => relative,
    }
}

fn is_date_entry(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name().to_str().is_some_and(is_date_dir)
}

fn is_date_dir(name: &str) -> bool {
    name.len() == 8 && name.bytes().all(|b| b.is_ascii_digit())
}

fn is_permission_denied(err: &walkdir::Error) -> bool {
    err.io_error()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::PermissionDenied)
}
