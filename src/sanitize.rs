//! Turning user input into safe path segments.
//!
//! # Key Functions
//!
//! - [`sanitize_extension`]: Validate a file extension, rejecting anything
//!   outside `[a-z0-9_-]`
//! - [`sanitize_name`]: Normalize a memo name so it stays a single segment

pub const DEFAULT_EXTENSION: &str = "md";

const ILLEGAL_NAME_CHARS: &[char] = &['/', '\\', '<', '>', ':', '"', '|', '?', '*'];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SanitizeError {
    #[error("invalid extension: {raw:?} (allowed: letters, digits, '-', '_')")]
    InvalidExtension { raw: String },
}

pub fn sanitize_extension(raw: &str) -> Result<String, SanitizeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(DEFAULT_EXTENSION.to_string());
    }

    let ext = trimmed.strip_prefix('.').unwrap_or(trimmed).to_lowercase();
    if !is_extension_token(&ext) {
        return Err(SanitizeError::InvalidExtension {
            raw: raw.to_string(),
        });
    }

    Ok(ext)
}

/// Sanitize a memo name. Never fails; the result may be empty.
pub fn sanitize_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let stem = strip_extension(trimmed);

    let mut out = String::with_capacity(stem.len());
    let mut pending_dash = false;
    for ch in stem.chars() {
        if ch.is_whitespace() {
            pending_dash = true;
            continue;
        }
        if ch.is_control() || ILLEGAL_NAME_CHARS.contains(&ch) {
            continue;
        }
        if pending_dash && !out.is_empty() {
            out.push('-');
        }
        pending_dash = false;
        out.push(ch);
    }

    out.trim_matches('-').to_string()
}

fn is_extension_token(ext: &str) -> bool {
    !ext.is_empty()
        && ext
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

fn strip_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext))
            if !stem.trim().is_empty()
                && !ext.is_empty()
                && ext.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
                && ext.chars().any(|c| c.is_ascii_alphabetic()) =>
        {
            stem
        }
        _ => name,
    }
}
