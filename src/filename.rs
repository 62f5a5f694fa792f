//! Timestamped memo names and date directories.
//!
//! Every name starts with an `HH-MM-SS` token so memos sort by creation time
//! within their `YYYYMMDD` directory.

use time::OffsetDateTime;

/// Current local time, falling back to UTC when the offset is unknown.
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|err| {
        log::warn!("local time offset unavailable ({err}), using UTC");
        OffsetDateTime::now_utc()
    })
}

pub fn timestamp_token(at: OffsetDateTime) -> String {
    format!("{:02}-{:02}-{:02}", at.hour(), at.minute(), at.second())
}

pub fn date_dir(at: OffsetDateTime) -> String {
    format!("{:04}{:02}{:02}", at.year(), u8::from(at.month()), at.day())
}

/// Build `<HH-MM-SS>[-<name>]` from an already sanitized name.
pub fn generate_filename(sanitized_name: &str, at: OffsetDateTime) -> String {
    let token = timestamp_token(at);
    if sanitized_name.is_empty() {
        return token;
    }
    format!("{token}-{sanitized_name}")
}
