//! memo - timestamped scratch memos
//!
//! Creates `<base>/<YYYYMMDD>/<HH-MM-SS>[-<name>].<ext>` files (or
//! directories) under a per-user base directory, and warns when that
//! directory is not excluded from git.

// Safety lints
#![deny(unsafe_code)]
#![deny(clippy::dbg_macro)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Panic prevention - warn in library code (allow in tests via #[cfg_attr])
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::panic)]

// Code quality
#![warn(clippy::cognitive_complexity)]
#![warn(clippy::too_many_arguments)]
#![warn(clippy::too_many_lines)]

pub mod config;
pub mod creator;
pub mod env;
pub mod filename;
pub mod gitignore;
pub mod list;
pub mod sanitize;
pub mod util;
