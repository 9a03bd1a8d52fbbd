//! Line-oriented logging with timestamps, source locations, and ANSI colour support.
//!
//! Provides the [`dclog!`] macro for consistent log output in the format:
//!
//! ```text
//! 20261019T21:33:12.000 - src/web/handlers/posts.rs:42 - post p-1b9d6bc liked by u-7f3a2c1
//! ```
//!
//! When writing to a terminal, timestamps and source locations are dimmed and
//! user/post identifiers get a stable colour derived from their content.
//!
//! Log lines go to stderr unless [`set_writer`] installs another destination.
//! Installing a custom writer also disables ANSI colour codes.

use std::io::{self, IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex};

static COLOUR_ENABLED: AtomicBool = AtomicBool::new(false);

static LOG_WRITER: LazyLock<Mutex<Box<dyn Write + Send>>> =
    LazyLock::new(|| Mutex::new(Box::new(io::stderr())));

/// Detect whether stderr supports ANSI colours. Call once at startup.
pub fn init() {
    COLOUR_ENABLED.store(io::stderr().is_terminal(), Ordering::Relaxed);
}

/// Replace the log writer. All subsequent [`dclog!`] output goes to `w`.
pub fn set_writer(w: Box<dyn Write + Send>) {
    COLOUR_ENABLED.store(false, Ordering::Relaxed);
    if let Ok(mut writer) = LOG_WRITER.lock() {
        *writer = w;
    }
}

pub fn colour_enabled() -> bool {
    COLOUR_ENABLED.load(Ordering::Relaxed)
}

const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";

const ID_COLOURS: &[&str] = &[
    "\x1b[91m", "\x1b[92m", "\x1b[93m", "\x1b[94m", "\x1b[95m", "\x1b[96m",
];

fn hash_colour(id: &str) -> &'static str {
    let hash: u32 = id
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
    ID_COLOURS[(hash as usize) % ID_COLOURS.len()]
}

const LOG_ID_TRUNCATE_LEN: usize = 7;

fn truncate_id(id: &str) -> &str {
    let end = id
        .char_indices()
        .nth(LOG_ID_TRUNCATE_LEN)
        .map(|(i, _)| i)
        .unwrap_or(id.len());
    &id[..end]
}

fn tagged_id(prefix: char, id: &str) -> String {
    let short = truncate_id(id);
    if colour_enabled() {
        format!("{}{prefix}-{short}{RESET}", hash_colour(id))
    } else {
        format!("{prefix}-{short}")
    }
}

/// Format a user ID, e.g. `u-7f3a2c1`.
pub fn user_id(id: &str) -> String {
    tagged_id('u', id)
}

/// Format a post ID, e.g. `p-1b9d6bc`.
pub fn post_id(id: &str) -> String {
    tagged_id('p', id)
}

/// Current wall-clock time as `YYYYMMDDTHH:MM:SS.mmm` (UTC).
pub fn format_timestamp() -> String {
    chrono::Utc::now().format("%Y%m%dT%H:%M:%S%.3f").to_string()
}

/// Write a single log line. Called by [`dclog!`].
pub fn emit(file: &str, line: u32, msg: &str) {
    let ts = format_timestamp();
    let formatted = if colour_enabled() {
        format!("{DIM}{ts}{RESET} {DIM}{file}:{line}{RESET} {msg}")
    } else {
        format!("{ts} - {file}:{line} - {msg}")
    };
    if let Ok(mut writer) = LOG_WRITER.lock() {
        let _ = writeln!(*writer, "{formatted}");
    }
}

/// Emit a log line with timestamp and source location.
///
/// ```ignore
/// dclog!("profile created for {}", logging::user_id(&user_id));
/// ```
#[macro_export]
macro_rules! dclog {
    ($($arg:tt)*) => {{
        $crate::logging::emit(file!(), line!(), &format!($($arg)*));
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_has_compact_shape() {
        let ts = format_timestamp();
        assert_eq!(ts.len(), "20261019T21:33:12.000".len());
        assert_eq!(&ts[8..9], "T");
    }

    #[test]
    fn ids_are_truncated_and_tagged() {
        assert_eq!(user_id("7f3a2c1e-aaaa"), "u-7f3a2c1");
        assert_eq!(post_id("ab"), "p-ab");
    }
}
