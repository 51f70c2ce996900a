// src/log.rs
//
// Append-only run log. One line per event:
//   2025-03-16 14:02:11,093 - INFO - Loaded schedule for 2004: 18 events
//
// The path is set once per process via `init`; until then lines go to
// DEFAULT_LOG_FILE. Write failures never surface to the caller.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use chrono::Local;

use crate::config::consts::DEFAULT_LOG_FILE;

static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();
static LOG_LOCK: Mutex<()> = Mutex::new(());

const TIMESTAMP_FMT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Route every subsequent log line to `path`.
/// Only the first call wins; later calls return false.
pub fn init(path: &Path) -> bool {
    LOG_PATH.set(path.to_path_buf()).is_ok()
}

pub fn log_path() -> &'static Path {
    LOG_PATH.get_or_init(default_path)
}

#[cfg(not(test))]
fn default_path() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

// Unit tests must not touch the collector's real log in the working tree.
#[cfg(test)]
fn default_path() -> PathBuf {
    std::env::temp_dir().join(format!("f1_scrape_unit_{}.log", std::process::id()))
}

pub fn format_line(level: &str, msg: &str) -> String {
    let ts = Local::now().format(TIMESTAMP_FMT);
    format!("{ts} - {level} - {msg}\n")
}

/// Internal logging function
pub fn write_log(level: &str, msg: &str) {
    let line = format_line(level, msg);

    if let Ok(_guard) = LOG_LOCK.lock() {
        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path())
        {
            let _ = file.write_all(line.as_bytes());
        }
    }
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::log::write_log("INFO", &format!($($arg)*))
    };
}

/// Warning-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        $crate::log::write_log("WARNING", &format!($($arg)*))
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::log::write_log("DEBUG", &format!($($arg)*))
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::log::write_log("ERROR", &format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_has_timestamp_level_and_message() {
        let line = format_line("ERROR", "Failed to load 2003 Brazilian Grand Prix: timeout");
        assert!(line.ends_with(" - ERROR - Failed to load 2003 Brazilian Grand Prix: timeout\n"));
        // "YYYY-MM-DD HH:MM:SS,mmm"
        let ts = line.split(" - ").next().unwrap();
        assert_eq!(ts.len(), 23);
        assert_eq!(&ts[19..20], ",");
    }

    #[test]
    fn unit_test_lines_stay_out_of_the_working_tree() {
        logd!("log path check");
        let path = log_path();
        assert!(path.starts_with(std::env::temp_dir()));
        assert_ne!(path, Path::new(DEFAULT_LOG_FILE));
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains(" - DEBUG - log path check\n"));
    }
}
