// src/config/options.rs
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Debug, PartialEq)]
pub struct CollectOptions {
    pub years: RangeInclusive<i32>,
    pub out_path: PathBuf,
    pub log_path: PathBuf,
    pub summary_top_n: usize,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            years: YEAR_START..=YEAR_END,
            out_path: PathBuf::from(DATA_FILE),
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            summary_top_n: SUMMARY_TOP_N,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReportOptions {
    pub input: PathBuf,
    pub season: i32,
    pub top_n: usize,
    pub out_path: PathBuf,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DATA_FILE),
            season: REPORT_SEASON,
            top_n: REPORT_TOP_N,
            out_path: PathBuf::from(HEATMAP_FILE),
        }
    }
}

impl ReportOptions {
    pub fn title(&self) -> String {
        format!("Top {} F1 Drivers by Wins per Circuit in {}", self.top_n, self.season)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RetryOptions {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    /// Upper bound on a server-requested `Retry-After` wait.
    pub max_retry_after: Duration,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            max_retries: RETRY_MAX,
            initial_delay: Duration::from_millis(RETRY_INITIAL_MS),
            max_delay: Duration::from_millis(RETRY_MAX_MS),
            max_retry_after: Duration::from_secs(RETRY_AFTER_MAX_SECS),
        }
    }
}

impl RetryOptions {
    /// No retries, no sleeping.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            max_retry_after: Duration::ZERO,
        }
    }

    /// Doubling backoff, capped at `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.initial_delay.saturating_mul(factor).min(self.max_delay)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProviderOptions {
    pub base_url: String,
    /// None disables the on-disk cache.
    pub cache_dir: Option<PathBuf>,
    /// Minimum spacing between live requests.
    pub request_pause: Duration,
    /// Live requests allowed back to back before the hourly rate applies.
    pub burst: u32,
    pub hourly_limit: u32,
    pub timeout: Duration,
    pub retry: RetryOptions,
}

impl Default for ProviderOptions {
    fn default() -> Self {
        Self {
            base_url: s!(API_BASE),
            cache_dir: Some(PathBuf::from(CACHE_DIR)),
            request_pause: Duration::from_millis(REQUEST_PAUSE_MS),
            burst: RATE_BURST,
            hourly_limit: RATE_PER_HOUR,
            timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
            retry: RetryOptions::default(),
        }
    }
}
