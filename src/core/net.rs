// src/core/net.rs

// Blocking HTTPS GET (ureq) with backoff on throttling and server errors.
// A `Retry-After` header from the server takes precedence over the backoff.

use std::{thread, time::Duration};

use chrono::{DateTime, Utc};
use thiserror::Error;
use ureq::Agent;

use crate::config::consts::USER_AGENT;
use crate::config::options::RetryOptions;

#[derive(Debug, Error)]
pub enum NetError {
    #[error("HTTP status {status}")]
    Status {
        status: u16,
        retry_after: Option<Duration>,
    },
    #[error(transparent)]
    Transport(#[from] ureq::Error),
}

impl NetError {
    /// Worth another attempt: throttled (429), server-side (5xx), or transport.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetError::Status { status, .. } => *status == 429 || *status >= 500,
            NetError::Transport(e) => matches!(
                e,
                ureq::Error::Io(_)
                    | ureq::Error::Timeout(_)
                    | ureq::Error::ConnectionFailed
                    | ureq::Error::HostNotFound
            ),
        }
    }

    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            NetError::Status { retry_after, .. } => *retry_after,
            NetError::Transport(_) => None,
        }
    }
}

/// Status codes come back as `NetError::Status` so their headers can be read.
pub fn agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(Some(timeout))
        .build()
        .into()
}

/// `Retry-After` as delta-seconds or an HTTP date. Dates in the past mean "now".
pub fn parse_retry_after(raw: &str, now: DateTime<Utc>) -> Option<Duration> {
    let raw = raw.trim();
    if let Ok(secs) = raw.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }
    let at = DateTime::parse_from_rfc2822(raw).ok()?.with_timezone(&Utc);
    Some((at - now).to_std().unwrap_or(Duration::ZERO))
}

/// Server-requested wait (capped), else exponential backoff.
pub fn retry_delay(err: &NetError, attempt: u32, retry: &RetryOptions) -> Duration {
    match err.retry_after() {
        Some(wait) => wait.min(retry.max_retry_after),
        None => retry.delay_for_attempt(attempt),
    }
}

pub fn http_get(agent: &Agent, url: &str, retry: &RetryOptions) -> Result<String, NetError> {
    let mut attempt = 0;
    loop {
        match get_once(agent, url) {
            Ok(body) => {
                if attempt > 0 {
                    logd!("GET {url} succeeded after {attempt} retries");
                }
                return Ok(body);
            }
            Err(e) if attempt < retry.max_retries && e.is_retryable() => {
                let delay = retry_delay(&e, attempt, retry);
                logw!("GET {url} failed ({e}); retry {} in {:?}", attempt + 1, delay);
                thread::sleep(delay);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

fn get_once(agent: &Agent, url: &str) -> Result<String, NetError> {
    let mut resp = agent
        .get(url)
        .header("User-Agent", USER_AGENT)
        .header("Accept", "application/json")
        .call()?;

    let status = resp.status();
    if !status.is_success() {
        let retry_after = resp
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| parse_retry_after(v, Utc::now()));
        return Err(NetError::Status { status: status.as_u16(), retry_after });
    }
    Ok(resp.body_mut().read_to_string()?)
}
