// src/core/throttle.rs
//! Token bucket for live requests.
//!
//! Up to `burst` requests may go out back to back (never closer than
//! `min_gap`); after that the bucket refills at `(per_hour - burst) / 3600`
//! tokens per second, so no sliding hour ever sees more than `per_hour`.

use std::thread;
use std::time::{Duration, Instant};

pub struct RateLimiter {
    tokens: f64,
    capacity: f64,
    refill_per_sec: f64,
    min_gap: Duration,
    last_refill: Option<Instant>,
    next_free: Option<Instant>,
}

impl RateLimiter {
    pub fn new(burst: u32, per_hour: u32, min_gap: Duration) -> Self {
        let capacity = burst.max(1) as f64;
        let sustained = per_hour.saturating_sub(burst).max(1) as f64;
        Self {
            tokens: capacity,
            capacity,
            refill_per_sec: sustained / 3600.0,
            min_gap,
            last_refill: None,
            next_free: None,
        }
    }

    /// Claim the next slot at `now` and return how long to wait for it.
    /// Tokens may go negative; the debt is paid back by later refills.
    pub fn reserve(&mut self, now: Instant) -> Duration {
        if let Some(last) = self.last_refill {
            let elapsed = now.saturating_duration_since(last).as_secs_f64();
            self.tokens = (self.tokens + elapsed * self.refill_per_sec).min(self.capacity);
        }
        self.last_refill = Some(now);

        let bucket_wait = if self.tokens >= 1.0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64((1.0 - self.tokens) / self.refill_per_sec)
        };
        self.tokens -= 1.0;

        let gap_wait = self
            .next_free
            .map(|t| t.saturating_duration_since(now))
            .unwrap_or(Duration::ZERO);

        let wait = bucket_wait.max(gap_wait);
        self.next_free = Some(now + wait + self.min_gap);
        wait
    }

    /// Block until the next request may be sent.
    pub fn acquire(&mut self) {
        let wait = self.reserve(Instant::now());
        if wait >= Duration::from_secs(1) {
            logd!("Request budget exhausted; waiting {:.1}s", wait.as_secs_f64());
        }
        if !wait.is_zero() {
            thread::sleep(wait);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_then_sustained_rate() {
        // 4 at once, then one every 7.2 s (496 per hour).
        let mut rl = RateLimiter::new(4, 500, Duration::ZERO);
        let t0 = Instant::now();
        for _ in 0..4 {
            assert_eq!(rl.reserve(t0), Duration::ZERO);
        }
        let wait = rl.reserve(t0);
        assert!((wait.as_secs_f64() - 7.258).abs() < 0.01, "{wait:?}");
        let wait = rl.reserve(t0);
        assert!((wait.as_secs_f64() - 14.516).abs() < 0.01, "{wait:?}");
    }

    #[test]
    fn min_gap_spaces_a_burst() {
        let mut rl = RateLimiter::new(4, 500, Duration::from_millis(250));
        let t0 = Instant::now();
        assert_eq!(rl.reserve(t0), Duration::ZERO);
        assert_eq!(rl.reserve(t0), Duration::from_millis(250));
        assert_eq!(rl.reserve(t0 + Duration::from_secs(1)), Duration::ZERO);
    }

    #[test]
    fn one_hour_never_exceeds_budget() {
        let mut rl = RateLimiter::new(4, 500, Duration::from_millis(250));
        let mut now = Instant::now();
        let start = now;
        let mut sent = 0;
        while now.duration_since(start) < Duration::from_secs(3600) {
            now += rl.reserve(now);
            if now.duration_since(start) < Duration::from_secs(3600) {
                sent += 1;
            }
        }
        assert!(sent <= 500, "{sent}");
        assert!(sent >= 490, "{sent}");
    }

    #[test]
    fn idle_time_refills_the_bucket() {
        let mut rl = RateLimiter::new(2, 500, Duration::ZERO);
        let t0 = Instant::now();
        rl.reserve(t0);
        rl.reserve(t0);
        assert!(rl.reserve(t0) > Duration::ZERO);
        let later = t0 + Duration::from_secs(3600);
        assert_eq!(rl.reserve(later), Duration::ZERO);
        assert_eq!(rl.reserve(later), Duration::ZERO);
    }
}
