// SPDX-License-Identifier: MIT

//! Token-bucket throttle for outgoing warehouse RPCs: caps the request rate
//! to a configured per-minute budget.

use parking_lot::Mutex;
use std::time::{Duration, Instant};

struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

/// Refills continuously at `rate_per_minute / 60` tokens per second, capped
/// at `rate_per_minute`. `acquire()` sleeps until a token is available
/// rather than rejecting the caller.
pub struct RateLimiter {
    capacity: f64,
    refill_per_sec: f64,
    bucket: Mutex<Bucket>,
}

impl RateLimiter {
    pub fn new(rate_per_minute: u32) -> Self {
        let capacity = rate_per_minute.max(1) as f64;
        Self {
            capacity,
            refill_per_sec: capacity / 60.0,
            bucket: Mutex::new(Bucket {
                tokens: capacity,
                last_refill: Instant::now(),
            }),
        }
    }

    /// Block until a single token is available, consuming it.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut bucket = self.bucket.lock();
                let now = Instant::now();
                let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
                bucket.tokens = (bucket.tokens + elapsed * self.refill_per_sec).min(self.capacity);
                bucket.last_refill = now;

                if bucket.tokens >= 1.0 {
                    bucket.tokens -= 1.0;
                    None
                } else {
                    let deficit = 1.0 - bucket.tokens;
                    Some(Duration::from_secs_f64(deficit / self.refill_per_sec))
                }
            };
            match wait {
                None => return,
                Some(d) => {
                    tracing::debug!(?d, "rate limiter throttling request");
                    tokio::time::sleep(d).await;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "rate_limiter_tests.rs"]
mod tests;
