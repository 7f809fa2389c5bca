use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

/// Spaces outbound catalog requests by a minimum interval.
///
/// The remote catalog throttles aggressive clients; one shared limiter in
/// front of the HTTP client keeps ticks and user-driven searches under the
/// same ceiling.
pub struct RateLimiter {
    last_request: Mutex<Instant>,
    min_interval: Duration,
}

impl RateLimiter {
    pub fn new(requests_per_second: f64) -> Self {
        Self::with_interval(Duration::from_secs_f64(1.0 / requests_per_second))
    }

    pub fn with_interval(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(Instant::now() - min_interval),
            min_interval,
        }
    }

    /// Wait until the next request may go out, then claim the slot.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();

        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }

        *last = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn spaces_consecutive_requests() {
        let limiter = RateLimiter::with_interval(Duration::from_millis(30));

        limiter.acquire().await;
        let start = Instant::now();
        limiter.acquire().await;

        assert!(
            start.elapsed() >= Duration::from_millis(25),
            "second acquire should wait out the interval"
        );
    }

    #[tokio::test]
    async fn does_not_wait_when_interval_already_passed() {
        let limiter = RateLimiter::with_interval(Duration::from_millis(5));

        limiter.acquire().await;
        sleep(Duration::from_millis(10)).await;

        let start = Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed() < Duration::from_millis(5));
    }
}
