//! Fixed pause between requests to a throttled provider

use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Enforces a fixed delay between consecutive requests
///
/// Alpha Vantage's free tier allows 5 calls per minute, so quote requests are
/// spaced 13 seconds apart. The first request goes out immediately; every
/// later one sleeps the full `interval` first, however long the previous
/// request took.
#[derive(Debug)]
pub struct FixedDelay {
    interval: Duration,
    primed: bool,
}

impl FixedDelay {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            primed: false,
        }
    }

    /// Wait out the pause owed before the next request
    pub async fn acquire(&mut self) {
        if self.primed {
            debug!("Rate limit pause of {:.1}s", self.interval.as_secs_f64());
            sleep(self.interval).await;
        }
        self.primed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_first_request_is_immediate() {
        let mut limiter = FixedDelay::new(Duration::from_secs(13));
        let start = Instant::now();
        limiter.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_request_waits_full_interval() {
        let mut limiter = FixedDelay::new(Duration::from_secs(13));
        limiter.acquire().await;
        let first = Instant::now();
        limiter.acquire().await;
        assert_eq!(first.elapsed(), Duration::from_secs(13));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_request_does_not_shorten_pause() {
        let mut limiter = FixedDelay::new(Duration::from_secs(13));
        limiter.acquire().await;
        // A quote that took 10s to answer
        sleep(Duration::from_secs(10)).await;
        let finished = Instant::now();

        limiter.acquire().await;
        assert_eq!(finished.elapsed(), Duration::from_secs(13));
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_slower_than_interval_still_pauses() {
        let mut limiter = FixedDelay::new(Duration::from_secs(13));
        limiter.acquire().await;
        // Hit the 15s HTTP timeout
        sleep(Duration::from_secs(15)).await;
        let finished = Instant::now();

        limiter.acquire().await;
        assert_eq!(finished.elapsed(), Duration::from_secs(13));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_never_waits() {
        let mut limiter = FixedDelay::new(Duration::ZERO);
        let start = Instant::now();
        for _ in 0..3 {
            limiter.acquire().await;
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
