use std::time::Duration;

use tokio::time::sleep;

/// Fixed-window launch pacer.
///
/// The pacer counts launches and sleeps one pacing interval after every
/// `per_interval`-th launch. This caps how many probes can be started within
/// a rolling interval; it does not bound how many are still in flight.
pub(super) struct LaunchPacer {
    per_interval: u64,
    interval: Duration,
    launched: u64,
}

impl LaunchPacer {
    pub(super) fn new(per_interval: u32) -> Self {
        Self::new_with_interval(per_interval, Duration::from_secs(1))
    }

    fn new_with_interval(per_interval: u32, interval: Duration) -> Self {
        Self {
            // per_interval is used as a modulus
            per_interval: u64::from(per_interval.max(1)),
            interval,
            launched: 0,
        }
    }

    /// Records one launch and pauses when it completes the current window.
    pub(super) async fn launched_one(&mut self) {
        self.launched += 1;
        if self.launched % self.per_interval == 0 {
            sleep(self.interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{self, Instant};

    #[tokio::test(flavor = "current_thread")]
    async fn pauses_only_after_a_full_window() {
        time::pause();

        let mut p = LaunchPacer::new_with_interval(2, Duration::from_secs(1));
        let start = Instant::now();

        p.launched_one().await;
        assert_eq!(Duration::ZERO, start.elapsed());

        p.launched_one().await;
        assert_eq!(Duration::from_secs(1), start.elapsed());

        p.launched_one().await;
        assert_eq!(Duration::from_secs(1), start.elapsed());

        p.launched_one().await;
        assert_eq!(Duration::from_secs(2), start.elapsed());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn never_pauses_when_the_window_exceeds_the_launch_count() {
        time::pause();

        let mut p = LaunchPacer::new_with_interval(10, Duration::from_secs(1));
        let start = Instant::now();

        for _ in 0..5 {
            p.launched_one().await;
        }

        assert_eq!(Duration::ZERO, start.elapsed());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn zero_window_is_normalised_to_one() {
        time::pause();

        let mut p = LaunchPacer::new_with_interval(0, Duration::from_secs(1));
        let start = Instant::now();

        p.launched_one().await;
        assert_eq!(Duration::from_secs(1), start.elapsed());

        p.launched_one().await;
        assert_eq!(Duration::from_secs(2), start.elapsed());
    }
}
