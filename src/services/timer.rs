use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// One countdown for the whole session.
///
/// The signal is level-triggered: once the deadline passes, every later
/// [`fired`](Self::fired) or [`is_fired`](Self::is_fired) observes it. There
/// is no way to cancel, restart, or extend the countdown.
#[derive(Debug, Clone)]
pub struct SessionTimer {
    fired_rx: watch::Receiver<bool>,
    deadline: Instant,
}

impl SessionTimer {
    /// Start counting down from now.
    ///
    /// A zero duration is already fired on return. Otherwise a tokio task
    /// sleeps for `duration` and raises the signal, so this must be called
    /// from within a runtime.
    pub fn start(duration: Duration) -> Self {
        let deadline = Instant::now() + duration;

        let fired_rx = if duration.is_zero() {
            let (_, fired_rx) = watch::channel(true);
            fired_rx
        } else {
            let (fired_tx, fired_rx) = watch::channel(false);
            tokio::spawn(async move {
                tokio::time::sleep(duration).await;
                tracing::debug!("Session timer fired after {:?}", duration);
                // Receivers keep seeing `true` after the sender is gone
                fired_tx.send_replace(true);
            });
            fired_rx
        };

        tracing::info!("Session timer started: {:?}", duration);

        Self { fired_rx, deadline }
    }

    /// Resolves once the timer has fired; immediately if it already has.
    pub async fn fired(&self) {
        let mut fired_rx = self.fired_rx.clone();
        let closed = fired_rx.wait_for(|fired| *fired).await.is_err();
        if closed {
            // The timer task was dropped without firing (runtime shutting down)
            std::future::pending::<()>().await;
        }
    }

    /// True once the deadline has passed, even if the timer task has not
    /// been scheduled to raise the signal yet.
    pub fn is_fired(&self) -> bool {
        *self.fired_rx.borrow() || Instant::now() >= self.deadline
    }

    /// Time left until the deadline, saturating at zero.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_pending, assert_ready, task};

    #[test]
    fn test_zero_duration_is_fired_at_start() {
        let timer = SessionTimer::start(Duration::ZERO);
        assert!(timer.is_fired());

        let mut fired = task::spawn(timer.fired());
        assert_ready!(fired.poll());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_duration() {
        let timer = SessionTimer::start(Duration::from_secs(30));
        assert!(!timer.is_fired());

        let mut fired = task::spawn(timer.fired());
        assert_pending!(fired.poll());

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert!(timer.is_fired());
        assert_ready!(fired.poll());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stays_fired() {
        let timer = SessionTimer::start(Duration::from_secs(1));
        timer.fired().await;

        // Level-triggered: every later wait completes at once
        for _ in 0..3 {
            assert!(timer.is_fired());
            let mut fired = task::spawn(timer.fired());
            assert_ready!(fired.poll());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_remaining_follows_runtime_clock() {
        let timer = SessionTimer::start(Duration::from_secs(10));
        assert_eq!(timer.remaining(), Duration::from_secs(10));

        tokio::time::advance(Duration::from_secs(4)).await;
        assert_eq!(timer.remaining(), Duration::from_secs(6));

        tokio::time::advance(Duration::from_secs(20)).await;
        assert_eq!(timer.remaining(), Duration::ZERO);
    }

    #[test]
    fn test_fired_at_deadline_before_task_runs() {
        // Current-thread runtime that is never driven: the sleep task cannot run
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let timer = runtime.block_on(async { SessionTimer::start(Duration::from_millis(20)) });
        assert!(!timer.is_fired());

        std::thread::sleep(Duration::from_millis(40));
        assert!(timer.is_fired());
        assert_eq!(timer.remaining(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clones_observe_same_signal() {
        let timer = SessionTimer::start(Duration::from_secs(5));
        let observer = timer.clone();

        timer.fired().await;
        assert!(observer.is_fired());
    }
}
