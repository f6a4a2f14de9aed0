// Session metrics module
//
// Lightweight counters describing one quiz session

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Session metrics
///
/// Uses atomic operations so the counters can be shared behind an `Arc`
/// and read while the session is still running.
#[derive(Debug)]
pub struct Metrics {
    /// Questions presented
    pub questions_asked: AtomicUsize,

    /// Answers that arrived before the timer fired
    pub answers_received: AtomicUsize,

    /// Answers that matched
    pub answers_correct: AtomicUsize,

    /// Sessions ended by the timer (0 or 1 per process)
    pub timeouts: AtomicUsize,

    /// Time spent waiting for answers, in milliseconds
    pub total_answer_time_ms: AtomicU64,

    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            questions_asked: AtomicUsize::new(0),
            answers_received: AtomicUsize::new(0),
            answers_correct: AtomicUsize::new(0),
            timeouts: AtomicUsize::new(0),
            total_answer_time_ms: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_question_asked(&self) {
        self.questions_asked.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an answer and how long the user took to give it
    pub fn record_answer(&self, correct: bool, took: Duration) {
        self.answers_received.fetch_add(1, Ordering::Relaxed);
        if correct {
            self.answers_correct.fetch_add(1, Ordering::Relaxed);
        }
        let took_ms = u64::try_from(took.as_millis()).unwrap_or(u64::MAX);
        let _ = self
            .total_answer_time_ms
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |total| {
                Some(total.saturating_add(took_ms))
            });
    }

    pub fn record_timeout(&self) {
        self.timeouts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Average time per received answer in milliseconds
    pub fn avg_answer_time_ms(&self) -> f64 {
        let total = self.total_answer_time_ms.load(Ordering::Relaxed);
        let count = self.answers_received.load(Ordering::Relaxed);
        if count > 0 {
            total as f64 / count as f64
        } else {
            0.0
        }
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Session Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Questions: {} asked, {} answered, {} correct",
            self.questions_asked.load(Ordering::Relaxed),
            self.answers_received.load(Ordering::Relaxed),
            self.answers_correct.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Answer time: {:.2}s total (avg: {:.2}ms per answer), timed out: {}",
            self.total_answer_time_ms.load(Ordering::Relaxed) as f64 / 1000.0,
            self.avg_answer_time_ms(),
            self.timeouts.load(Ordering::Relaxed) > 0
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
