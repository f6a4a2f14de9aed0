use crate::metrics::Metrics;
use crate::models::{QuizSettings, SessionEnd, SessionOutcome};
use crate::services::{AnswerCollector, AnswerSource, PopStrategy, ProblemPool, SessionTimer};
use crate::state::{StateChange, StateManager};
use crate::ui::ConsoleUi;
use anyhow::{Context, Result};
use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::broadcast;

/// Runs one timed quiz from a pool of problems
///
/// The session owns the pool, the score, and the console writer. For each
/// problem it prints the prompt, starts one background answer read, and
/// races that read against the session timer:
///
/// - the answer arrives first: it is scored and the next problem is asked
/// - the timer fires first: the remaining problems are abandoned
///
/// The timer is started once in [`run()`](Self::run) and spans every
/// question. When both sides are ready at the same time the timer wins, so
/// no answer is scored after the deadline.
///
/// # Example
/// ```ignore
/// let pool = load_problems(Utf8Path::new("problems.csv"))?;
/// let session = QuizSession::new(
///     pool,
///     PopStrategy::Ordered,
///     Duration::from_secs(30),
///     Arc::new(StdinAnswers),
///     std::io::stdout(),
/// );
/// let outcome = session.run().await?;
/// ```
pub struct QuizSession<W: Write> {
    pool: ProblemPool,
    strategy: PopStrategy,
    time_limit: Duration,
    collector: AnswerCollector,
    ui: ConsoleUi<W>,
    state: StateManager,
    metrics: Arc<Metrics>,
}

impl<W: Write> QuizSession<W> {
    pub fn new(
        pool: ProblemPool,
        strategy: PopStrategy,
        time_limit: Duration,
        answers: Arc<dyn AnswerSource>,
        out: W,
    ) -> Self {
        let state = StateManager::new(pool.len());
        Self {
            pool,
            strategy,
            time_limit,
            collector: AnswerCollector::new(answers),
            ui: ConsoleUi::new(out),
            state,
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Build a session using the time limit and draw order from `settings`
    pub fn from_settings(
        pool: ProblemPool,
        settings: &QuizSettings,
        answers: Arc<dyn AnswerSource>,
        out: W,
    ) -> Self {
        Self::new(
            pool,
            PopStrategy::from_settings(settings.randomize, settings.seed),
            settings.time_limit(),
            answers,
            out,
        )
    }

    /// Subscribe to session state changes (questions asked, score, end)
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.state.subscribe()
    }

    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }

    /// Run the session to completion or timeout and print the tally
    ///
    /// # Errors
    ///
    /// Only plumbing failures: the console cannot be written or an answer
    /// thread cannot be spawned. Wrong answers and timeouts are normal
    /// outcomes.
    pub async fn run(mut self) -> Result<SessionOutcome> {
        let total = self.pool.len();
        tracing::info!(
            "Starting quiz: {} problems, {:?} limit, random order: {}",
            total,
            self.time_limit,
            self.strategy.is_random()
        );

        let timer = SessionTimer::start(self.time_limit);

        let end = loop {
            if self.pool.is_empty() {
                break SessionEnd::Completed;
            }

            let (problem, remaining) = self.pool.pop(&mut self.strategy)?;
            self.state.begin_question(problem.question());
            self.metrics.record_question_asked();

            let number = self.state.read(|s| s.asked);
            tracing::debug!("Asking problem #{} ({} left in pool)", number, remaining);

            self.ui
                .prompt(number, problem.question())
                .context("Failed to print question")?;

            let asked_at = Instant::now();
            let pending = self
                .collector
                .request_answer()
                .context("Failed to start answer reader")?;

            let answer = tokio::select! {
                biased;
                _ = timer.fired() => None,
                answer = pending.received() => Some(answer),
            };

            // Timer wins ties: an answer observed after the deadline is dropped
            let answer = match answer {
                Some(answer) if !timer.is_fired() => answer,
                _ => {
                    tracing::info!("Time is up during problem #{}", number);
                    break SessionEnd::TimedOut;
                }
            };

            let correct = problem.is_correct(&answer);
            tracing::debug!(
                "Problem #{} answered in {:?}: correct={}",
                number,
                asked_at.elapsed(),
                correct
            );

            self.metrics.record_answer(correct, asked_at.elapsed());
            self.state.record_answer(correct);
            self.state.ready();
        };

        match end {
            SessionEnd::Completed => self.state.finish(),
            SessionEnd::TimedOut => {
                self.metrics.record_timeout();
                self.state.time_out()
            }
        };

        let outcome = self.state.read(|s| SessionOutcome {
            correct: s.correct,
            total: s.total,
            asked: s.asked,
            end,
        });

        self.ui
            .report(&outcome)
            .context("Failed to print final score")?;

        tracing::info!(
            "Quiz ended ({:?}): {}/{} correct, {} asked, {:?} left on timer",
            outcome.end,
            outcome.correct,
            outcome.total,
            outcome.asked,
            timer.remaining()
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::answer::MockAnswerSource;
    use std::sync::Mutex;

    fn pool() -> ProblemPool {
        ProblemPool::parse([["2+2", "4"], ["3+3", "6"]]).unwrap()
    }

    fn scripted(answers: &[&str]) -> Arc<dyn AnswerSource> {
        let queue = Mutex::new(
            answers
                .iter()
                .map(|a| a.to_string())
                .collect::<std::collections::VecDeque<_>>(),
        );
        let mut source = MockAnswerSource::new();
        source
            .expect_read_answer()
            .returning(move || Ok(queue.lock().unwrap().pop_front()));
        Arc::new(source)
    }

    #[tokio::test]
    async fn test_all_correct() {
        let mut out = Vec::new();
        let session = QuizSession::new(
            pool(),
            PopStrategy::Ordered,
            Duration::from_secs(30),
            scripted(&["4", "6"]),
            &mut out,
        );

        let outcome = session.run().await.unwrap();

        assert_eq!(outcome.correct, 2);
        assert_eq!(outcome.total, 2);
        assert_eq!(outcome.end, SessionEnd::Completed);
        assert!(String::from_utf8(out).unwrap().ends_with("You scored 2 out of 2.\n"));
    }

    #[tokio::test]
    async fn test_one_wrong() {
        let mut out = Vec::new();
        let session = QuizSession::new(
            pool(),
            PopStrategy::Ordered,
            Duration::from_secs(30),
            scripted(&["5", "6"]),
            &mut out,
        );

        let outcome = session.run().await.unwrap();

        assert_eq!(outcome.correct, 1);
        assert!(String::from_utf8(out).unwrap().ends_with("You scored 1 out of 2.\n"));
    }

    #[tokio::test]
    async fn test_zero_limit_times_out_immediately() {
        let mut out = Vec::new();
        let session = QuizSession::new(
            pool(),
            PopStrategy::Ordered,
            Duration::ZERO,
            scripted(&["4", "6"]),
            &mut out,
        );

        let outcome = session.run().await.unwrap();

        assert_eq!(outcome.end, SessionEnd::TimedOut);
        assert_eq!(outcome.correct, 0);
        assert_eq!(outcome.total, 2);
        assert_eq!(outcome.asked, 1);
    }

    #[tokio::test]
    async fn test_empty_pool_completes() {
        let mut out = Vec::new();
        let session = QuizSession::new(
            ProblemPool::default(),
            PopStrategy::Ordered,
            Duration::from_secs(30),
            scripted(&[]),
            &mut out,
        );

        let outcome = session.run().await.unwrap();

        assert_eq!(outcome.end, SessionEnd::Completed);
        assert_eq!(String::from_utf8(out).unwrap(), "You scored 0 out of 0.\n");
    }

    #[tokio::test]
    async fn test_metrics_follow_session() {
        let session = QuizSession::new(
            pool(),
            PopStrategy::Ordered,
            Duration::from_secs(30),
            scripted(&["4", "7"]),
            Vec::new(),
        );
        let metrics = session.metrics();

        session.run().await.unwrap();

        use std::sync::atomic::Ordering;
        assert_eq!(metrics.questions_asked.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.answers_received.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.answers_correct.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.timeouts.load(Ordering::Relaxed), 0);
    }
}
