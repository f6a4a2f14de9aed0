use crate::models::Problem;
use crate::services::QuizError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// How [`ProblemPool::pop`] picks the next problem.
#[derive(Debug, Clone)]
pub enum PopStrategy {
    /// Front of the pool; the rest keep their order
    Ordered,

    /// Uniformly random index, filled with the last element (swap-remove).
    ///
    /// The generator lives for the whole session and is seeded once.
    Random(StdRng),
}

impl PopStrategy {
    /// Random draws seeded from OS entropy.
    pub fn random() -> Self {
        PopStrategy::Random(StdRng::from_os_rng())
    }

    /// Random draws with a fixed seed, for reproducible order.
    pub fn seeded(seed: u64) -> Self {
        PopStrategy::Random(StdRng::seed_from_u64(seed))
    }

    /// Pick the strategy matching the `randomize` and `seed` settings.
    pub fn from_settings(randomize: bool, seed: Option<u64>) -> Self {
        match (randomize, seed) {
            (false, _) => PopStrategy::Ordered,
            (true, Some(seed)) => PopStrategy::seeded(seed),
            (true, None) => PopStrategy::random(),
        }
    }

    pub fn is_random(&self) -> bool {
        matches!(self, PopStrategy::Random(_))
    }
}

/// Problems not yet asked in the current session.
#[derive(Debug, Clone, Default)]
pub struct ProblemPool {
    problems: VecDeque<Problem>,
}

impl ProblemPool {
    /// Build a pool from raw records, keeping record order.
    ///
    /// Each record needs at least a question and an answer field; anything
    /// after the second field is ignored. A short record fails the whole
    /// parse with [`QuizError::MalformedInput`].
    pub fn parse<I, R, S>(rows: I) -> Result<Self, QuizError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut problems = VecDeque::new();

        for (index, row) in rows.into_iter().enumerate() {
            let mut fields = row.into_iter();
            match (fields.next(), fields.next()) {
                (Some(question), Some(answer)) => {
                    let answer: String = answer.into();
                    problems.push_back(Problem::new(question, answer));
                }
                (question, _) => {
                    return Err(QuizError::MalformedInput {
                        record: index + 1,
                        fields: usize::from(question.is_some()),
                    });
                }
            }
        }

        tracing::debug!("Parsed {} problems", problems.len());
        Ok(Self { problems })
    }

    /// Remove and return the next problem along with the remaining count.
    ///
    /// Callers check [`is_empty`](Self::is_empty) first; popping an empty
    /// pool returns [`QuizError::PoolExhausted`].
    pub fn pop(&mut self, strategy: &mut PopStrategy) -> Result<(Problem, usize), QuizError> {
        if self.problems.is_empty() {
            return Err(QuizError::PoolExhausted);
        }

        let problem = match strategy {
            PopStrategy::Ordered => self.problems.pop_front(),
            PopStrategy::Random(rng) => {
                let index = rng.random_range(0..self.problems.len());
                self.problems.swap_remove_back(index)
            }
        }
        .ok_or(QuizError::PoolExhausted)?;

        Ok((problem, self.problems.len()))
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(pool: &ProblemPool) -> Vec<&str> {
        pool.problems.iter().map(Problem::question).collect()
    }

    fn sample_pool() -> ProblemPool {
        ProblemPool::parse([["a", "1"], ["b", "2"], ["c", "3"], ["d", "4"]]).unwrap()
    }

    #[test]
    fn test_parse_keeps_order_and_trims_answers() {
        let pool = ProblemPool::parse(vec![
            vec!["2+2".to_string(), " 4 ".to_string()],
            vec!["3+3".to_string(), "6".to_string(), "extra".to_string()],
        ])
        .unwrap();

        assert_eq!(pool.len(), 2);
        assert_eq!(questions(&pool), vec!["2+2", "3+3"]);
        assert_eq!(pool.problems[0].answer(), "4");
    }

    #[test]
    fn test_parse_rejects_short_record() {
        let rows: Vec<Vec<&str>> = vec![vec!["ok", "1"], vec!["onlyquestion"]];
        let err = ProblemPool::parse(rows).unwrap_err();

        assert!(matches!(
            err,
            QuizError::MalformedInput {
                record: 2,
                fields: 1
            }
        ));
    }

    #[test]
    fn test_parse_allows_duplicates() {
        let pool = ProblemPool::parse([["same", "1"], ["same", "1"]]).unwrap();
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_ordered_pop_is_fifo() {
        let mut pool = sample_pool();
        let mut strategy = PopStrategy::Ordered;

        let (first, remaining) = pool.pop(&mut strategy).unwrap();
        assert_eq!(first.question(), "a");
        assert_eq!(remaining, 3);
        assert_eq!(questions(&pool), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_random_pop_fills_gap_with_last() {
        let mut pool = sample_pool();
        let mut strategy = PopStrategy::seeded(7);

        let (picked, remaining) = pool.pop(&mut strategy).unwrap();
        assert_eq!(remaining, 3);

        let left = questions(&pool);
        assert!(!left.contains(&picked.question()));
        match picked.question() {
            "d" => assert_eq!(left, vec!["a", "b", "c"]),
            other => {
                // "d" was last, so it now sits where the picked problem was
                let slot = ["a", "b", "c"].iter().position(|q| *q == other).unwrap();
                assert_eq!(left[slot], "d");
            }
        }
    }

    #[test]
    fn test_pop_empty_pool_is_exhausted() {
        let mut pool = ProblemPool::default();
        let err = pool.pop(&mut PopStrategy::Ordered).unwrap_err();
        assert!(matches!(err, QuizError::PoolExhausted));

        let err = pool.pop(&mut PopStrategy::seeded(1)).unwrap_err();
        assert!(matches!(err, QuizError::PoolExhausted));
    }

    #[test]
    fn test_strategy_from_settings() {
        assert!(!PopStrategy::from_settings(false, Some(3)).is_random());
        assert!(PopStrategy::from_settings(true, Some(3)).is_random());
        assert!(PopStrategy::from_settings(true, None).is_random());
    }
}
