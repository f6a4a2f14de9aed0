//! Services module - the quiz engine.
//!
//! Everything here is independent of how the quiz is launched: the binary
//! wires these pieces to a CSV file, standard input, and standard output,
//! while tests wire them to in-memory fixtures.
//!
//! # Components
//!
//! - [`problem_source`]: reads a CSV problem set into a [`ProblemPool`]
//! - [`ProblemPool`]: problems not yet asked, drawn in file order or at
//!   random according to a [`PopStrategy`]
//! - [`SessionTimer`]: one level-triggered countdown for the whole session
//! - [`AnswerCollector`]: one detached background read per question,
//!   delivered through a single-slot channel as a [`PendingAnswer`]
//! - [`QuizSession`]: the controller that races each pending answer
//!   against the timer and keeps score
//!
//! # Usage Example
//!
//! ```ignore
//! use timed_quiz::services::{load_problems, QuizSession, StdinAnswers};
//!
//! let pool = load_problems(&settings.source)?;
//! let session = QuizSession::from_settings(pool, &settings, Arc::new(StdinAnswers), std::io::stdout());
//! let outcome = session.run().await?;
//! ```

pub mod answer;
pub mod error;
pub mod pool;
pub mod problem_source;
pub mod session;
pub mod timer;

pub use answer::{AnswerCollector, AnswerSource, PendingAnswer, StdinAnswers};
pub use error::QuizError;
pub use pool::{PopStrategy, ProblemPool};
pub use problem_source::{load_problems, read_problems};
pub use session::QuizSession;
pub use timer::SessionTimer;
