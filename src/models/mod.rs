//! Data models for the quiz.
//!
//! - [`Problem`]: one question and its pre-trimmed expected answer
//! - [`QuizSettings`]: source file, time budget, and draw order, loaded from `quiz.yaml`
//! - [`SessionState`]: score and progress owned by the session controller
//! - [`SessionOutcome`]: the final tally returned when a session ends

pub mod config;
pub mod problem;
pub mod session_state;

pub use config::QuizSettings;
pub use problem::Problem;
pub use session_state::{SessionEnd, SessionOutcome, SessionPhase, SessionState};
