// timed-quiz - Timed console quiz from a CSV problem set
//
// This is the library crate containing the quiz engine and its data structures.
// The binary crate (main.rs) provides the command-line entry point.

pub mod cli;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{Problem, QuizSettings, SessionEnd, SessionOutcome, SessionPhase, SessionState};
pub use services::{QuizError, QuizSession};
pub use state::{StateChange, StateManager};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
