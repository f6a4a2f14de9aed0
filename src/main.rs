//! timed-quiz - Timed console quiz from a CSV problem set
//!
//! Main entry point for the command-line application.
//!
//! # Execution Flow
//!
//! 1. Parse command-line flags
//! 2. Initialize logging → logs/timed-quiz.<date>
//! 3. Load settings: defaults, `quiz.yaml`, `QUIZ_*` environment, flags
//! 4. Load the CSV problem set (any failure here exits non-zero)
//! 5. Create a tokio runtime and run one quiz session on it
//! 6. Shut the runtime down without waiting for the session timer
//!
//! Both finishing every question and running out of time exit successfully
//! after printing the score.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use timed_quiz::cli::Cli;
use timed_quiz::services::{QuizSession, StdinAnswers, load_problems};
use timed_quiz::{APP_NAME, ConfigManager, VERSION};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Held until exit so buffered log lines are flushed
    let _log_guard =
        timed_quiz::logging::setup_logging(&cli.log_dir, APP_NAME, cli.debug, cli.debug)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let config_manager = ConfigManager::new(&cli.config);
    let settings = cli.apply_to(config_manager.load_settings()?);

    if cli.save_config {
        config_manager.save_settings(&settings)?;
        println!("Settings saved to {}", config_manager.settings_path());
        return Ok(());
    }

    let pool = load_problems(&settings.source)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(2)
        .thread_name("quiz-worker")
        .build()
        .context("Failed to start async runtime")?;

    let session =
        QuizSession::from_settings(pool, &settings, Arc::new(StdinAnswers), std::io::stdout());
    let metrics = session.metrics();

    let outcome = runtime.block_on(session.run())?;
    metrics.log_summary();

    // The timer task may still be sleeping and an answer thread may still be
    // blocked on stdin; neither is waited for
    runtime.shutdown_timeout(Duration::from_millis(100));

    tracing::info!(
        "Exiting after {} quiz: {}/{}",
        if outcome.timed_out() { "timed out" } else { "completed" },
        outcome.correct,
        outcome.total
    );

    Ok(())
}
