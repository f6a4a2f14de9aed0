//! Reading problem sets from CSV.
//!
//! A problem set is a header-less CSV file where each record is
//! `question,answer`. Records may carry extra fields (ignored) but never
//! fewer than two; one short record rejects the whole file.
//!
//! ```ignore
//! use timed_quiz::services::problem_source::load_problems;
//! use camino::Utf8Path;
//!
//! let pool = load_problems(Utf8Path::new("problems.csv"))?;
//! println!("{} problems loaded", pool.len());
//! ```

use crate::services::{ProblemPool, QuizError};
use camino::Utf8Path;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;

/// Open `path` and parse it into a [`ProblemPool`].
///
/// # Errors
///
/// - [`QuizError::SourceUnavailable`] if the file cannot be opened
/// - [`QuizError::Unparseable`] if the CSV itself is broken
/// - [`QuizError::MalformedInput`] if a record has fewer than two fields
pub fn load_problems(path: &Utf8Path) -> Result<ProblemPool, QuizError> {
    let file = File::open(path).map_err(|source| QuizError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let pool = read_problems(file, path)?;
    tracing::info!("Loaded {} problems from {}", pool.len(), path);
    Ok(pool)
}

/// Parse CSV from any reader; `origin` only labels errors.
pub fn read_problems<R: Read>(reader: R, origin: &Utf8Path) -> Result<ProblemPool, QuizError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let records = csv_reader
        .records()
        .collect::<Result<Vec<StringRecord>, csv::Error>>()
        .map_err(|source| QuizError::Unparseable {
            path: origin.to_path_buf(),
            source,
        })?;

    ProblemPool::parse(records.iter())
}
