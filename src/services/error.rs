use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while loading a problem set or drawing from the pool
#[derive(Error, Debug)]
pub enum QuizError {
    #[error("Failed to open the CSV file: {path}")]
    SourceUnavailable {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse provided CSV file: {path}")]
    Unparseable {
        path: Utf8PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Record {record} has {fields} field(s); expected 'question,answer'")]
    MalformedInput { record: usize, fields: usize },

    #[error("Problem pool is empty")]
    PoolExhausted,
}
