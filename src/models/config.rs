use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Quiz settings, loaded from the optional `quiz.yaml` settings file.
///
/// Every field has a default so a partial file (or no file at all) still
/// produces a complete configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSettings {
    /// CSV file with one `question,answer` record per line
    #[serde(default = "default_source")]
    pub source: Utf8PathBuf,

    /// Total time for the whole session, in seconds
    #[serde(default = "default_time_limit_seconds")]
    pub time_limit_seconds: u64,

    /// Draw questions in random order instead of file order
    #[serde(default)]
    pub randomize: bool,

    /// Fixed seed for the random draw order; OS entropy when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            source: default_source(),
            time_limit_seconds: default_time_limit_seconds(),
            randomize: false,
            seed: None,
        }
    }
}

impl QuizSettings {
    /// The session time budget as a [`Duration`].
    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_seconds)
    }
}

fn default_source() -> Utf8PathBuf {
    Utf8PathBuf::from("problems.csv")
}

fn default_time_limit_seconds() -> u64 {
    30
}
