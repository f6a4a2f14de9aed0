use crate::models::QuizSettings;
use camino::Utf8PathBuf;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "timed-quiz")]
#[command(version, about = "Timed quiz from a CSV file of 'question,answer' records")]
pub struct Cli {
    /// CSV file formatted 'question,answer' [default: problems.csv]
    #[arg(short = 'c', long = "csv", value_name = "FILE")]
    pub source: Option<Utf8PathBuf>,

    /// Time limit for the whole quiz in seconds [default: 30]
    #[arg(short = 'l', long = "limit", value_name = "SECONDS")]
    pub time_limit: Option<u64>,

    /// Ask the questions in random order
    #[arg(short, long = "random")]
    pub randomize: bool,

    /// Seed for the random order, to replay a run
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Settings file layered under the command-line flags
    #[arg(long, value_name = "FILE", default_value = "quiz.yaml")]
    pub config: Utf8PathBuf,

    /// Write the effective settings to the settings file and exit
    #[arg(long)]
    pub save_config: bool,

    /// Directory for log files
    #[arg(long, value_name = "DIR", default_value = "logs")]
    pub log_dir: Utf8PathBuf,

    /// Debug logging, mirrored to stderr
    #[arg(short, long)]
    pub debug: bool,
}

impl Cli {
    /// Override loaded settings with the flags that were given.
    pub fn apply_to(&self, mut settings: QuizSettings) -> QuizSettings {
        if let Some(source) = &self.source {
            settings.source = source.clone();
        }
        if let Some(limit) = self.time_limit {
            settings.time_limit_seconds = limit;
        }
        if self.randomize {
            settings.randomize = true;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        settings
    }
}
