use crate::models::QuizSettings;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, Environment, File, FileFormat};
use std::fs;

/// Prefix for environment variable overrides (`QUIZ_TIME_LIMIT_SECONDS=60`)
pub const ENV_PREFIX: &str = "QUIZ";

/// Configuration manager for the quiz settings file.
///
/// Settings are merged from, lowest priority first:
/// 1. Built-in defaults ([`QuizSettings::default`])
/// 2. The YAML settings file, if it exists
/// 3. `QUIZ_*` environment variables
///
/// Command-line flags are applied on top by the binary.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    settings_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager for the given settings file.
    ///
    /// The file does not have to exist.
    pub fn new<P: AsRef<Utf8Path>>(settings_path: P) -> Self {
        Self {
            settings_path: settings_path.as_ref().to_path_buf(),
        }
    }

    /// Load settings from defaults, the settings file, and the environment.
    pub fn load_settings(&self) -> Result<QuizSettings> {
        if !self.settings_path.exists() {
            tracing::warn!(
                "Settings file not found at {}, using defaults",
                self.settings_path
            );
        }

        let defaults =
            Config::try_from(&QuizSettings::default()).context("Failed to build default settings")?;

        let merged = Config::builder()
            .add_source(defaults)
            .add_source(
                File::from(self.settings_path.as_std_path())
                    .format(FileFormat::Yaml)
                    .required(false),
            )
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .with_context(|| format!("Failed to read settings: {}", self.settings_path))?;

        let settings: QuizSettings = merged
            .try_deserialize()
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        tracing::info!(
            "Loaded settings: source={}, limit={}s, randomize={}",
            settings.source,
            settings.time_limit_seconds,
            settings.randomize
        );
        Ok(settings)
    }

    /// Save settings to the settings file as YAML.
    pub fn save_settings(&self, settings: &QuizSettings) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(settings).context("Failed to serialize settings to YAML")?;

        if let Some(parent) = self.settings_path.parent() {
            if !parent.as_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create settings directory: {}", parent))?;
            }
        }

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    /// Get the settings file path.
    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let manager = ConfigManager::new(dir.join("quiz.yaml"));
        (manager, temp_dir)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let (manager, _temp_dir) = create_test_config_manager();

        let settings = manager.load_settings().unwrap();
        assert_eq!(settings.source, Utf8PathBuf::from("problems.csv"));
        assert!(!settings.randomize);
    }

    #[test]
    fn test_load_save_settings() {
        let (manager, _temp_dir) = create_test_config_manager();

        let settings = QuizSettings {
            source: Utf8PathBuf::from("capitals.csv"),
            time_limit_seconds: 45,
            randomize: true,
            seed: Some(99),
        };
        manager.save_settings(&settings).unwrap();

        let loaded = manager.load_settings().unwrap();
        assert_eq!(loaded.source, Utf8PathBuf::from("capitals.csv"));
        assert_eq!(loaded.time_limit_seconds, 45);
        assert!(loaded.randomize);
        assert_eq!(loaded.seed, Some(99));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let (manager, _temp_dir) = create_test_config_manager();
        fs::write(manager.settings_path(), "time_limit_seconds: 10\n").unwrap();

        let loaded = manager.load_settings().unwrap();
        assert_eq!(loaded.time_limit_seconds, 10);
        assert_eq!(loaded.source, Utf8PathBuf::from("problems.csv"));
    }
}
