use serde::{Deserialize, Serialize};
use config::{Config, ConfigError, File};
use std::path::Path;

use crate::models::{Result, ScorerError};
use crate::scoring::{ScoringWeights, WeightOverrides, DEFAULT_MIN_EVENTS};

const ENV_PREFIX: &str = "ATTENDANCE_SCORE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub scoring: ScoringSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringSettings {
    pub weights: ScoringWeights,
    /// Opportunities needed before an individual is leaderboard-eligible.
    pub min_events: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "Attendance Scorer".to_string(),
                log_level: "info".to_string(),
            },
            scoring: ScoringSettings {
                weights: ScoringWeights::default(),
                min_events: DEFAULT_MIN_EVENTS,
            },
        }
    }
}

impl Settings {
    /// Defaults, then `config/default` and `config/local` if present, then
    /// `ATTENDANCE_SCORE__*` environment variables.
    pub fn new() -> std::result::Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(environment())
            .build()?;

        s.try_deserialize()
    }

    /// Defaults, then the given file (required), then the environment.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        s.try_deserialize()
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::new()?,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn with_weight_overrides(mut self, overrides: &WeightOverrides) -> Self {
        self.scoring.weights = overrides.apply_to(&self.scoring.weights);
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.scoring.weights.validate()?;

        if self.app.log_level.trim().is_empty() {
            return Err(ScorerError::ConfigError("app.log_level must not be empty".to_string()));
        }

        Ok(())
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "attendance-scorer-{}-{}.toml",
            name,
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.scoring.min_events, 10);
        assert_eq!(settings.scoring.weights, ScoringWeights::default());
    }

    #[test]
    fn test_file_overrides_subset_of_weights() {
        let path = write_temp(
            "partial",
            r#"
[scoring]
min_events = 6

[scoring.weights]
match_late = 0
mvp_bonus_once = 5.5
"#,
        );

        let settings = Settings::from_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(settings.scoring.min_events, 6);
        assert_eq!(settings.scoring.weights.match_late, 0.0);
        assert_eq!(settings.scoring.weights.mvp_bonus_once, 5.5);
        assert_eq!(settings.scoring.weights.match_on_time, 2.5);
        assert_eq!(settings.app.log_level, "info");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("attendance-scorer-does-not-exist.toml");
        assert!(Settings::load(Some(path.as_path())).is_err());
    }

    #[test]
    fn test_weight_overrides_apply_to_settings() {
        let overrides = WeightOverrides {
            training_late: Some(0.25),
            ..Default::default()
        };
        let settings = Settings::default().with_weight_overrides(&overrides);

        assert_eq!(settings.scoring.weights.training_late, 0.25);
        assert_eq!(settings.scoring.weights.training_on_time, 1.0);
    }

    #[test]
    fn test_empty_log_level_rejected() {
        let mut settings = Settings::default();
        settings.app.log_level = " ".to_string();

        assert!(matches!(settings.validate(), Err(ScorerError::ConfigError(_))));
    }
}
