use std::collections::BTreeMap;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use oddline_generate::{GameId, GameOverrides};

/// Settings file looked up in the working directory when `--config` is absent.
pub const DEFAULT_SETTINGS_FILE: &str = "oddline.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("settings file not found: {0}")]
    Missing(String),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub output: OutputFormat,
    pub log_format: LogFormat,
    /// Tracing filter directive, e.g. `info` or `oddline_generate=debug`.
    /// `--log-level` and `ODDLINE_LOG` both take precedence.
    pub log_level: Option<String>,
    /// Per-game overrides keyed by game id.
    pub games: BTreeMap<String, GameOverrides>,
}

impl Settings {
    /// Overrides configured for `game`, or none.
    pub fn overrides_for(&self, game: GameId) -> GameOverrides {
        self.games.get(game.as_str()).copied().unwrap_or_default()
    }

    fn validate(&self) -> Result<(), SettingsError> {
        for key in self.games.keys() {
            key.parse::<GameId>()
                .map_err(|err| SettingsError::Invalid(err.to_string()))?;
        }
        Ok(())
    }
}

/// Load settings from `path`.
///
/// A missing file yields defaults unless the path was given explicitly.
pub fn load_settings(path: &Path, explicit: bool) -> Result<Settings, SettingsError> {
    if !path.exists() {
        if explicit {
            return Err(SettingsError::Missing(path.display().to_string()));
        }
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(path)?;
    parse_settings(&content)
}

pub fn parse_settings(content: &str) -> Result<Settings, SettingsError> {
    let settings: Settings = toml::from_str(content)?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_settings_file() {
        let settings = parse_settings(
            r#"
output = "csv"
log_format = "json"
log_level = "debug"

[games.number-detective]
seed = 3
lines = 5

[games.word-detective]
seed = 21
"#,
        )
        .expect("parse settings");

        assert_eq!(settings.output, OutputFormat::Csv);
        assert_eq!(settings.log_format, LogFormat::Json);
        assert_eq!(settings.log_level.as_deref(), Some("debug"));
        assert_eq!(
            settings.overrides_for(GameId::NumberDetective),
            GameOverrides {
                seed: Some(3),
                lines: Some(5)
            }
        );
        assert_eq!(
            settings.overrides_for(GameId::WordDetective),
            GameOverrides {
                seed: Some(21),
                lines: None
            }
        );
        assert_eq!(
            settings.overrides_for(GameId::FreezeMath),
            GameOverrides::default()
        );
    }

    #[test]
    fn empty_file_means_defaults() {
        assert_eq!(parse_settings("").expect("parse"), Settings::default());
    }

    #[test]
    fn rejects_unknown_game_sections() {
        let result = parse_settings("[games.chess]\nseed = 1\n");
        assert!(matches!(result, Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn missing_file_is_only_an_error_when_explicit() {
        let path = Path::new("definitely-not-here/oddline.toml");
        assert_eq!(
            load_settings(path, false).expect("defaults"),
            Settings::default()
        );
        assert!(matches!(
            load_settings(path, true),
            Err(SettingsError::Missing(_))
        ));
    }
}
