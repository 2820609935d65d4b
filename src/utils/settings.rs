use crate::error::{ProcessingError, Result};
use crate::utils::constants::*;
use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use std::path::Path;
use validator::Validate;

/// Runtime configuration.
///
/// Layered as: built-in defaults, then an optional TOML file, then
/// `WINDROSE_*` environment variables (`__` separates sections, e.g.
/// `WINDROSE_BOT__TOKEN`, `WINDROSE_CHART__SIZE`).
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct Settings {
    pub bot: BotSettings,

    #[validate(nested)]
    pub reader: ReaderSettings,

    #[validate(nested)]
    pub chart: ChartSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BotSettings {
    /// Telegram bot token. Never has a built-in default.
    pub token: Option<SecretString>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct ReaderSettings {
    #[validate(range(min = 1, max = 1000))]
    pub header_scan_lines: usize,

    #[validate(length(min = 1))]
    pub direction_key: String,

    #[validate(length(min = 1))]
    pub speed_key: String,

    pub direction_synonyms: Vec<String>,
    pub speed_synonyms: Vec<String>,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            header_scan_lines: DEFAULT_HEADER_SCAN_LINES,
            direction_key: DIRECTION_COLUMN.to_string(),
            speed_key: SPEED_COLUMN.to_string(),
            direction_synonyms: DIRECTION_SYNONYMS.iter().map(|s| s.to_string()).collect(),
            speed_synonyms: SPEED_SYNONYMS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct ChartSettings {
    #[validate(range(min = 128, max = 4096))]
    pub size: u32,

    #[validate(range(min = 0.1, max = 1.0))]
    pub opening: f64,

    #[validate(range(min = 1, max = 12))]
    pub speed_bins: usize,

    pub title: String,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            size: DEFAULT_CHART_SIZE,
            opening: DEFAULT_WEDGE_OPENING,
            speed_bins: DEFAULT_SPEED_BINS,
            title: DEFAULT_CHART_TITLE.to_string(),
        }
    }
}

impl Settings {
    /// Load settings. An explicit `config_path` must exist; otherwise
    /// `windrose.toml` in the working directory is used when present.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let file_source = match config_path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings: Settings = Config::builder()
            .add_source(file_source)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("reader.direction_synonyms")
                    .with_list_parse_key("reader.speed_synonyms"),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Token required to run either bot.
    pub fn bot_token(&self) -> Result<&SecretString> {
        self.bot.token.as_ref().ok_or_else(|| {
            ProcessingError::Config(format!(
                "bot token is not configured; set {}_BOT__TOKEN or bot.token in the config file",
                ENV_PREFIX
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.reader.header_scan_lines, 10);
        assert_eq!(settings.reader.direction_key, "DD");
        assert_eq!(settings.reader.speed_key, "Ff");
        assert_eq!(settings.chart.speed_bins, 6);
        assert!(settings.bot_token().is_err());
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "[bot]")?;
        writeln!(file, "token = \"123:abc\"")?;
        writeln!(file, "[chart]")?;
        writeln!(file, "size = 512")?;
        writeln!(file, "title = \"Test rose\"")?;

        let settings = Settings::load(Some(file.path()))?;
        assert_eq!(settings.bot_token()?.expose_secret(), "123:abc");
        assert_eq!(settings.chart.size, 512);
        assert_eq!(settings.chart.title, "Test rose");
        // untouched sections keep their defaults
        assert_eq!(settings.chart.opening, 0.8);
        assert_eq!(settings.reader.speed_key, "Ff");
        Ok(())
    }

    #[test]
    fn test_invalid_values_rejected() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "[chart]")?;
        writeln!(file, "opening = 1.5")?;

        let result = Settings::load(Some(file.path()));
        assert!(matches!(result, Err(ProcessingError::Validation(_))));
        Ok(())
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = Settings::load(Some(Path::new("/nonexistent/windrose.toml")));
        assert!(matches!(result, Err(ProcessingError::ConfigSource(_))));
    }
}
