use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub history: HistoryConfig,
    pub conversion: ConversionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Directory holding the history files
    pub dir: PathBuf,
    /// Entries shown by the history view
    pub display_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Refuse temperature conversions from a scale to itself
    pub distinct_temperature_units: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// Defaults, then `config/{CONFIG_ENV}`, then `UNITCONV__*` variables
    pub fn new() -> Result<Self, ConfigError> {
        let config_env = env::var("CONFIG_ENV").unwrap_or_else(|_| "default".to_string());
        Self::load(Some(&format!("config/{}", config_env)))
    }

    pub fn load(file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("history.dir", ".")?
            .set_default("history.display_limit", 10)?
            .set_default("conversion.distinct_temperature_units", false)?
            .set_default("logging.level", "warn")?;

        if let Some(file) = file {
            builder = builder.add_source(File::with_name(file).required(false));
        }

        builder
            .add_source(Environment::with_prefix("UNITCONV").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.history.display_limit, 10);
        assert!(!settings.conversion.distinct_temperature_units);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        fs::write(
            &path,
            "[history]\ndir = \"/var/lib/unitconv\"\ndisplay_limit = 25\n\n[conversion]\ndistinct_temperature_units = true\n",
        )
        .unwrap();

        let settings = Settings::load(path.to_str()).unwrap();
        assert_eq!(settings.history.dir, PathBuf::from("/var/lib/unitconv"));
        assert_eq!(settings.history.display_limit, 25);
        assert!(settings.conversion.distinct_temperature_units);
        assert_eq!(settings.logging.level, "warn");
    }
}
