//! Configuration — credential, trigger time, endpoint, output directory
//! and active catalog.
//!
//! Environment variables win over the optional `growth.toml` settings
//! file in the working directory; everything except the API key has a
//! default. A missing credential is a fatal startup error, checked once
//! before the first run.

use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use serde::Deserialize;

use crate::catalog::CatalogVariant;

/// Application-level constants.
pub const APP_NAME: &str = "growth";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "growth=info";

const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";
const DEFAULT_RUN_TIME: &str = "17:00";
const DEFAULT_OUTPUT_DIR: &str = "Growth";
const SETTINGS_FILE: &str = "growth.toml";

/// Errors from configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DEEPSEEK_API_KEY is not set (export it or add api_key to growth.toml)")]
    MissingApiKey,

    #[error("Invalid run time {0:?}: expected 24-hour HH:MM")]
    InvalidRunTime(String),

    #[error("Invalid catalog {0:?}: expected long_form or short_form")]
    InvalidCatalog(String),

    #[error("Cannot read {SETTINGS_FILE}: {0}")]
    SettingsUnreadable(std::io::Error),

    #[error("Cannot parse {SETTINGS_FILE}: {0}")]
    SettingsInvalid(#[from] toml::de::Error),
}

/// Optional on-disk settings, all keys individually omittable.
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    api_key: Option<String>,
    base_url: Option<String>,
    run_time: Option<String>,
    output_dir: Option<PathBuf>,
    catalog: Option<CatalogVariant>,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct GrowthConfig {
    pub api_key: String,
    pub base_url: String,
    pub run_time: NaiveTime,
    pub output_dir: PathBuf,
    pub catalog: CatalogVariant,
}

impl GrowthConfig {
    /// Load from the process environment plus `growth.toml` in the
    /// working directory.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = read_settings(Path::new(SETTINGS_FILE))?;
        Self::from_sources(EnvSource::process(), settings)
    }

    fn from_sources(env: EnvSource, settings: SettingsFile) -> Result<Self, ConfigError> {
        let api_key = env
            .api_key
            .or(settings.api_key)
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let base_url = env
            .base_url
            .or(settings.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let run_time_raw = env
            .run_time
            .or(settings.run_time)
            .unwrap_or_else(|| DEFAULT_RUN_TIME.to_string());
        let run_time = parse_run_time(&run_time_raw)?;

        let output_dir = env
            .output_dir
            .or(settings.output_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        let catalog = match env.catalog {
            Some(raw) => {
                CatalogVariant::from_tag(&raw).ok_or(ConfigError::InvalidCatalog(raw))?
            }
            None => settings.catalog.unwrap_or(CatalogVariant::LongForm),
        };

        Ok(Self {
            api_key,
            base_url,
            run_time,
            output_dir,
            catalog,
        })
    }
}

/// Environment snapshot, separated from `std::env` for tests.
struct EnvSource {
    api_key: Option<String>,
    base_url: Option<String>,
    run_time: Option<String>,
    output_dir: Option<PathBuf>,
    catalog: Option<String>,
}

impl EnvSource {
    fn process() -> Self {
        Self {
            api_key: std::env::var("DEEPSEEK_API_KEY").ok(),
            base_url: std::env::var("DEEPSEEK_BASE_URL").ok(),
            run_time: std::env::var("GROWTH_RUN_TIME").ok(),
            output_dir: std::env::var("GROWTH_DIR").ok().map(PathBuf::from),
            catalog: std::env::var("GROWTH_CATALOG").ok(),
        }
    }

    #[cfg(test)]
    fn empty() -> Self {
        Self {
            api_key: None,
            base_url: None,
            run_time: None,
            output_dir: None,
            catalog: None,
        }
    }
}

fn read_settings(path: &Path) -> Result<SettingsFile, ConfigError> {
    if !path.exists() {
        return Ok(SettingsFile::default());
    }
    let raw = std::fs::read_to_string(path).map_err(ConfigError::SettingsUnreadable)?;
    Ok(toml::from_str(&raw)?)
}

/// Parse a 24-hour `HH:MM` trigger time.
fn parse_run_time(raw: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map_err(|_| ConfigError::InvalidRunTime(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with_key() -> EnvSource {
        EnvSource {
            api_key: Some("sk-test".into()),
            ..EnvSource::empty()
        }
    }

    #[test]
    fn missing_credential_is_fatal() {
        let result = GrowthConfig::from_sources(EnvSource::empty(), SettingsFile::default());
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn blank_credential_is_fatal() {
        let env = EnvSource {
            api_key: Some("   ".into()),
            ..EnvSource::empty()
        };
        let result = GrowthConfig::from_sources(env, SettingsFile::default());
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config =
            GrowthConfig::from_sources(env_with_key(), SettingsFile::default()).unwrap();
        assert_eq!(config.base_url, "https://api.deepseek.com");
        assert_eq!(config.run_time, NaiveTime::from_hms_opt(17, 0, 0).unwrap());
        assert_eq!(config.output_dir, PathBuf::from("Growth"));
        assert_eq!(config.catalog, CatalogVariant::LongForm);
    }

    #[test]
    fn catalog_selected_from_env() {
        let env = EnvSource {
            api_key: Some("sk-test".into()),
            catalog: Some("short_form".into()),
            ..EnvSource::empty()
        };
        let config = GrowthConfig::from_sources(env, SettingsFile::default()).unwrap();
        assert_eq!(config.catalog, CatalogVariant::ShortForm);
    }

    #[test]
    fn catalog_selected_from_settings_file() {
        let settings = SettingsFile {
            api_key: Some("sk-file".into()),
            catalog: Some(CatalogVariant::ShortForm),
            ..SettingsFile::default()
        };
        let config = GrowthConfig::from_sources(EnvSource::empty(), settings).unwrap();
        assert_eq!(config.catalog, CatalogVariant::ShortForm);
    }

    #[test]
    fn unknown_catalog_tag_is_fatal() {
        let env = EnvSource {
            api_key: Some("sk-test".into()),
            catalog: Some("medium_form".into()),
            ..EnvSource::empty()
        };
        let result = GrowthConfig::from_sources(env, SettingsFile::default());
        assert!(matches!(result, Err(ConfigError::InvalidCatalog(_))));
    }

    #[test]
    fn env_wins_over_settings_file() {
        let env = EnvSource {
            api_key: Some("sk-env".into()),
            run_time: Some("06:30".into()),
            ..EnvSource::empty()
        };
        let settings = SettingsFile {
            api_key: Some("sk-file".into()),
            run_time: Some("09:00".into()),
            ..SettingsFile::default()
        };
        let config = GrowthConfig::from_sources(env, settings).unwrap();
        assert_eq!(config.api_key, "sk-env");
        assert_eq!(config.run_time, NaiveTime::from_hms_opt(6, 30, 0).unwrap());
    }

    #[test]
    fn settings_file_fills_gaps() {
        let settings = SettingsFile {
            api_key: Some("sk-file".into()),
            output_dir: Some(PathBuf::from("/tmp/wisdom")),
            ..SettingsFile::default()
        };
        let config = GrowthConfig::from_sources(EnvSource::empty(), settings).unwrap();
        assert_eq!(config.api_key, "sk-file");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/wisdom"));
    }

    #[test]
    fn malformed_run_time_is_fatal() {
        let env = EnvSource {
            api_key: Some("sk-test".into()),
            run_time: Some("25:99".into()),
            ..EnvSource::empty()
        };
        let result = GrowthConfig::from_sources(env, SettingsFile::default());
        assert!(matches!(result, Err(ConfigError::InvalidRunTime(_))));
    }

    #[test]
    fn settings_toml_parses() {
        let raw =
            "api_key = \"sk-file\"\nrun_time = \"08:15\"\noutput_dir = \"out\"\ncatalog = \"short_form\"\n";
        let settings: SettingsFile = toml::from_str(raw).unwrap();
        assert_eq!(settings.api_key.as_deref(), Some("sk-file"));
        assert_eq!(settings.run_time.as_deref(), Some("08:15"));
        assert_eq!(settings.catalog, Some(CatalogVariant::ShortForm));
    }

    #[test]
    fn absent_settings_file_is_fine() {
        let settings = read_settings(Path::new("definitely-missing.toml")).unwrap();
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn run_time_parses_with_surrounding_space() {
        assert_eq!(
            parse_run_time(" 17:00 ").unwrap(),
            NaiveTime::from_hms_opt(17, 0, 0).unwrap()
        );
    }
}
