//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BACKOFFICE_DATA_FILE` - Dataset file (`.yaml`, `.yml` or `.json`)
//!
//! ## Optional
//! - `BACKOFFICE_LOG_JSON` - Emit JSON logs (default: false)
//! - `BACKOFFICE_ASSUME_YES` - Confirm destructive actions without prompting (default: false)
//! - `BACKOFFICE_RESET_REDIRECT_SECS` - Delay before leaving the reset page (default: 3)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_RESET_REDIRECT_SECS: u64 = 3;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Format of the dataset file, from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Yaml,
    Json,
}

impl DatasetFormat {
    /// Detect the format from a path's extension.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEnvVar` for anything but `yaml`, `yml` or `json`.
    pub fn detect(path: &std::path::Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(ConfigError::InvalidEnvVar(
                "BACKOFFICE_DATA_FILE".to_string(),
                format!("unsupported dataset extension: {}", path.display()),
            )),
        }
    }
}

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    /// Dataset file to load
    pub data_file: PathBuf,
    /// Dataset format, from the file extension
    pub data_format: DatasetFormat,
    /// Emit JSON logs instead of text
    pub log_json: bool,
    /// Answer every confirmation prompt with yes
    pub assume_yes: bool,
    /// Delay before the reset confirmation page returns to login
    pub reset_redirect: Duration,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required environment variables are missing
    /// or have invalid values.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_file = PathBuf::from(get_required(&lookup, "BACKOFFICE_DATA_FILE")?);
        let data_format = DatasetFormat::detect(&data_file)?;
        let reset_secs = get_or_default(
            &lookup,
            "BACKOFFICE_RESET_REDIRECT_SECS",
            DEFAULT_RESET_REDIRECT_SECS,
        )?;

        Ok(Self {
            data_file,
            data_format,
            log_json: get_flag(&lookup, "BACKOFFICE_LOG_JSON")?,
            assume_yes: get_flag(&lookup, "BACKOFFICE_ASSUME_YES")?,
            reset_redirect: Duration::from_secs(reset_secs),
        })
    }
}

fn get_required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<String, ConfigError> {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

fn get_or_default<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    lookup(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidEnvVar(key.to_string(), value.clone()))
    })
}

fn get_flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<bool, ConfigError> {
    let Some(value) = lookup(key) else {
        return Ok(false);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnvVar(key.to_string(), value)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            AdminConfig::from_lookup(lookup(&[("BACKOFFICE_DATA_FILE", "seed.yaml")])).unwrap();
        assert_eq!(config.data_format, DatasetFormat::Yaml);
        assert!(!config.log_json);
        assert!(!config.assume_yes);
        assert_eq!(config.reset_redirect, Duration::from_secs(3));
    }

    #[test]
    fn test_missing_data_file() {
        let err = AdminConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == "BACKOFFICE_DATA_FILE"));
    }

    #[test]
    fn test_flags_and_redirect() {
        let config = AdminConfig::from_lookup(lookup(&[
            ("BACKOFFICE_DATA_FILE", "data/dashboard.json"),
            ("BACKOFFICE_LOG_JSON", "true"),
            ("BACKOFFICE_ASSUME_YES", "1"),
            ("BACKOFFICE_RESET_REDIRECT_SECS", "10"),
        ]))
        .unwrap();
        assert_eq!(config.data_format, DatasetFormat::Json);
        assert!(config.log_json);
        assert!(config.assume_yes);
        assert_eq!(config.reset_redirect, Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_values() {
        let err = AdminConfig::from_lookup(lookup(&[
            ("BACKOFFICE_DATA_FILE", "seed.yaml"),
            ("BACKOFFICE_ASSUME_YES", "maybe"),
        ]))
        .unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == "BACKOFFICE_ASSUME_YES")
        );

        let err =
            AdminConfig::from_lookup(lookup(&[("BACKOFFICE_DATA_FILE", "seed.csv")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));

        let err = AdminConfig::from_lookup(lookup(&[
            ("BACKOFFICE_DATA_FILE", "seed.yaml"),
            ("BACKOFFICE_RESET_REDIRECT_SECS", "-1"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, ref v) if v == "-1"));
    }
}
