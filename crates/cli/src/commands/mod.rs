//! Command implementations.

pub mod delete;
pub mod inbox;
pub mod list;
pub mod validate;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use backoffice_admin::config::{AdminConfig, ConfigError};
use backoffice_admin::store::{AutoConfirm, Confirm, ConfirmWith};
use backoffice_admin::{AdminState, Dataset};
use thiserror::Error;
use tracing::info;

/// Errors raised by the commands themselves.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Dataset file does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Seeded records fail their form rules.
    #[error("{0} invalid record(s) found")]
    InvalidDataset(usize),
}

/// Load configuration, letting command-line flags override the environment.
///
/// # Errors
///
/// Returns `ConfigError` if no dataset file is given or a variable is invalid.
pub fn load_config(data: Option<&str>, yes: bool) -> Result<AdminConfig, ConfigError> {
    dotenvy::dotenv().ok();
    let mut config = AdminConfig::from_lookup(|key| match (key, data) {
        ("BACKOFFICE_DATA_FILE", Some(path)) => Some(path.to_owned()),
        _ => std::env::var(key).ok(),
    })?;
    config.assume_yes |= yes;
    Ok(config)
}

/// Read the dataset file and seed the dashboard state.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub async fn load_state(config: &AdminConfig) -> Result<AdminState, Box<dyn std::error::Error>> {
    let path = &config.data_file;
    if !path.exists() {
        return Err(CommandError::FileNotFound(path.clone()).into());
    }

    info!(path = %path.display(), "Loading dataset from file");
    let content = tokio::fs::read_to_string(path).await?;
    let dataset = Dataset::parse(&content, config.data_format)?;
    Ok(AdminState::from_dataset(dataset))
}

/// Confirmation source for destructive commands.
pub enum Confirmer {
    Auto(AutoConfirm),
    Prompt(ConfirmWith<fn(&str) -> bool>),
}

impl Confirm for Confirmer {
    fn confirm(&mut self, prompt: &str) -> bool {
        match self {
            Self::Auto(auto) => auto.confirm(prompt),
            Self::Prompt(ask) => ask.confirm(prompt),
        }
    }
}

/// `--yes` answers every prompt; otherwise ask on the terminal.
#[must_use]
pub fn confirmer(assume_yes: bool) -> Confirmer {
    if assume_yes {
        Confirmer::Auto(AutoConfirm(true))
    } else {
        Confirmer::Prompt(ConfirmWith(ask_terminal as fn(&str) -> bool))
    }
}

fn ask_terminal(prompt: &str) -> bool {
    let mut stderr = std::io::stderr().lock();
    if write!(stderr, "{prompt} [y/N] ").and_then(|()| stderr.flush()).is_err() {
        return false;
    }
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
