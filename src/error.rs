use std::io;

use thiserror::Error;

use crate::config::ConfigurationError;
use crate::settings::SettingsError;

/// Everything that can stop the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid game configuration: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
