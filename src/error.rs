use std::io;

use thiserror::Error;

use crate::models::config::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid options. cause: {0}")]
    Config(#[from] ConfigError),
    #[error("unable to register signal handlers. cause: {0}")]
    Signals(io::Error),
}
