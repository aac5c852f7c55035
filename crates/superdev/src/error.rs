//! Error types for superdev crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SuperDevError {
    #[error("Build error: {0}")]
    Build(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Logging error: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, SuperDevError>;
