//! Error types for folio_config

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or validating a site configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for the site schema
    #[error("failed to parse site config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Portfolio item uses a category that is not declared
    #[error("portfolio item '{item}' has undeclared category '{category}'")]
    UnknownCategory { item: String, category: String },

    /// Two items of one section resolve to the same key
    #[error("duplicate {section} key '{key}'")]
    DuplicateKey { section: &'static str, key: String },

    /// Any other semantic problem
    #[error("invalid site config: {0}")]
    Invalid(String),
}

/// Result type for folio_config operations
pub type Result<T> = std::result::Result<T, ConfigError>;
