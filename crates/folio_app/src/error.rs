//! Error types for folio_app

use folio_config::ConfigError;
use thiserror::Error;

/// Errors that can occur while driving the page
#[derive(Error, Debug)]
pub enum FolioError {
    /// Site configuration could not be loaded or is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Filter category is not one of the portfolio's declared categories
    #[error("unknown portfolio category '{0}'")]
    UnknownCategory(String),

    /// Page operation requires `Page::mount` first
    #[error("page is not mounted")]
    NotMounted,

    /// Contact form rejected a submission
    #[error("contact form: {0}")]
    Form(#[from] crate::contact::FormError),
}

/// Result type for folio_app operations
pub type Result<T> = std::result::Result<T, FolioError>;
