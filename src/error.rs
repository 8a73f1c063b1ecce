//! Error types for fbget

use crate::core::descriptor::VariantTag;
use thiserror::Error;

/// Main error type for fbget operations
#[derive(Debug, Error)]
pub enum FbgetError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Resolution failed: {0}")]
    Resolution(String),

    #[error("No locator for variant '{0}'")]
    UnresolvedLocator(VariantTag),

    #[error("Transfer failed: {0}")]
    Transfer(String),

    #[error("Invalid transition: {0}")]
    GuardViolation(String),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl FbgetError {
    /// Check if the error is a rejected user action (state left untouched)
    pub fn is_guard_violation(&self) -> bool {
        matches!(self, FbgetError::GuardViolation(_))
    }

    /// Check if the error stems from the submitted link itself
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            FbgetError::InvalidInput(_) | FbgetError::UrlError(_)
        )
    }
}
