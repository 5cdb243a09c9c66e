//! Error types for the contract runner
//!
//! Messages are meant to be read in CI logs, so each one says which part of
//! the run broke and, where it helps, what to check next.

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the contract runner
#[derive(Error, Debug)]
pub enum Error {
    // === Setup Errors ===
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Login response did not contain a usable 'accessToken'")]
    MissingToken,

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    // === Transport Errors ===
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // === Contract Errors ===
    #[error("Contract violation: {0}")]
    Assertion(String),

    #[error("Step '{step}' needs {what}, but no earlier step produced it")]
    MissingPrecondition { step: String, what: String },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a missing precondition error for a step
    pub fn missing_precondition(step: &str, what: &str) -> Self {
        Self::MissingPrecondition {
            step: step.to_string(),
            what: what.to_string(),
        }
    }

    /// Create an invalid base URL error
    pub fn invalid_base_url(url: &str, reason: impl ToString) -> Self {
        Self::InvalidBaseUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error aborts the whole run rather than a single step
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Authentication(_)
                | Error::MissingToken
                | Error::InvalidBaseUrl { .. }
                | Error::Config(_)
                | Error::ConfigParse(_)
                | Error::FileRead { .. }
        )
    }
}
