/*!
 * Error types for the jasweep application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request did not complete in time
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl ProviderError {
    /// Whether retrying the same request could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionError(_) | Self::Timeout(_) | Self::RateLimitExceeded(_) => true,
            Self::ApiError { status_code, .. } => *status_code >= 500,
            Self::RequestFailed(_) | Self::ParseError(_) | Self::AuthenticationError(_) => false,
        }
    }

    /// Map an HTTP error status and body onto the matching variant
    pub fn from_status(status_code: u16, message: String) -> Self {
        match status_code {
            401 | 403 => Self::AuthenticationError(message),
            429 => Self::RateLimitExceeded(message),
            _ => Self::ApiError { status_code, message },
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else if error.is_connect() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors raised while parsing or printing a source file
#[derive(Error, Debug)]
pub enum SyntaxError {
    /// The grammar could not be loaded into the parser
    #[error("Failed to load {dialect} grammar: {message}")]
    Language {
        /// Dialect whose grammar failed to load
        dialect: String,
        /// Loader message
        message: String,
    },

    /// The source text is not syntactically recognisable
    #[error("Failed to parse source as {dialect}: {message}")]
    Parse {
        /// Dialect used for parsing
        dialect: String,
        /// What went wrong
        message: String,
    },

    /// Two replacements target overlapping byte ranges
    #[error("Replacement for bytes {start}..{end} overlaps an earlier replacement")]
    OverlappingReplacement {
        /// Start byte of the rejected replacement
        start: usize,
        /// End byte of the rejected replacement
        end: usize,
    },

    /// The rewritten text is no longer valid source
    #[error("Rewritten source is not valid {dialect}: {message}")]
    Print {
        /// Dialect used for validation
        dialect: String,
        /// What went wrong
        message: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from parsing or printing source
    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
