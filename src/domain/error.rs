//! Error types for the Reelfinder plugin.
//!
//! [`ReelfinderError`] covers every failure the plugin can observe, from missing
//! configuration to catalog responses that cannot be decoded. Errors never take
//! the plugin down: the fetch orchestrator turns them into a status message via
//! [`ReelfinderError::user_message`].

use thiserror::Error;

/// Message shown when a catalog request fails for any reason the API did not
/// explain itself.
pub const GENERIC_FETCH_ERROR: &str = "Error fetching movies. Please try again later.";

/// Fallback message for an API-level failure that carries no `Error` text.
pub const API_FAILURE_FALLBACK: &str = "Failed to fetch movies";

/// The main error type for Reelfinder operations.
///
/// # Examples
///
/// ```
/// use reelfinder::domain::{ReelfinderError, GENERIC_FETCH_ERROR};
///
/// let err = ReelfinderError::Http { status: 503 };
/// assert_eq!(err.user_message(), GENERIC_FETCH_ERROR);
///
/// let err = ReelfinderError::Api("Invalid API key".to_string());
/// assert_eq!(err.user_message(), "Invalid API key");
/// ```
#[derive(Debug, Error)]
pub enum ReelfinderError {
    /// Configuration is invalid or missing.
    ///
    /// Raised at load time, most commonly when no catalog API key is available.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The catalog answered with a non-success HTTP status.
    ///
    /// The status code is logged but never surfaced to the user.
    #[error("Failed to fetch movies (HTTP {status})")]
    Http {
        /// HTTP status code returned by the host transport.
        status: u16,
    },

    /// The catalog answered successfully but flagged a logical failure.
    ///
    /// Holds the server-supplied message, or [`API_FAILURE_FALLBACK`].
    #[error("{0}")]
    Api(String),

    /// A response body could not be decoded as the expected JSON shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The analytics backend rejected or failed a request.
    #[error("Analytics error: {0}")]
    Analytics(String),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReelfinderError {
    /// Returns the text displayed in the results area for this error.
    ///
    /// API-level failures and configuration problems are shown verbatim;
    /// everything else collapses into [`GENERIC_FETCH_ERROR`].
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(message) => message.clone(),
            Self::Config(_) => self.to_string(),
            _ => GENERIC_FETCH_ERROR.to_string(),
        }
    }
}

/// A specialized `Result` type for Reelfinder operations.
pub type Result<T> = std::result::Result<T, ReelfinderError>;
