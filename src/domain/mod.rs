//! Domain layer for the Reelfinder plugin.
//!
//! Holds the types the rest of the plugin reasons about, independent of Zellij
//! APIs and of the HTTP collaborators.
//!
//! # Organization
//!
//! - [`error`]: Error types, result alias, and user-facing messages
//! - [`movie`]: The catalog's movie record
//! - [`status`]: Results-area status and its pure transition function
//! - [`trending`]: Popular search terms reported by the analytics backend

pub mod error;
pub mod movie;
pub mod status;
pub mod trending;

pub use error::{ReelfinderError, Result, API_FAILURE_FALLBACK, GENERIC_FETCH_ERROR};
pub use movie::Movie;
pub use status::{FetchOutcome, Status};
pub use trending::TrendingSearch;
