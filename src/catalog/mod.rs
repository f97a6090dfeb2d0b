//! Movie catalog collaborator.
//!
//! - [`client`]: Endpoint routing and authenticated request construction
//! - [`response`]: Status, sentinel, and body interpretation

pub mod client;
pub mod response;

pub use client::{CatalogClient, Endpoint, DEFAULT_BASE_URL};
pub use response::interpret;
