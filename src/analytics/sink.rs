//! Analytics sink abstraction.
//!
//! Recording a search is a short request chain driven by the event handler:
//! [`AnalyticsSink::record`] yields the first request, each response is fed
//! back through [`AnalyticsSink::after_lookup`] and
//! [`AnalyticsSink::after_write`]. The sink itself stays stateless; the
//! handler carries the search term and top result between steps.

use crate::domain::{Movie, Result, TrendingSearch};
use crate::infrastructure::{HttpRequest, HttpResponse};

/// Best-effort store of which search term produced which top result.
///
/// Failures are reported to the caller, which logs them and moves on. They
/// never reach the results area.
pub trait AnalyticsSink: std::fmt::Debug {
    /// First request of a record chain: look up the term's existing entry.
    fn record(&self, search_term: &str, top_result: &Movie) -> HttpRequest;

    /// Second request: create the entry, or bump its count.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup failed or its body is malformed.
    fn after_lookup(
        &self,
        search_term: &str,
        top_result: &Movie,
        response: &HttpResponse,
    ) -> Result<HttpRequest>;

    /// Confirms the write landed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejected the write.
    fn after_write(&self, response: &HttpResponse) -> Result<()>;

    /// Request for the most-searched terms.
    fn trending(&self) -> HttpRequest;

    /// Decodes the trending response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request failed or the body is malformed.
    fn parse_trending(&self, response: &HttpResponse) -> Result<Vec<TrendingSearch>>;
}

/// Where a record chain currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordStage {
    /// Waiting for the lookup response.
    Lookup,
    /// Waiting for the create/update response.
    Write,
}

/// A record chain in flight, owned by the fetch that started it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordJob {
    pub fetch_id: u64,
    pub search_term: String,
    pub top_result: Movie,
    pub stage: RecordStage,
}
