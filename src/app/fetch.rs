//! Bookkeeping for the catalog fetch in flight.
//!
//! Every fetch gets a fresh id. Responses carry the id back, and only the
//! latest fetch may change the results area, so a slow response to an older
//! query can never overwrite a newer one.

use crate::domain::Movie;

/// The fetch whose outcome the results area is waiting on.
#[derive(Debug, Clone, PartialEq)]
pub struct InFlight {
    pub fetch_id: u64,
    pub query: String,
    /// Results held back while the analytics write for this fetch settles.
    pub staged: Option<Vec<Movie>>,
}

/// Allocates fetch ids and tracks the latest fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchTracker {
    last_id: u64,
    current: Option<InFlight>,
}

impl FetchTracker {
    /// Starts a new fetch for `query` and returns its id.
    ///
    /// Any fetch already in flight is orphaned: its response will be ignored.
    pub fn begin(&mut self, query: &str) -> u64 {
        self.last_id += 1;
        if let Some(previous) = &self.current {
            tracing::debug!(
                orphaned_fetch_id = previous.fetch_id,
                orphaned_query = %previous.query,
                "superseding fetch in flight"
            );
        }
        self.current = Some(InFlight {
            fetch_id: self.last_id,
            query: query.to_string(),
            staged: None,
        });
        self.last_id
    }

    /// `true` if `fetch_id` is the fetch the results area is waiting on.
    #[must_use]
    pub fn is_current(&self, fetch_id: u64) -> bool {
        self.current.as_ref().is_some_and(|f| f.fetch_id == fetch_id)
    }

    #[must_use]
    pub const fn current(&self) -> Option<&InFlight> {
        self.current.as_ref()
    }

    /// Holds results until the analytics step for `fetch_id` settles.
    pub fn stage(&mut self, fetch_id: u64, movies: Vec<Movie>) {
        if let Some(current) = self.current.as_mut().filter(|f| f.fetch_id == fetch_id) {
            current.staged = Some(movies);
        }
    }

    /// Ends `fetch_id` if it is current, returning any staged results.
    pub fn finish(&mut self, fetch_id: u64) -> Option<InFlight> {
        if self.is_current(fetch_id) {
            self.current.take()
        } else {
            None
        }
    }
}
