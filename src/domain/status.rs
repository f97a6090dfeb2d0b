//! Results-area status and its transition function.
//!
//! The results area shows exactly one of: a loading indicator, an error
//! message, or the result list. Encoding that as a single enum makes the
//! display precedence (loading over error over ready) structural instead of
//! something every renderer has to re-derive from flags.

use super::Movie;

/// What the results area currently displays.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Status {
    /// A catalog request (and possibly its analytics write) is in flight.
    #[default]
    Loading,
    /// The last fetch failed; holds the user-facing message.
    Error(String),
    /// The last fetch succeeded; holds the results in catalog order.
    Ready(Vec<Movie>),
}

impl Status {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Movies currently on display; empty unless `Ready`.
    #[must_use]
    pub fn movies(&self) -> &[Movie] {
        match self {
            Self::Ready(movies) => movies,
            Self::Loading | Self::Error(_) => &[],
        }
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            Self::Loading | Self::Ready(_) => None,
        }
    }
}

/// Outcome of one step of a fetch, fed to [`transition`].
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// A fetch began.
    Started,
    /// The fetch finished with results.
    Succeeded(Vec<Movie>),
    /// The fetch finished with a user-facing failure message.
    Failed(String),
}

/// Computes the next status from the previous one and a fetch outcome.
///
/// Every outcome fully determines the next status; the previous status is
/// accepted so callers can log the edge, and so a future outcome (such as a
/// partial refresh) has somewhere to look.
///
/// ```
/// use reelfinder::domain::status::{transition, FetchOutcome, Status};
///
/// let loading = transition(&Status::Error("boom".into()), FetchOutcome::Started);
/// assert_eq!(loading, Status::Loading);
///
/// let ready = transition(&loading, FetchOutcome::Succeeded(vec![]));
/// assert_eq!(ready, Status::Ready(vec![]));
/// ```
#[must_use]
pub fn transition(previous: &Status, outcome: FetchOutcome) -> Status {
    let next = match outcome {
        FetchOutcome::Started => Status::Loading,
        FetchOutcome::Succeeded(movies) => Status::Ready(movies),
        FetchOutcome::Failed(message) => Status::Error(message),
    };

    tracing::trace!(
        from = previous.label(),
        to = next.label(),
        "status transition"
    );

    next
}

impl Status {
    const fn label(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Error(_) => "error",
            Self::Ready(_) => "ready",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64) -> Movie {
        serde_json::from_value(serde_json::json!({ "id": id, "title": format!("m{id}") })).unwrap()
    }

    #[test]
    fn started_clears_previous_error() {
        let next = transition(&Status::Error("old".into()), FetchOutcome::Started);
        assert!(next.is_loading());
        assert!(next.error_message().is_none());
    }

    #[test]
    fn failure_drops_results() {
        let ready = Status::Ready(vec![movie(1), movie(2)]);
        let next = transition(&ready, FetchOutcome::Failed("nope".into()));
        assert_eq!(next.error_message(), Some("nope"));
        assert!(next.movies().is_empty());
    }

    #[test]
    fn success_replaces_list_wholesale() {
        let ready = Status::Ready(vec![movie(1), movie(2)]);
        let next = transition(&ready, FetchOutcome::Succeeded(vec![movie(3)]));
        assert_eq!(next.movies(), &[movie(3)]);
    }
}
