//! Catalog response interpretation.
//!
//! Three outcomes are possible for a catalog response: a transport-level
//! failure (non-2xx), an API-level failure signalled in the body, or a result
//! list. Anything that does not decode is an error of its own.

use crate::domain::{Movie, ReelfinderError, Result, API_FAILURE_FALLBACK};
use crate::infrastructure::HttpResponse;
use serde::Deserialize;

/// Value of the `Response` field that marks an API-level failure.
const FAILURE_SENTINEL: &str = "False";

/// Wire shape of a catalog body.
#[derive(Debug, Deserialize)]
struct CatalogBody {
    #[serde(default)]
    results: Option<Vec<Movie>>,
    #[serde(rename = "Response", default)]
    response: Option<String>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

/// Turns a catalog response into the result list.
///
/// # Errors
///
/// - [`ReelfinderError::Http`] for a non-success status
/// - [`ReelfinderError::Decode`] when the body is not the expected JSON
/// - [`ReelfinderError::Api`] when the body carries the failure sentinel; the
///   message is the server's `Error` text, or a generic fallback
///
/// # Examples
///
/// ```
/// use reelfinder::catalog::interpret;
/// use reelfinder::infrastructure::HttpResponse;
///
/// let ok = HttpResponse::new(200, r#"{"results": [{"id": 1, "title": "Heat"}]}"#);
/// assert_eq!(interpret(&ok).unwrap()[0].title, "Heat");
///
/// let flagged = HttpResponse::new(200, r#"{"Response": "False", "Error": "X"}"#);
/// assert_eq!(interpret(&flagged).unwrap_err().user_message(), "X");
/// ```
pub fn interpret(response: &HttpResponse) -> Result<Vec<Movie>> {
    if !response.is_success() {
        return Err(ReelfinderError::Http {
            status: response.status,
        });
    }

    let body: CatalogBody = serde_json::from_slice(&response.body)?;

    if body.response.as_deref() == Some(FAILURE_SENTINEL) {
        let message = body
            .error
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| API_FAILURE_FALLBACK.to_string());
        return Err(ReelfinderError::Api(message));
    }

    Ok(body.results.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GENERIC_FETCH_ERROR;

    fn ok(body: &str) -> HttpResponse {
        HttpResponse::new(200, body)
    }

    #[test]
    fn keeps_catalog_order() {
        let movies = interpret(&ok(
            r#"{"page": 1, "results": [{"id": 3, "title": "C"}, {"id": 1, "title": "A"}]}"#,
        ))
        .unwrap();
        let ids: Vec<u64> = movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn missing_results_is_empty() {
        assert!(interpret(&ok(r#"{"page": 1}"#)).unwrap().is_empty());
        assert!(interpret(&ok(r#"{"results": null}"#)).unwrap().is_empty());
    }

    #[test]
    fn non_success_status_is_generic_failure() {
        let err = interpret(&HttpResponse::new(401, r#"{"status_message": "bad key"}"#)).unwrap_err();
        assert!(matches!(err, ReelfinderError::Http { status: 401 }));
        assert_eq!(err.user_message(), GENERIC_FETCH_ERROR);
    }

    #[test]
    fn sentinel_without_message_uses_fallback() {
        let err = interpret(&ok(r#"{"Response": "False"}"#)).unwrap_err();
        assert_eq!(err.user_message(), API_FAILURE_FALLBACK);

        let err = interpret(&ok(r#"{"Response": "False", "Error": ""}"#)).unwrap_err();
        assert_eq!(err.user_message(), API_FAILURE_FALLBACK);
    }

    #[test]
    fn sentinel_true_is_not_a_failure() {
        let movies = interpret(&ok(r#"{"Response": "True", "results": [{"id": 1}]}"#)).unwrap();
        assert_eq!(movies.len(), 1);
    }

    #[test]
    fn garbage_body_is_decode_error() {
        let err = interpret(&ok("<html>gateway</html>")).unwrap_err();
        assert!(matches!(err, ReelfinderError::Decode(_)));
        assert_eq!(err.user_message(), GENERIC_FETCH_ERROR);
    }
}
