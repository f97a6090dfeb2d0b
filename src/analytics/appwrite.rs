//! Appwrite-backed analytics sink.
//!
//! Search counts live in one Appwrite collection with documents shaped like:
//!
//! ```json
//! { "$id": "...", "searchTerm": "batman", "count": 4, "movie_id": 268,
//!   "poster_url": "https://image.tmdb.org/t/p/w500/....jpg" }
//! ```
//!
//! Requests go straight to the REST API. Queries use Appwrite's JSON query
//! syntax, passed as `queries[n]` parameters.

use super::sink::AnalyticsSink;
use crate::domain::{Movie, ReelfinderError, Result, TrendingSearch};
use crate::infrastructure::{HttpRequest, HttpResponse, Method};
use serde::Deserialize;
use serde_json::json;
use url::Url;

/// Number of entries in the trending strip.
pub const TRENDING_LIMIT: u32 = 5;

/// Lets the backend pick the document id on create.
const UNIQUE_ID: &str = "unique()";

/// Connection settings for the Appwrite collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppwriteSettings {
    /// API root including version, e.g. `https://cloud.appwrite.io/v1`.
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub collection_id: String,
    /// Server API key. Optional when collection permissions allow guests.
    pub api_key: Option<String>,
}

/// Analytics sink writing search counts to Appwrite.
#[derive(Debug, Clone)]
pub struct AppwriteSink {
    base: Url,
    settings: AppwriteSettings,
}

#[derive(Debug, Deserialize)]
struct DocumentList<T> {
    #[serde(default = "Vec::new")]
    documents: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct SearchDocument {
    #[serde(rename = "$id")]
    id: String,
    #[serde(default)]
    count: u64,
    #[serde(default)]
    movie_id: Option<u64>,
    #[serde(default)]
    poster_url: Option<String>,
}

impl AppwriteSink {
    /// Creates a sink after validating the endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`ReelfinderError::Config`] if the endpoint is not an absolute
    /// http(s) URL.
    pub fn new(settings: AppwriteSettings) -> Result<Self> {
        let base = Url::parse(&settings.endpoint).map_err(|e| {
            ReelfinderError::Config(format!("invalid appwrite_endpoint '{}': {e}", settings.endpoint))
        })?;

        if base.cannot_be_a_base() {
            return Err(ReelfinderError::Config(format!(
                "appwrite_endpoint '{}' is not a base URL",
                settings.endpoint
            )));
        }

        Ok(Self { base, settings })
    }

    fn documents_url(&self, document_id: Option<&str>, queries: &[serde_json::Value]) -> String {
        let mut url = self.base.clone();

        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                "databases",
                self.settings.database_id.as_str(),
                "collections",
                self.settings.collection_id.as_str(),
                "documents",
            ]);
            if let Some(id) = document_id {
                segments.push(id);
            }
        }

        if !queries.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (i, query) in queries.iter().enumerate() {
                pairs.append_pair(&format!("queries[{i}]"), &query.to_string());
            }
        }

        url.to_string()
    }

    fn authorize(&self, request: HttpRequest) -> HttpRequest {
        let request = request
            .header("X-Appwrite-Project", self.settings.project_id.clone())
            .header("accept", "application/json");

        match &self.settings.api_key {
            Some(key) => request.header("X-Appwrite-Key", key.clone()),
            None => request,
        }
    }

    fn decode_documents<T>(response: &HttpResponse, what: &str) -> Result<Vec<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        if !response.is_success() {
            return Err(ReelfinderError::Analytics(format!(
                "{what} failed with HTTP {}",
                response.status
            )));
        }
        let list: DocumentList<T> = serde_json::from_slice(&response.body)?;
        Ok(list.documents)
    }
}

impl AnalyticsSink for AppwriteSink {
    fn record(&self, search_term: &str, _top_result: &Movie) -> HttpRequest {
        let query = json!({
            "method": "equal",
            "attribute": "searchTerm",
            "values": [search_term],
        });
        self.authorize(HttpRequest::get(self.documents_url(None, &[query])))
    }

    fn after_lookup(
        &self,
        search_term: &str,
        top_result: &Movie,
        response: &HttpResponse,
    ) -> Result<HttpRequest> {
        let existing = Self::decode_documents::<SearchDocument>(response, "search term lookup")?;

        let request = if let Some(doc) = existing.into_iter().next() {
            tracing::debug!(document_id = %doc.id, count = doc.count, "incrementing search count");
            let body = json!({
                "data": {
                    "searchTerm": search_term,
                    "count": doc.count + 1,
                    "movie_id": doc.movie_id.unwrap_or(top_result.id),
                    "poster_url": doc.poster_url.or_else(|| top_result.poster_url()),
                }
            });
            HttpRequest::json(Method::Put, self.documents_url(Some(&doc.id), &[]), &body)
        } else {
            tracing::debug!(search_term = %search_term, movie_id = top_result.id, "creating search count");
            let body = json!({
                "documentId": UNIQUE_ID,
                "data": {
                    "searchTerm": search_term,
                    "count": 1,
                    "movie_id": top_result.id,
                    "poster_url": top_result.poster_url(),
                }
            });
            HttpRequest::json(Method::Post, self.documents_url(None, &[]), &body)
        };

        Ok(self.authorize(request))
    }

    fn after_write(&self, response: &HttpResponse) -> Result<()> {
        if response.is_success() {
            Ok(())
        } else {
            Err(ReelfinderError::Analytics(format!(
                "search count write failed with HTTP {}",
                response.status
            )))
        }
    }

    fn trending(&self) -> HttpRequest {
        let queries = [
            json!({ "method": "limit", "values": [TRENDING_LIMIT] }),
            json!({ "method": "orderDesc", "attribute": "count" }),
        ];
        self.authorize(HttpRequest::get(self.documents_url(None, &queries)))
    }

    fn parse_trending(&self, response: &HttpResponse) -> Result<Vec<TrendingSearch>> {
        let mut trending = Self::decode_documents::<TrendingSearch>(response, "trending query")?;
        trending.truncate(TRENDING_LIMIT as usize);
        Ok(trending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> AppwriteSettings {
        AppwriteSettings {
            endpoint: "https://cloud.appwrite.io/v1".to_string(),
            project_id: "proj".to_string(),
            database_id: "db".to_string(),
            collection_id: "metrics".to_string(),
            api_key: Some("server-key".to_string()),
        }
    }

    fn sink() -> AppwriteSink {
        AppwriteSink::new(settings()).unwrap()
    }

    fn batman() -> Movie {
        serde_json::from_value(json!({
            "id": 268,
            "title": "Batman",
            "poster_path": "/bat.jpg",
        }))
        .unwrap()
    }

    fn query_values(url: &str) -> Vec<serde_json::Value> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(_, v)| serde_json::from_str(&v).unwrap())
            .collect()
    }

    #[test]
    fn rejects_relative_endpoint() {
        let mut bad = settings();
        bad.endpoint = "cloud.appwrite.io".to_string();
        assert!(matches!(AppwriteSink::new(bad), Err(ReelfinderError::Config(_))));
    }

    #[test]
    fn lookup_filters_by_term() {
        let req = sink().record("batman", &batman());

        assert_eq!(req.method, Method::Get);
        assert!(req
            .url
            .starts_with("https://cloud.appwrite.io/v1/databases/db/collections/metrics/documents?"));
        assert_eq!(
            query_values(&req.url),
            vec![json!({"method": "equal", "attribute": "searchTerm", "values": ["batman"]})]
        );
        assert_eq!(req.headers.get("X-Appwrite-Project").map(String::as_str), Some("proj"));
        assert_eq!(req.headers.get("X-Appwrite-Key").map(String::as_str), Some("server-key"));
    }

    #[test]
    fn unseen_term_creates_document_from_top_result() {
        let lookup = HttpResponse::new(200, r#"{"total": 0, "documents": []}"#);
        let req = sink().after_lookup("batman", &batman(), &lookup).unwrap();

        assert_eq!(req.method, Method::Post);
        assert!(req.url.ends_with("/collections/metrics/documents"));
        let body = req.body_json().unwrap();
        assert_eq!(body["documentId"], "unique()");
        assert_eq!(body["data"]["count"], 1);
        assert_eq!(body["data"]["movie_id"], 268);
        assert_eq!(body["data"]["poster_url"], "https://image.tmdb.org/t/p/w500/bat.jpg");
    }

    #[test]
    fn seen_term_increments_existing_document() {
        let lookup = HttpResponse::new(
            200,
            r#"{"total": 1, "documents": [{"$id": "doc42", "searchTerm": "batman",
                "count": 4, "movie_id": 414906, "poster_url": "https://x/old.jpg"}]}"#,
        );
        let req = sink().after_lookup("batman", &batman(), &lookup).unwrap();

        assert_eq!(req.method, Method::Put);
        assert!(req.url.ends_with("/collections/metrics/documents/doc42"));
        let body = req.body_json().unwrap();
        assert_eq!(body["data"]["count"], 5);
        assert_eq!(body["data"]["movie_id"], 414_906, "existing association is kept");
        assert_eq!(body["data"]["poster_url"], "https://x/old.jpg");
    }

    #[test]
    fn failed_lookup_is_an_analytics_error() {
        let err = sink()
            .after_lookup("batman", &batman(), &HttpResponse::new(401, "{}"))
            .unwrap_err();
        assert!(matches!(err, ReelfinderError::Analytics(_)));
    }

    #[test]
    fn write_status_is_checked() {
        assert!(sink().after_write(&HttpResponse::new(201, "{}")).is_ok());
        assert!(sink().after_write(&HttpResponse::new(500, "")).is_err());
    }

    #[test]
    fn trending_orders_by_count() {
        let req = sink().trending();
        assert_eq!(
            query_values(&req.url),
            vec![
                json!({"method": "limit", "values": [5]}),
                json!({"method": "orderDesc", "attribute": "count"}),
            ]
        );

        let response = HttpResponse::new(
            200,
            r#"{"documents": [
                {"$id": "a", "searchTerm": "batman", "count": 9, "movie_id": 268},
                {"$id": "b", "searchTerm": "heat", "count": 3}
            ]}"#,
        );
        let trending = sink().parse_trending(&response).unwrap();
        assert_eq!(trending.len(), 2);
        assert_eq!(trending[0].search_term, "batman");
        assert_eq!(trending[0].count, 9);
        assert_eq!(trending[1].movie_id, None);
    }

    #[test]
    fn guest_access_omits_key_header() {
        let mut guest = settings();
        guest.api_key = None;
        let req = AppwriteSink::new(guest).unwrap().trending();
        assert!(!req.headers.contains_key("X-Appwrite-Key"));
    }
}
