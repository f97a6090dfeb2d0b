//! Catalog request construction.
//!
//! A query chooses between exactly two endpoints: a non-empty query searches
//! by title, an empty one lists popular titles.

use crate::infrastructure::HttpRequest;
use url::Url;

/// Default catalog base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Builds authenticated requests against the movie catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogClient {
    base_url: String,
    api_key: String,
}

/// The endpoint a query routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `search/movie`, for a non-empty query.
    Search,
    /// `discover/movie` sorted by popularity, for an empty query.
    Discover,
}

impl Endpoint {
    #[must_use]
    pub fn for_query(query: &str) -> Self {
        if query.is_empty() {
            Self::Discover
        } else {
            Self::Search
        }
    }
}

impl CatalogClient {
    /// Creates a client. A trailing `/` on `base_url` is ignored.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Builds the request for `query`.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelfinder::catalog::CatalogClient;
    ///
    /// let client = CatalogClient::new("https://api.themoviedb.org/3", "key");
    ///
    /// let search = client.movies_request("the matrix");
    /// assert_eq!(search.url, "https://api.themoviedb.org/3/search/movie?query=the+matrix");
    ///
    /// let discover = client.movies_request("");
    /// assert_eq!(
    ///     discover.url,
    ///     "https://api.themoviedb.org/3/discover/movie?sort_by=popularity.desc"
    /// );
    /// ```
    #[must_use]
    pub fn movies_request(&self, query: &str) -> HttpRequest {
        let url = match Endpoint::for_query(query) {
            Endpoint::Search => self.endpoint_url("search/movie", &[("query", query)]),
            Endpoint::Discover => {
                self.endpoint_url("discover/movie", &[("sort_by", "popularity.desc")])
            }
        };

        HttpRequest::get(url)
            .header("accept", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    fn endpoint_url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let raw = format!("{}/{path}", self.base_url);
        match Url::parse_with_params(&raw, params) {
            Ok(url) => url.to_string(),
            Err(e) => {
                // Base URL came from config; fall back to manual encoding so the
                // request still goes out and fails visibly at the transport.
                tracing::warn!(base_url = %self.base_url, error = %e, "invalid catalog base url");
                let query: String = url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(params)
                    .finish();
                format!("{raw}?{query}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::Method;

    fn client() -> CatalogClient {
        CatalogClient::new("https://api.themoviedb.org/3/", "secret")
    }

    #[test]
    fn search_escapes_query() {
        let req = client().movies_request("bat & robin?");
        assert_eq!(
            req.url,
            "https://api.themoviedb.org/3/search/movie?query=bat+%26+robin%3F"
        );
    }

    #[test]
    fn empty_query_discovers_by_popularity() {
        let req = client().movies_request("");
        assert_eq!(Endpoint::for_query(""), Endpoint::Discover);
        assert!(req.url.ends_with("/discover/movie?sort_by=popularity.desc"));
    }

    #[test]
    fn requests_carry_fixed_headers() {
        let req = client().movies_request("bat");
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.headers.get("accept").map(String::as_str), Some("application/json"));
        assert_eq!(
            req.headers.get("Authorization").map(String::as_str),
            Some("Bearer secret")
        );
        assert!(req.body.is_empty());
    }

    #[test]
    fn whitespace_only_query_still_searches() {
        assert_eq!(Endpoint::for_query(" "), Endpoint::Search);
    }
}
