//! Host-independent HTTP request and response descriptions.
//!
//! The plugin never performs I/O itself. Collaborators build [`HttpRequest`]
//! values, the event handler wraps them in actions, and the plugin shim hands
//! them to Zellij's `web_request`. Results come back as [`HttpResponse`]
//! values correlated through a [`RequestTag`] stored in the request context.

use std::collections::BTreeMap;

/// Context key naming which collaborator a response belongs to.
const KIND_KEY: &str = "reelfinder_kind";

/// Context key holding the fetch id a response belongs to.
const FETCH_ID_KEY: &str = "reelfinder_fetch_id";

/// HTTP methods used by the catalog and analytics collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

/// A fully-formed outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Creates a `GET` request with no headers.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: BTreeMap::new(),
            body: Vec::new(),
        }
    }

    /// Creates a request carrying a JSON body.
    #[must_use]
    pub fn json(method: Method, url: impl Into<String>, body: &serde_json::Value) -> Self {
        Self {
            method,
            url: url.into(),
            headers: BTreeMap::new(),
            body: body.to_string().into_bytes(),
        }
        .header("content-type", "application/json")
    }

    /// Adds or replaces a header.
    #[must_use]
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_string(), value.into());
        self
    }

    /// Body decoded as JSON, for assertions and logging.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON.
    pub fn body_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_slice(&self.body)
    }
}

/// A response delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `true` for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Identifies which in-flight operation a web response answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestTag {
    /// Catalog search or discover request for the given fetch.
    Catalog { fetch_id: u64 },
    /// A step of the analytics write started by the given fetch.
    Analytics { fetch_id: u64 },
    /// The trending terms query.
    Trending,
}

impl RequestTag {
    /// Encodes the tag into a web request context map.
    #[must_use]
    pub fn to_context(self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        let (kind, fetch_id) = match self {
            Self::Catalog { fetch_id } => ("catalog", Some(fetch_id)),
            Self::Analytics { fetch_id } => ("analytics", Some(fetch_id)),
            Self::Trending => ("trending", None),
        };
        context.insert(KIND_KEY.to_string(), kind.to_string());
        if let Some(id) = fetch_id {
            context.insert(FETCH_ID_KEY.to_string(), id.to_string());
        }
        context
    }

    /// Decodes a tag from a web request context map.
    ///
    /// Returns `None` for responses to requests this plugin did not tag.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let fetch_id = || context.get(FETCH_ID_KEY)?.parse::<u64>().ok();

        match context.get(KIND_KEY)?.as_str() {
            "catalog" => Some(Self::Catalog { fetch_id: fetch_id()? }),
            "analytics" => Some(Self::Analytics { fetch_id: fetch_id()? }),
            "trending" => Some(Self::Trending),
            _ => None,
        }
    }
}
