//! Popular search terms reported by the analytics backend.

use serde::{Deserialize, Serialize};

/// One row of the trending strip: a search term and how often it was searched.
///
/// Field names follow the analytics collection's document attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingSearch {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub movie_id: Option<u64>,
    #[serde(default)]
    pub poster_url: Option<String>,
}
