//! Movie domain model.
//!
//! A [`Movie`] is one record from the catalog's `results` array. Records are
//! immutable once received: every fetch replaces the whole list.

use serde::{Deserialize, Serialize};

/// Base URL for poster images at the width used by result cards.
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// A single movie returned by the catalog.
///
/// Only the fields the UI and analytics need are kept; unknown fields in the
/// payload are ignored. The catalog sends `null` or omits fields for sparse
/// records, so everything except `id` has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub original_language: String,
}

impl Movie {
    /// Rating rounded to one decimal, or `N/A` for unrated titles.
    ///
    /// ```
    /// use reelfinder::domain::Movie;
    ///
    /// let movie: Movie = serde_json::from_str(r#"{"id": 1, "vote_average": 7.25}"#).unwrap();
    /// assert_eq!(movie.rating_label(), "7.2");
    /// ```
    #[must_use]
    pub fn rating_label(&self) -> String {
        if self.vote_average > 0.0 {
            format!("{:.1}", self.vote_average)
        } else {
            "N/A".to_string()
        }
    }

    /// Release year taken from the `YYYY-MM-DD` date, or `N/A`.
    ///
    /// Dates that do not parse still yield their leading segment, matching
    /// how partial dates like `"1999"` come back from the catalog.
    #[must_use]
    pub fn release_year(&self) -> String {
        let Some(date) = self.release_date.as_deref().filter(|d| !d.is_empty()) else {
            return "N/A".to_string();
        };

        chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").map_or_else(
            |_| date.split('-').next().unwrap_or(date).to_string(),
            |parsed| parsed.format("%Y").to_string(),
        )
    }

    /// Language code in upper case for display (e.g. `EN`).
    #[must_use]
    pub fn language_label(&self) -> String {
        if self.original_language.is_empty() {
            "N/A".to_string()
        } else {
            self.original_language.to_uppercase()
        }
    }

    /// Absolute poster URL, or `None` when the catalog has no poster.
    #[must_use]
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|path| format!("{POSTER_BASE_URL}{path}"))
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
