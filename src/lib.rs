//! Reelfinder: a Zellij plugin for browsing movies from the TMDB catalog.
//!
//! Reelfinder is a terminal multiplexer plugin that provides:
//! - A search box whose input settles after a quiet period before querying
//! - Popular movies when the query is empty, title search otherwise
//! - Result cards with rating, language, and release year
//! - Optional search analytics recorded to an Appwrite collection
//! - A trending strip of the most-searched terms

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, debounce, fetch tracking         │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Catalog       │   │ Analytics     │
//! │ (ui/)         │   │ (catalog/)    │   │ (analytics/)  │
//! │ - Rendering   │   │ - Endpoints   │   │ - Sink trait  │
//! │ - Theming     │   │ - Responses   │   │ - Appwrite    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - HTTP descriptions, sandbox paths                 │
//! │  - Movie, Status, errors                            │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to a rotating OTLP file    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The library never calls the host. The event handler returns [`Action`]s
//! and the plugin shim turns them into `set_timeout`, `web_request`, and
//! `hide_self` calls.
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/reelfinder.wasm" {
//!         api_key "eyJhbGciOi..."
//!         debounce_ms "500"
//!         appwrite_endpoint "https://cloud.appwrite.io/v1"
//!         appwrite_project_id "..."
//!         appwrite_database_id "..."
//!         appwrite_collection_id "..."
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use reelfinder::{handle_event, initialize, Action, Config, Event};
//!
//! let mut map = BTreeMap::new();
//! map.insert("api_key".to_string(), "token".to_string());
//! let mut state = initialize(&Config::from_map(&map, None));
//!
//! let (_, actions) = handle_event(&mut state, &Event::Start)?;
//! assert!(matches!(actions[0], Action::SendRequest { .. }));
//! # Ok::<(), reelfinder::ReelfinderError>(())
//! ```
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Terminal**: Any ANSI-capable terminal emulator

pub mod analytics;
pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event};
pub use domain::{Movie, ReelfinderError, Result, Status};
pub use ui::Theme;

use analytics::{AppwriteSettings, AppwriteSink};
use app::DEFAULT_QUIET_PERIOD;
use catalog::{CatalogClient, DEFAULT_BASE_URL};
use std::collections::BTreeMap;
use std::time::Duration;

/// Environment variable consulted when `api_key` is not configured.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Plugin configuration parsed from Zellij's configuration system.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/reelfinder.wasm" {
///     api_key "eyJhbGciOi..."
///     api_base_url "https://api.themoviedb.org/3"
///     debounce_ms "300"
///     theme_file "~/.config/reelfinder/dusk.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// TMDB read access token, sent as a bearer token.
    pub api_key: Option<String>,

    /// Catalog API root. Default: `https://api.themoviedb.org/3`
    pub api_base_url: String,

    /// Quiet period before typed text settles. Default: 500 ms
    pub debounce: Duration,

    /// Appwrite connection, present only when all four ids are configured.
    pub appwrite: Option<AppwriteSettings>,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over `theme_name`.
    pub theme_file: Option<String>,

    /// Tracing level for OpenTelemetry spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            debounce: DEFAULT_QUIET_PERIOD,
            appwrite: None,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Reads [`API_KEY_ENV`] from the environment as the `api_key` fallback.
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        Self::from_map(config, std::env::var(API_KEY_ENV).ok())
    }

    /// Parses configuration with an explicit `api_key` fallback.
    ///
    /// # Parsing Rules
    ///
    /// - Blank values count as unset
    /// - `debounce_ms`: String → `u64` (falls back to 500 on parse error)
    /// - `appwrite_*`: all of endpoint, project, database, and collection must
    ///   be set for analytics to be enabled; `appwrite_api_key` is optional
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use std::time::Duration;
    /// use reelfinder::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("debounce_ms".to_string(), "250".to_string());
    ///
    /// let config = Config::from_map(&map, Some("from-env".to_string()));
    /// assert_eq!(config.api_key.as_deref(), Some("from-env"));
    /// assert_eq!(config.debounce, Duration::from_millis(250));
    /// assert!(config.appwrite.is_none());
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>, env_api_key: Option<String>) -> Self {
        let get = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let debounce = match get("debounce_ms").map(|ms| ms.parse::<u64>()) {
            Some(Ok(ms)) => Duration::from_millis(ms),
            Some(Err(e)) => {
                tracing::warn!(error = %e, "invalid debounce_ms, using default");
                DEFAULT_QUIET_PERIOD
            }
            None => DEFAULT_QUIET_PERIOD,
        };

        let appwrite = match (
            get("appwrite_endpoint"),
            get("appwrite_project_id"),
            get("appwrite_database_id"),
            get("appwrite_collection_id"),
        ) {
            (Some(endpoint), Some(project_id), Some(database_id), Some(collection_id)) => {
                Some(AppwriteSettings {
                    endpoint,
                    project_id,
                    database_id,
                    collection_id,
                    api_key: get("appwrite_api_key"),
                })
            }
            (None, None, None, None) => None,
            _ => {
                tracing::warn!("incomplete appwrite configuration, analytics disabled");
                None
            }
        };

        Self {
            api_key: get("api_key").or_else(|| env_api_key.filter(|k| !k.trim().is_empty())),
            api_base_url: get("api_base_url").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            debounce,
            appwrite,
            theme_name: get("theme"),
            theme_file: get("theme_file"),
            trace_level: get("trace_level"),
        }
    }

    /// Returns the catalog API key.
    ///
    /// # Errors
    ///
    /// Returns [`ReelfinderError::Config`] if neither `api_key` nor
    /// [`API_KEY_ENV`] is set.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            ReelfinderError::Config(format!(
                "no TMDB API key; set `api_key` in the plugin config or {API_KEY_ENV}"
            ))
        })
    }
}

/// Initializes application state from configuration.
///
/// Creates an `AppState` with:
/// - Loaded theme (from file, name, or default)
/// - A catalog client, or the configuration error to show in its place
/// - An Appwrite sink when analytics is configured and valid
///
/// Nothing is fetched here; the first fetch waits for web access.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing reelfinder plugin");

    let mut state = AppState::new(load_theme(config)).with_quiet_period(config.debounce);

    state = match config.require_api_key() {
        Ok(key) => state.with_catalog(CatalogClient::new(config.api_base_url.clone(), key)),
        Err(e) => {
            tracing::error!(error = %e, "movie catalog unavailable");
            state.with_config_error(e.user_message())
        }
    };

    if let Some(settings) = &config.appwrite {
        match AppwriteSink::new(settings.clone()) {
            Ok(sink) => {
                tracing::debug!(endpoint = %settings.endpoint, "search analytics enabled");
                state = state.with_analytics(Box::new(sink));
            }
            Err(e) => tracing::warn!(error = %e, "search analytics disabled"),
        }
    }

    state
}

fn load_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        let path = infrastructure::expand_tilde(theme_file);
        return Theme::from_file(&path).unwrap_or_else(|e| {
            tracing::debug!(theme_file = %path, error = %e, "failed to load theme from file, using default");
            Theme::default()
        });
    }

    config
        .theme_name
        .as_deref()
        .map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_to_empty_config() {
        let config = Config::from_map(&BTreeMap::new(), None);
        assert!(config.api_key.is_none());
        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.debounce, Duration::from_millis(500));
        assert!(config.appwrite.is_none());
    }

    #[test]
    fn configured_key_wins_over_environment() {
        let config = Config::from_map(&map(&[("api_key", "kdl")]), Some("env".into()));
        assert_eq!(config.require_api_key().unwrap(), "kdl");

        let config = Config::from_map(&map(&[("api_key", "  ")]), Some("env".into()));
        assert_eq!(config.require_api_key().unwrap(), "env");
    }

    #[test]
    fn missing_key_is_a_config_error() {
        let config = Config::from_map(&BTreeMap::new(), Some(String::new()));
        assert!(matches!(config.require_api_key(), Err(ReelfinderError::Config(_))));
    }

    #[test]
    fn malformed_debounce_falls_back() {
        let config = Config::from_map(&map(&[("debounce_ms", "soon")]), None);
        assert_eq!(config.debounce, DEFAULT_QUIET_PERIOD);
    }

    #[test]
    fn analytics_needs_all_four_ids() {
        let partial = Config::from_map(
            &map(&[
                ("appwrite_endpoint", "https://cloud.appwrite.io/v1"),
                ("appwrite_project_id", "p"),
            ]),
            None,
        );
        assert!(partial.appwrite.is_none());

        let full = Config::from_map(
            &map(&[
                ("appwrite_endpoint", "https://cloud.appwrite.io/v1"),
                ("appwrite_project_id", "p"),
                ("appwrite_database_id", "d"),
                ("appwrite_collection_id", "c"),
            ]),
            None,
        );
        let settings = full.appwrite.unwrap();
        assert_eq!(settings.collection_id, "c");
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn initialize_without_key_shows_error_on_start() {
        let mut state = initialize(&Config::default());
        let (_, actions) = handle_event(&mut state, &Event::Start).unwrap();

        assert!(actions.is_empty());
        let message = state.status.error_message().unwrap();
        assert!(message.contains(API_KEY_ENV));
    }

    #[test]
    fn initialize_with_key_fetches_from_configured_base() {
        let config = Config::from_map(
            &map(&[("api_key", "k"), ("api_base_url", "https://tmdb.example.test/3")]),
            None,
        );
        let mut state = initialize(&config);
        let (_, actions) = handle_event(&mut state, &Event::Start).unwrap();

        match actions.as_slice() {
            [Action::SendRequest { request, .. }] => {
                assert!(request.url.starts_with("https://tmdb.example.test/3/discover/movie"));
            }
            other => panic!("unexpected actions {other:?}"),
        }
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config {
            theme_name: Some("neon".to_string()),
            ..Config::default()
        };
        assert_eq!(load_theme(&config).name, "catppuccin-mocha");
    }
}
