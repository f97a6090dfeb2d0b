//! View model types representing renderable UI state.
//!
//! View models are computed from application state via
//! `AppState::compute_viewmodel()` and consumed by the renderer. They contain
//! no business logic, only display-ready data such as formatted ratings and
//! pre-computed highlight ranges.
//!
//! # Example
//!
//! ```rust
//! use reelfinder::ui::viewmodel::{BodyView, CardItem};
//!
//! let body = BodyView::Cards {
//!     cards: vec![CardItem {
//!         title: "Heat".to_string(),
//!         rating: "7.9".to_string(),
//!         language: "EN".to_string(),
//!         year: "1995".to_string(),
//!         is_selected: true,
//!         highlight_ranges: vec![(0, 4)],
//!     }],
//!     selected_index: 0,
//! };
//! assert!(matches!(body, BodyView::Cards { .. }));
//! ```

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Hero line at the top of the pane.
    pub header: HeaderInfo,

    /// Search input box.
    pub search_bar: SearchBarInfo,

    /// Trending strip, absent when there is nothing to show.
    pub trending: Option<TrendingInfo>,

    /// Title above the results area.
    pub section: SectionInfo,

    /// Results area: exactly one of loading, error, cards, or empty.
    pub body: BodyView,

    /// Footer information (keybindings, help text).
    pub footer: FooterInfo,
}

/// What the results area shows.
#[derive(Debug, Clone)]
pub enum BodyView {
    Loading(SpinnerInfo),
    /// User-facing error text.
    Error(String),
    Cards {
        cards: Vec<CardItem>,
        /// Index of the selected card within `cards`.
        selected_index: usize,
    },
    Empty(EmptyState),
}

/// Display information for one movie card.
///
/// A card is two rows: the title, then a meta line of rating, language, and
/// release year.
#[derive(Debug, Clone)]
pub struct CardItem {
    pub title: String,
    /// Formatted rating, or `N/A`.
    pub rating: String,
    /// Uppercased language code, or `N/A`.
    pub language: String,
    /// Four-digit year, or `N/A`.
    pub year: String,
    pub is_selected: bool,

    /// Character ranges of the title matching the settled query.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Current draft query text.
    pub query: String,

    /// Shown dimmed while the query is empty.
    pub placeholder: String,

    /// `true` while typed text has not settled yet.
    pub is_settling: bool,
}

/// Trending strip display information.
#[derive(Debug, Clone)]
pub struct TrendingInfo {
    pub entries: Vec<TrendingEntry>,
}

/// One ranked trending search term.
#[derive(Debug, Clone)]
pub struct TrendingEntry {
    /// One-based rank.
    pub rank: usize,
    pub term: String,
    pub count: u64,
}

/// Results section title.
#[derive(Debug, Clone)]
pub struct SectionInfo {
    pub title: String,
}

/// Loading indicator.
#[derive(Debug, Clone)]
pub struct SpinnerInfo {
    pub label: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Empty state message display information.
///
/// Shown when a fetch succeeded with zero results.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message (e.g., "No movies found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}
