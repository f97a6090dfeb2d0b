//! Application state and view model computation.
//!
//! [`AppState`] is the single owner of everything the pane shows: the draft
//! and settled queries, the results-area [`Status`], the trending strip, and
//! the card selection. It also owns the collaborators the handler needs to
//! build requests. View models are computed from it on every render.
//!
//! # Example
//!
//! ```rust
//! use reelfinder::app::AppState;
//! use reelfinder::catalog::CatalogClient;
//! use reelfinder::ui::Theme;
//!
//! let state = AppState::new(Theme::default())
//!     .with_catalog(CatalogClient::new("https://api.themoviedb.org/3", "key"));
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert_eq!(viewmodel.search_bar.query, "");
//! ```

use super::debounce::Debouncer;
use super::fetch::FetchTracker;
use crate::analytics::{AnalyticsSink, RecordJob};
use crate::catalog::CatalogClient;
use crate::domain::{Movie, Status, TrendingSearch};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BodyView, CardItem, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo, SectionInfo,
    SpinnerInfo, TrendingEntry, TrendingInfo, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::collections::BTreeMap;
use std::time::Duration;

/// Rows each result card occupies.
pub const CARD_HEIGHT: usize = 2;

/// Static hero line shown in the header.
const HERO_TITLE: &str = " Find Movies You'll Enjoy Without the Hassle ";

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Raw search text, updated on every keystroke.
    pub draft_query: String,

    /// Debounced search text that drives catalog fetches.
    pub settled_query: String,

    /// What the results area shows.
    pub status: Status,

    /// Most-searched terms, empty until loaded or when analytics is off.
    pub trending: Vec<TrendingSearch>,

    /// Zero-based index of the selected card within the current results.
    pub selected_index: usize,

    /// Color scheme for rendering.
    pub theme: Theme,

    pub(crate) debouncer: Debouncer,
    pub(crate) fetches: FetchTracker,
    pub(crate) record_jobs: BTreeMap<u64, RecordJob>,
    pub(crate) catalog: Option<CatalogClient>,
    pub(crate) analytics: Option<Box<dyn AnalyticsSink>>,

    /// Why the catalog is unavailable, when it is.
    pub(crate) config_error: Option<String>,

    /// Set once the host has granted web access and the first fetch went out.
    pub(crate) started: bool,
}

impl AppState {
    /// Creates an empty state with no collaborators attached.
    ///
    /// The results area starts out loading: the first fetch is issued as soon
    /// as the host grants web access.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            draft_query: String::new(),
            settled_query: String::new(),
            status: Status::Loading,
            trending: Vec::new(),
            selected_index: 0,
            theme,
            debouncer: Debouncer::default(),
            fetches: FetchTracker::default(),
            record_jobs: BTreeMap::new(),
            catalog: None,
            analytics: None,
            config_error: None,
            started: false,
        }
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: CatalogClient) -> Self {
        self.catalog = Some(catalog);
        self
    }

    #[must_use]
    pub fn with_analytics(mut self, sink: Box<dyn AnalyticsSink>) -> Self {
        self.analytics = Some(sink);
        self
    }

    #[must_use]
    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.debouncer = Debouncer::new(quiet_period);
        self
    }

    /// Records why no catalog is attached; shown once fetching would start.
    #[must_use]
    pub fn with_config_error(mut self, message: String) -> Self {
        self.config_error = Some(message);
        self
    }

    /// `true` while a catalog fetch (or its analytics step) is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    #[must_use]
    pub fn movies(&self) -> &[Movie] {
        self.status.movies()
    }

    /// Moves the card selection down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let count = self.movies().len();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
    }

    /// Moves the card selection up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let count = self.movies().len();
        if count == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 {
            count - 1
        } else {
            self.selected_index - 1
        };
    }

    #[must_use]
    pub fn selected_movie(&self) -> Option<&Movie> {
        self.movies().get(self.selected_index)
    }

    /// Computes a renderable view model for a pane of `rows` x `cols`.
    ///
    /// Cards are windowed around the selection the same way a list scrolls:
    /// the selected card sits mid-window unless the list edge is reached.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let trending = self.compute_trending();
        let body = match &self.status {
            Status::Loading => BodyView::Loading(SpinnerInfo {
                label: "Loading...".to_string(),
            }),
            Status::Error(message) => BodyView::Error(message.clone()),
            Status::Ready(movies) if movies.is_empty() => BodyView::Empty(EmptyState {
                message: "No movies found".to_string(),
                subtitle: "Try a different title".to_string(),
            }),
            Status::Ready(movies) => {
                let capacity = self.card_capacity(rows, trending.is_some());
                self.compute_cards(movies, capacity, cols)
            }
        };

        UIViewModel {
            header: HeaderInfo {
                title: HERO_TITLE.to_string(),
            },
            search_bar: SearchBarInfo {
                query: self.draft_query.clone(),
                placeholder: "Search through thousands of movies".to_string(),
                is_settling: self.debouncer.is_pending(),
            },
            trending,
            section: self.compute_section(),
            body,
            footer: FooterInfo {
                keybindings: "Type to search  Ctrl+u: clear  ↑/↓ or Ctrl+n/p: navigate  Esc: close"
                    .to_string(),
            },
        }
    }

    fn compute_cards(&self, movies: &[Movie], capacity: usize, cols: usize) -> BodyView {
        let capacity = capacity.max(1);
        let mut visible_start = self.selected_index.saturating_sub(capacity / 2);
        let visible_end = (visible_start + capacity).min(movies.len());
        if visible_end - visible_start < capacity && movies.len() >= capacity {
            visible_start = visible_end.saturating_sub(capacity);
        }

        let matcher = if self.settled_query.is_empty() {
            None
        } else {
            Some(SkimMatcherV2::default())
        };

        let cards = movies[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, movie)| {
                self.compute_card(movie, visible_start + offset, cols, matcher.as_ref())
            })
            .collect();

        BodyView::Cards {
            cards,
            selected_index: self.selected_index.saturating_sub(visible_start),
        }
    }

    fn compute_card(
        &self,
        movie: &Movie,
        absolute_idx: usize,
        cols: usize,
        matcher: Option<&SkimMatcherV2>,
    ) -> CardItem {
        let max_title = cols.saturating_sub(6).max(8);
        let title = truncate_chars(&movie.title, max_title);
        let highlight_ranges = matcher.map_or_else(Vec::new, |m| {
            compute_highlight_ranges(&title, &self.settled_query, m)
        });

        CardItem {
            title,
            rating: movie.rating_label(),
            language: movie.language_label(),
            year: movie.release_year(),
            is_selected: absolute_idx == self.selected_index,
            highlight_ranges,
        }
    }

    fn compute_trending(&self) -> Option<TrendingInfo> {
        if self.trending.is_empty() {
            return None;
        }
        let entries = self
            .trending
            .iter()
            .enumerate()
            .map(|(i, t)| TrendingEntry {
                rank: i + 1,
                term: t.search_term.clone(),
                count: t.count,
            })
            .collect();
        Some(TrendingInfo { entries })
    }

    fn compute_section(&self) -> SectionInfo {
        let title = match (&self.status, self.settled_query.is_empty()) {
            (Status::Ready(movies), true) => format!(" All Movies ({}) ", movies.len()),
            (Status::Ready(movies), false) => {
                format!(" Results for \"{}\" ({}) ", self.settled_query, movies.len())
            }
            (_, true) => " All Movies ".to_string(),
            (_, false) => format!(" Results for \"{}\" ", self.settled_query),
        };
        SectionInfo { title }
    }

    /// Number of cards that fit after the fixed chrome.
    ///
    /// Chrome is the blank top row, header, border, three-row search box,
    /// section title, bottom border, and footer, plus one row for the
    /// trending strip when shown.
    const fn card_capacity(&self, rows: usize, with_trending: bool) -> usize {
        let chrome = if with_trending { 10 } else { 9 };
        rows.saturating_sub(chrome) / CARD_HEIGHT
    }
}

/// Truncates to `max` characters, marking the cut with `...`.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Coalesces fuzzy-match character indices into `(start, end)` ranges.
fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}
