//! Trending strip renderer.
//!
//! One row listing the most-searched terms by rank. Entries that do not fit
//! the pane width are dropped rather than cut mid-term.

use crate::ui::helpers::{display_width, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::TrendingInfo;

const LABEL: &str = " Trending ";

/// Renders the trending strip at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_trending(
    frame: &mut Frame,
    row: usize,
    trending: &TrendingInfo,
    theme: &Theme,
    cols: usize,
) -> usize {
    frame
        .move_to(row, 1)
        .push(Theme::bold())
        .push(&Theme::fg(&theme.colors.header_fg))
        .push(LABEL)
        .push(Theme::reset());

    let mut used = display_width(LABEL);
    for entry in &trending.entries {
        let rank = format!(" {} ", entry.rank);
        let term = format!("{}  ", entry.term);
        let width = display_width(&rank) + display_width(&term);
        if used + width > cols {
            break;
        }
        frame
            .push(&Theme::fg(&theme.colors.rating_fg))
            .push(&rank)
            .push(&Theme::fg(&theme.colors.text_normal))
            .push(&term);
        used += width;
    }

    frame.pad(cols.saturating_sub(used)).push(Theme::reset());
    row + 1
}
