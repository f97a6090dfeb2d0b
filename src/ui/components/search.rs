//! Search bar component renderer.
//!
//! Renders the search input box with a bordered frame, the draft query, and
//! a dimmed placeholder while the query is empty.

use crate::ui::helpers::{display_width, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Renders the search input box at the specified row.
///
/// # Parameters
///
/// * `frame` - Output buffer
/// * `row` - Starting row position for the search box (1-indexed)
/// * `search` - Search bar information
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 3, since the box uses 3 lines)
///
/// # Layout
///
/// ```text
/// [margin] ┌──────────────────────┐ [margin]
/// [margin] │ › bat▏              … │ [margin]
/// [margin] └──────────────────────┘ [margin]
/// ```
///
/// A trailing `…` marks a query that has not settled yet. Long queries keep
/// their tail visible.
pub fn render_search_bar(
    frame: &mut Frame,
    row: usize,
    search: &SearchBarInfo,
    theme: &Theme,
    cols: usize,
) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = Theme::fg(&theme.colors.search_bar_border);

    frame
        .move_to(row, 1)
        .pad(SEARCH_BOX_MARGIN)
        .push(&border)
        .push(&format!("┌{}┐", "─".repeat(inner_width)))
        .push(Theme::reset());

    let settling = if search.is_settling { " …" } else { "" };
    let prefix = " › ";
    let room = inner_width
        .saturating_sub(display_width(prefix) + display_width(settling) + 1);

    frame
        .move_to(row + 1, 1)
        .pad(SEARCH_BOX_MARGIN)
        .push(&border)
        .push("│")
        .push(&Theme::fg(&theme.colors.text_normal))
        .push(prefix);

    let used = if search.query.is_empty() {
        let placeholder: String = search.placeholder.chars().take(room).collect();
        frame
            .push(Theme::dim())
            .push(&Theme::fg(&theme.colors.text_dim))
            .push(&placeholder)
            .push(Theme::reset());
        display_width(&placeholder)
    } else {
        let skip = display_width(&search.query).saturating_sub(room);
        let visible: String = search.query.chars().skip(skip).collect();
        frame.push(&visible).push("▏");
        display_width(&visible) + 1
    };

    frame
        .pad(inner_width.saturating_sub(display_width(prefix) + used + display_width(settling)))
        .push(&Theme::fg(&theme.colors.text_dim))
        .push(settling)
        .push(&border)
        .push("│")
        .push(Theme::reset());

    frame
        .move_to(row + 2, 1)
        .pad(SEARCH_BOX_MARGIN)
        .push(&border)
        .push(&format!("└{}┘", "─".repeat(inner_width)))
        .push(Theme::reset());

    row + 3
}
