//! Empty state component renderer.
//!
//! Renders the message shown when a fetch succeeded with no results.

use crate::ui::helpers::{push_centered, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the empty state message starting at `row`.
///
/// # Layout
///
/// ```text
/// [left padding] MESSAGE [right padding]
/// [left padding] subtitle [right padding]
/// ```
///
/// The message uses the `empty_state_fg` theme color, and the subtitle uses
/// `text_dim` with dim styling.
///
/// # Returns
///
/// The next available row position (row + 2)
pub fn render_empty_state(
    frame: &mut Frame,
    row: usize,
    empty: &EmptyState,
    theme: &Theme,
    cols: usize,
) -> usize {
    frame
        .move_to(row, 1)
        .push(&Theme::fg(&theme.colors.empty_state_fg));
    push_centered(frame, &empty.message, cols);
    frame.push(Theme::reset());

    frame
        .move_to(row + 1, 1)
        .push(Theme::dim())
        .push(&Theme::fg(&theme.colors.text_dim));
    push_centered(frame, &empty.subtitle, cols);
    frame.push(Theme::reset());

    row + 2
}
