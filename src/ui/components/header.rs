//! Header component renderer.
//!
//! Renders the hero line with centered text, theme-aware colors, and optional
//! background styling.

use crate::ui::helpers::{push_centered, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header at the specified row.
///
/// # Parameters
///
/// * `frame` - Output buffer
/// * `row` - Row position to render the header (1-indexed)
/// * `header` - Header information (title text)
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_header(
    frame: &mut Frame,
    row: usize,
    header: &HeaderInfo,
    theme: &Theme,
    cols: usize,
) -> usize {
    frame
        .move_to(row, 1)
        .push(Theme::bold())
        .push(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        frame.push(&Theme::bg(bg));
    }

    push_centered(frame, &header.title, cols);
    frame.push(Theme::reset());
    row + 1
}
