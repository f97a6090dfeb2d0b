//! Footer component renderer.

use crate::ui::helpers::{push_centered, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer help bar at the specified row.
///
/// Keybinding hints are centered and dimmed. Text wider than the pane is
/// truncated so the layout never wraps.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_footer(
    frame: &mut Frame,
    row: usize,
    footer: &FooterInfo,
    theme: &Theme,
    cols: usize,
) -> usize {
    frame
        .move_to(row, 1)
        .push(&Theme::fg(&theme.colors.text_dim));
    push_centered(frame, &footer.keybindings, cols);
    frame.push(Theme::reset());
    row + 1
}
