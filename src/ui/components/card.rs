//! Movie card renderer.
//!
//! Each card is two rows: the title with query matches highlighted, then a
//! dimmed meta line of rating, language, and release year. The selected card
//! is drawn on the selection background across the full width.

use crate::ui::helpers::{display_width, push_highlighted, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CardItem;

/// Left indent of the title row.
const TITLE_INDENT: usize = 2;

/// Left indent of the meta row.
const META_INDENT: usize = 4;

/// Renders all cards starting at the specified row.
///
/// # Returns
///
/// The next available row position
pub fn render_cards(
    frame: &mut Frame,
    row: usize,
    cards: &[CardItem],
    theme: &Theme,
    cols: usize,
) -> usize {
    cards
        .iter()
        .fold(row, |current_row, card| render_card(frame, current_row, card, theme, cols))
}

/// Renders a single card.
///
/// # Styling Precedence
///
/// 1. Selection colors (if `is_selected`)
/// 2. Query match highlights
/// 3. Normal text color
fn render_card(frame: &mut Frame, row: usize, card: &CardItem, theme: &Theme, cols: usize) -> usize {
    let base = if card.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };

    frame.move_to(row, 1).push(&base).pad(TITLE_INDENT);
    if card.is_selected {
        frame.push(Theme::bold());
    }
    push_highlighted(frame, &card.title, &card.highlight_ranges, theme, &base);
    let title_len = TITLE_INDENT + display_width(&card.title);
    frame.pad(cols.saturating_sub(title_len)).push(Theme::reset());

    let rating = format!("★ {}", card.rating);
    let rest = format!(" • {} • {}", card.language, card.year);
    let star_color = if card.is_selected {
        theme.colors.selection_fg.as_str()
    } else {
        theme.colors.rating_fg.as_str()
    };

    frame
        .move_to(row + 1, 1)
        .push(&base)
        .pad(META_INDENT)
        .push(&Theme::fg(star_color))
        .push(&rating)
        .push(&base);
    if !card.is_selected {
        frame.push(&Theme::fg(&theme.colors.text_dim));
    }
    frame.push(&rest);
    let meta_len = META_INDENT + display_width(&rating) + display_width(&rest);
    frame.pad(cols.saturating_sub(meta_len)).push(Theme::reset());

    row + 2
}
