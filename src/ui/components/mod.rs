//! Composable UI component renderers.
//!
//! Each component draws one part of the pane into a [`Frame`] and returns the
//! next free row.
//!
//! # Components
//!
//! - [`header`]: Hero line
//! - [`search`]: Search input box with placeholder
//! - [`trending`]: Most-searched terms strip
//! - [`card`]: Two-row movie cards
//! - [`status`]: Loading indicator and error message
//! - [`empty`]: Message for zero results
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines]
//! [Trending - when present]
//! [Section title]
//! [Body: loading | error | cards | empty]
//! [Border]
//! [Footer]
//! ```

mod card;
mod empty;
mod footer;
mod header;
mod search;
mod status;
mod trending;

use crate::ui::helpers::{display_width, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BodyView, SectionInfo, UIViewModel};

use card::render_cards;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use search::render_search_bar;
use status::{render_error, render_loading};
use trending::render_trending;

/// Renders a horizontal border line at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(frame: &mut Frame, row: usize, color: &str, cols: usize) -> usize {
    frame
        .move_to(row, 1)
        .push(&Theme::fg(color))
        .push(&"─".repeat(cols))
        .push(Theme::reset());
    row + 1
}

fn render_section(frame: &mut Frame, row: usize, section: &SectionInfo, theme: &Theme, cols: usize) -> usize {
    let title: String = section.title.chars().take(cols).collect();
    frame
        .move_to(row, 1)
        .push(Theme::bold())
        .push(&Theme::fg(&theme.colors.header_fg))
        .push(&title)
        .pad(cols.saturating_sub(display_width(&title)))
        .push(Theme::reset());
    row + 1
}

/// Renders the full pane layout.
///
/// # Parameters
///
/// * `frame` - Output buffer
/// * `vm` - View model to draw
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
/// * `rows` - Terminal height in rows
///
/// # Line Accounting
///
/// The footer sits on the last row with a border above it. The body gets
/// every row between the section title and that border.
pub fn render_layout(frame: &mut Frame, vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(frame, current_row, &vm.header, theme, cols);
    current_row = render_border(frame, current_row, &theme.colors.border, cols);
    current_row = render_search_bar(frame, current_row, &vm.search_bar, theme, cols);
    if let Some(trending) = &vm.trending {
        current_row = render_trending(frame, current_row, trending, theme, cols);
    }
    current_row = render_section(frame, current_row, &vm.section, theme, cols);

    let footer_row = rows.max(current_row + 2);
    let border_row = footer_row - 1;
    let body_rows = border_row.saturating_sub(current_row);
    let body_middle = current_row + body_rows.saturating_sub(1) / 2;

    match &vm.body {
        BodyView::Loading(spinner) => {
            render_loading(frame, body_middle, spinner, theme, cols);
        }
        BodyView::Error(message) => {
            render_error(frame, current_row + 1, message, theme, cols, body_rows.saturating_sub(1));
        }
        BodyView::Cards { cards, .. } => {
            render_cards(frame, current_row, cards, theme, cols);
        }
        BodyView::Empty(empty) => {
            render_empty_state(frame, current_row + 1, empty, theme, cols);
        }
    }

    render_border(frame, border_row, &theme.colors.border, cols);
    render_footer(frame, footer_row, &vm.footer, theme, cols);
}
