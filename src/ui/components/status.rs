//! Loading and error renderers for the results area.

use crate::ui::helpers::{push_centered, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SpinnerInfo;

/// Renders the loading indicator centered on `row`.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_loading(
    frame: &mut Frame,
    row: usize,
    spinner: &SpinnerInfo,
    theme: &Theme,
    cols: usize,
) -> usize {
    frame
        .move_to(row, 1)
        .push(&Theme::fg(&theme.colors.spinner_fg));
    push_centered(frame, &format!("⠿ {}", spinner.label), cols);
    frame.push(Theme::reset());
    row + 1
}

/// Renders an error message in the error color, wrapped over as many rows
/// as `max_rows` allows.
///
/// # Returns
///
/// The next available row position
pub fn render_error(
    frame: &mut Frame,
    row: usize,
    message: &str,
    theme: &Theme,
    cols: usize,
    max_rows: usize,
) -> usize {
    let width = cols.saturating_sub(4).max(1);
    let mut current_row = row;

    for line in wrap(message, width).into_iter().take(max_rows.max(1)) {
        frame
            .move_to(current_row, 1)
            .push(&Theme::fg(&theme.colors.error_fg));
        push_centered(frame, &line, cols);
        frame.push(Theme::reset());
        current_row += 1;
    }

    current_row
}

/// Greedy word wrap on character counts. Words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..width).collect());
        }
        let word: String = word.into_iter().collect();

        let needed = current.chars().count() + usize::from(!current.is_empty()) + word.chars().count();
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(
            wrap("Error fetching movies. Please try again later.", 16),
            vec!["Error fetching", "movies. Please", "try again later."]
        );
    }

    #[test]
    fn splits_overlong_words() {
        assert_eq!(wrap("abcdefgh ij", 3), vec!["abc", "def", "gh", "ij"]);
    }

    #[test]
    fn error_rows_are_capped() {
        let theme = Theme::default();
        let mut frame = Frame::new();
        let next = render_error(&mut frame, 10, "one two three four", &theme, 8, 2);
        assert_eq!(next, 12);
    }
}
