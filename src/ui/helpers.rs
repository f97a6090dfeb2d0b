//! Shared rendering utilities and helpers.
//!
//! Components draw into a [`Frame`], an ANSI output buffer with cursor
//! positioning, and the renderer prints the finished frame in one write.
//!
//! # Features
//!
//! - **Cursor Positioning**: 1-indexed `row;col` moves
//! - **Match Highlighting**: Renders text with highlighted character ranges
//! - **Display Width**: Padding counts characters, not bytes
//!
//! # Example
//!
//! ```rust
//! use reelfinder::ui::helpers::Frame;
//!
//! let mut frame = Frame::new();
//! frame.move_to(5, 1).push("Content at row 5");
//! assert!(frame.as_str().ends_with("Content at row 5"));
//! ```

use crate::ui::theme::Theme;

/// ANSI output buffer for one render pass.
#[derive(Debug, Default, Clone)]
pub struct Frame {
    buf: String,
}

impl Frame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the cursor to a specific row and column.
    ///
    /// Uses ANSI escape sequence `\u{1b}[{row};{col}H`. Coordinates are
    /// 1-indexed.
    pub fn move_to(&mut self, row: usize, col: usize) -> &mut Self {
        self.buf.push_str(&format!("\u{1b}[{row};{col}H"));
        self
    }

    pub fn push(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(text);
        self
    }

    /// Appends `count` spaces.
    pub fn pad(&mut self, count: usize) -> &mut Self {
        self.buf.extend(std::iter::repeat(' ').take(count));
        self
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Number of characters `text` occupies on screen.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Writes `text` centered within `cols`, padding both sides.
pub fn push_centered(frame: &mut Frame, text: &str, cols: usize) {
    let width = display_width(text).min(cols);
    let padding = cols.saturating_sub(width) / 2;
    let shown: String = text.chars().take(width).collect();
    frame
        .pad(padding)
        .push(&shown)
        .pad(cols.saturating_sub(padding + width));
}

/// Renders text with highlighted character ranges for query matches.
///
/// Highlighted sections use match highlight colors unless the card is
/// selected, in which case the selection colors take precedence. After each
/// highlight, `restore` is re-applied so surrounding text keeps its color.
///
/// # Parameters
///
/// * `frame` - Output buffer
/// * `text` - The text to render
/// * `ranges` - Character index ranges `(start, end)`, end exclusive
/// * `theme` - Active color theme
/// * `restore` - Escape sequence for the surrounding text style
pub fn push_highlighted(
    frame: &mut Frame,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    restore: &str,
) {
    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        let normal_section: String = chars[current_pos..start].iter().collect();
        frame.push(&normal_section);

        let highlighted_section: String = chars[start..end].iter().collect();
        frame
            .push(&Theme::fg(&theme.colors.match_highlight_fg))
            .push(&Theme::bg(&theme.colors.match_highlight_bg))
            .push(&highlighted_section)
            .push(Theme::reset())
            .push(restore);

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        frame.push(&remaining);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_ansi(text: &str) -> String {
        let mut out = String::new();
        let mut in_escape = false;
        for c in text.chars() {
            match (in_escape, c) {
                (false, '\u{1b}') => in_escape = true,
                (true, c) if c.is_ascii_alphabetic() => in_escape = false,
                (true, _) => {}
                (false, c) => out.push(c),
            }
        }
        out
    }

    #[test]
    fn highlighting_preserves_text() {
        let theme = Theme::default();
        let mut frame = Frame::new();
        push_highlighted(&mut frame, "The Dark Knight", &[(4, 8), (9, 10)], &theme, "");
        assert_eq!(strip_ansi(frame.as_str()), "The Dark Knight");
        assert!(frame.as_str().contains(&Theme::bg(&theme.colors.match_highlight_bg)));
    }

    #[test]
    fn out_of_range_highlights_are_skipped() {
        let theme = Theme::default();
        let mut frame = Frame::new();
        push_highlighted(&mut frame, "Up", &[(1, 9), (5, 7)], &theme, "");
        assert_eq!(strip_ansi(frame.as_str()), "Up");
    }

    #[test]
    fn centering_counts_characters() {
        let mut frame = Frame::new();
        push_centered(&mut frame, "Amélie", 10);
        assert_eq!(frame.as_str(), "  Amélie  ");
    }

    #[test]
    fn cursor_moves_are_one_indexed() {
        let mut frame = Frame::new();
        frame.move_to(3, 1);
        assert_eq!(frame.as_str(), "\u{1b}[3;1H");
    }
}
