//! Color themes and 24-bit ANSI escapes.
//!
//! Four Catppuccin flavors ship embedded (`catppuccin-mocha` is the default,
//! `latte` is the light one, `frappe` and `macchiato` sit in between). Any
//! other palette can be supplied as a TOML file.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#cba6f7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#cba6f7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! rating_fg = "#f9e2af"
//! error_fg = "#f38ba8"
//! spinner_fg = "#cba6f7"
//! ```
//!
//! # Example
//!
//! ```rust
//! use reelfinder::ui::theme::Theme;
//!
//! let theme = Theme::from_name("catppuccin-mocha").unwrap();
//! print!("{}Bold{}", Theme::bold(), Theme::reset());
//! assert_eq!(Theme::fg("#000000"), "\u{1b}[38;2;0;0;0m");
//! ```

use crate::domain::{ReelfinderError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A named palette.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`#rrggbb`) for each UI role. Every role except `header_bg`
/// is required.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected card foreground color.
    pub selection_fg: String,
    /// Selected card background color.
    pub selection_bg: String,

    pub text_normal: String,
    /// Dimmed text color (footer, meta line, placeholder).
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Star and rating value on each card, and trending ranks.
    pub rating_fg: String,

    /// Error message in the results area.
    pub error_fg: String,

    /// Loading indicator.
    pub spinner_fg: String,
}

/// Built-in palettes, embedded at compile time.
const BUILTIN: &[(&str, &str)] = &[
    ("catppuccin-mocha", include_str!("../../themes/catppuccin-mocha.toml")),
    ("catppuccin-latte", include_str!("../../themes/catppuccin-latte.toml")),
    ("catppuccin-frappe", include_str!("../../themes/catppuccin-frappe.toml")),
    ("catppuccin-macchiato", include_str!("../../themes/catppuccin-macchiato.toml")),
];

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rgb(u8, u8, u8);

impl Rgb {
    const WHITE: Self = Self(255, 255, 255);

    /// Parses `#rrggbb` or `rrggbb`.
    fn parse(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some(Self(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Unparseable colors render as white rather than failing the frame.
    fn from_hex(hex: &str) -> Self {
        Self::parse(hex).unwrap_or(Self::WHITE)
    }
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// # Returns
    ///
    /// - `Some(Theme)` if the theme name is recognized
    /// - `None` if the theme name is unknown
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let (_, toml_str) = BUILTIN.iter().find(|(builtin, _)| *builtin == name)?;

        match toml::from_str(toml_str) {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::warn!(theme_name = %name, error = %e, "built-in theme failed to parse");
                None
            }
        }
    }

    /// Names accepted by [`Theme::from_name`].
    pub fn builtin_names() -> impl Iterator<Item = &'static str> {
        BUILTIN.iter().map(|(name, _)| *name)
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ReelfinderError::Theme`] if the file cannot be read or the
    /// TOML is invalid or missing a color.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            ReelfinderError::Theme(format!("failed to read {}: {e}", path.display()))
        })?;

        toml::from_str(&contents).map_err(|e| {
            ReelfinderError::Theme(format!("failed to parse {}: {e}", path.display()))
        })
    }

    /// Generates an ANSI 24-bit foreground color escape sequence.
    ///
    /// # Parameters
    ///
    /// * `hex` - Hex color string (e.g., "#cdd6f4")
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let Rgb(r, g, b) = Rgb::from_hex(hex);
        format!("\u{1b}[38;2;{r};{g};{b}m")
    }

    /// Generates an ANSI 24-bit background color escape sequence.
    ///
    /// # Parameters
    ///
    /// * `hex` - Hex color string (e.g., "#cba6f7")
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let Rgb(r, g, b) = Rgb::from_hex(hex);
        format!("\u{1b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{1b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{1b}[2m"
    }

    /// Clears all styling (colors, bold, dim).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{1b}[0m"
    }
}

impl Default for Theme {
    /// Returns the default theme (Catppuccin Mocha).
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse, which the test suite rules out.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha")
            .expect("Built-in catppuccin-mocha theme should always parse")
    }
}
