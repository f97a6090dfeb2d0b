//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Draw every component into one [`Frame`]
//!
//! # Example
//!
//! ```rust
//! use reelfinder::app::AppState;
//! use reelfinder::ui::{render_to_string, Theme};
//!
//! let state = AppState::new(Theme::default());
//! let output = render_to_string(&state, 24, 80);
//! assert!(output.contains("Search through thousands of movies"));
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::helpers::Frame;

/// Renders the plugin UI to stdout.
///
/// # Parameters
///
/// * `state` - Current application state
/// * `rows` - Terminal height in rows
/// * `cols` - Terminal width in columns
pub fn render(state: &AppState, rows: usize, cols: usize) {
    print!("{}", render_to_string(state, rows, cols));
}

/// Renders the plugin UI into a string of ANSI output.
#[must_use]
pub fn render_to_string(state: &AppState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols);

    let mut frame = Frame::new();
    components::render_layout(&mut frame, &viewmodel, &state.theme, cols, rows);
    frame.into_string()
}
