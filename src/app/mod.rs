//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the plugin runtime (main.rs) and the catalog and
//! analytics collaborators. It implements the event-driven loop behind the
//! search pane.
//!
//! # Architecture
//!
//! ```text
//! Keys/Timers → Events → Event Handler → State Mutations → Actions → Host calls
//!                            ↑                                  ↓
//!                            └────────── Web Responses ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`debounce`]: Settling of the typed query after a quiet period
//! - [`fetch`]: Fetch ids and staged results for the fetch in flight
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use reelfinder::app::{AppState, Event, handle_event};
//! use reelfinder::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (_render, actions) = handle_event(&mut state, &Event::KeyDown)?;
//! assert!(actions.is_empty());
//! # Ok::<(), reelfinder::domain::ReelfinderError>(())
//! ```

pub mod actions;
pub mod debounce;
pub mod fetch;
pub mod handler;
pub mod state;

pub use actions::Action;
pub use debounce::{Debouncer, DEFAULT_QUIET_PERIOD};
pub use handler::{handle_event, Event};
pub use state::AppState;
