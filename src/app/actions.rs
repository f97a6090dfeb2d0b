//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to the host. It returns a `Vec<Action>`
//! after each event and the plugin shim executes them in order, translating
//! each into a Zellij call.
//!
//! # Example
//!
//! ```rust
//! use reelfinder::app::Action;
//! use std::time::Duration;
//!
//! let actions = vec![Action::ScheduleTimer(Duration::from_millis(500))];
//! ```

use crate::infrastructure::{HttpRequest, RequestTag};
use std::time::Duration;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Schedules one host timer; its elapse comes back as
    /// [`Event::DebounceElapsed`](crate::app::Event::DebounceElapsed).
    ScheduleTimer(Duration),

    /// Issues a web request. The tag is stored in the request context so the
    /// response can be routed back to its operation.
    SendRequest {
        /// Operation the response belongs to.
        tag: RequestTag,
        /// The request to send.
        request: HttpRequest,
    },
}
