//! Zellij entry point.
//!
//! Everything host-specific lives here: host events are translated into
//! library events, and the actions the library hands back are carried out
//! through the plugin API. The first fetch waits for the `WebAccess` grant.
//!
//! # Host Events
//!
//! - `PermissionRequestResult(Granted)` → `Event::Start`
//! - `PermissionRequestResult(Denied)` → `Event::PermissionDenied`
//! - `Timer` → `Event::DebounceElapsed`
//! - `WebRequestResult` → `Event::WebResponse`, routed by its context tag
//!
//! # Keybindings
//!
//! - Printable characters: type into the search box
//! - `Backspace`: delete the last character
//! - `Ctrl+u`: clear the search box
//! - `Down` / `Ctrl+n`: next card
//! - `Up` / `Ctrl+p`: previous card
//! - `Esc`: hide the pane

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::prelude::Event as HostEvent;

use reelfinder::infrastructure::{HttpResponse, Method, RequestTag};
use reelfinder::{handle_event, Action, Config, Event};

register_plugin!(State);

/// Plugin state wrapper around the library's `AppState`.
struct State {
    app: reelfinder::app::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: reelfinder::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Reads configuration, installs tracing and asks for `WebAccess`, which
    /// both the catalog and analytics requests need.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        reelfinder::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        tracing::debug!(
            has_api_key = config.api_key.is_some(),
            analytics = config.appwrite.is_some(),
            debounce_ms = config.debounce.as_millis() as u64,
            "parsed configuration"
        );
        self.app = reelfinder::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("loaded, awaiting web access");
    }

    /// Returns whether the pane needs a redraw.
    fn update(&mut self, event: HostEvent) -> bool {
        let _guard =
            tracing::debug_span!("plugin_update_event", event_type = %Self::describe(&event))
                .entered();

        let event = match event {
            HostEvent::Key(ref key) => match Self::map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            HostEvent::Timer(_elapsed) => Event::DebounceElapsed,
            HostEvent::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            HostEvent::PermissionRequestResult(PermissionStatus::Granted) => {
                tracing::debug!("web access granted");
                Event::Start
            }
            HostEvent::PermissionRequestResult(PermissionStatus::Denied) => {
                Event::PermissionDenied
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &event) {
            Ok((dirty, actions)) => {
                tracing::debug!(actions = actions.len(), dirty, "event applied");
                actions.iter().for_each(Self::execute_action);
                dirty
            }
            Err(e) => {
                tracing::error!(error = %e, "event handling failed");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        reelfinder::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Short label for the update span.
    fn describe(event: &HostEvent) -> String {
        match event {
            HostEvent::Key(key) => format!("key:{:?}", key.bare_key),
            HostEvent::Timer(..) => "timer".to_owned(),
            HostEvent::WebRequestResult(status, ..) => format!("web:{status}"),
            HostEvent::PermissionRequestResult(status) => format!("permission:{status:?}"),
            _ => "other".to_owned(),
        }
    }

    /// Translates a keypress; unbound keys yield `None`.
    fn map_key_event(key: &KeyWithModifier) -> Option<Event> {
        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                BareKey::Char('u') => Some(Event::ClearQuery),
                _ => None,
            };
        }

        let plain = key.has_no_modifiers() || key.has_modifiers(&[KeyModifier::Shift]);

        Some(match key.bare_key {
            BareKey::Down => Event::KeyDown,
            BareKey::Up => Event::KeyUp,
            BareKey::Esc => Event::CloseFocus,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) if plain && !c.is_control() => Event::Char(c),
            _ => return None,
        })
    }

    /// Routes a web response back to the operation that issued it.
    fn map_web_result(
        status: u16,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let Some(tag) = RequestTag::from_context(context) else {
            tracing::debug!(status, "ignoring untagged web response");
            return None;
        };

        tracing::debug!(status, tag = ?tag, body_len = body.len(), "web response");
        Some(Event::WebResponse {
            tag,
            response: HttpResponse::new(status, body),
        })
    }

    /// Executes an action returned from event handling.
    ///
    /// - `CloseFocus`: hide the plugin pane
    /// - `ScheduleTimer`: one host timer, reported back as `Timer`
    /// - `SendRequest`: `web_request` with the tag stored in the context
    #[tracing::instrument(level = "debug", skip(action))]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::ScheduleTimer(delay) => {
                set_timeout(delay.as_secs_f64());
            }
            Action::SendRequest { tag, request } => {
                let verb = match request.method {
                    Method::Get => HttpVerb::Get,
                    Method::Post => HttpVerb::Post,
                    Method::Put => HttpVerb::Put,
                };
                tracing::debug!(method = ?request.method, url = %request.url, "sending web request");
                web_request(
                    &request.url,
                    verb,
                    request.headers.clone(),
                    request.body.clone(),
                    tag.to_context(),
                );
            }
        }
    }
}
