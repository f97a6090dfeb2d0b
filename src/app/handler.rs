//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes keystrokes,
//! timer elapses, and web responses, translating them into state changes and
//! action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur on `AppState`
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Lifecycle**: `Start`, `PermissionDenied`
//! - **Input**: `Char`, `Backspace`, `ClearQuery`
//! - **Navigation**: `KeyDown`, `KeyUp`, `CloseFocus`
//! - **Timer**: `DebounceElapsed`
//! - **Network**: `WebResponse`, routed by its [`RequestTag`]
//!
//! # Example
//!
//! ```rust
//! use reelfinder::app::{handle_event, Action, AppState, Event};
//! use reelfinder::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::Char('b'))?;
//! assert!(render);
//! assert!(matches!(actions[0], Action::ScheduleTimer(_)));
//! # Ok::<(), reelfinder::domain::ReelfinderError>(())
//! ```

use crate::analytics::{RecordJob, RecordStage};
use crate::app::{Action, AppState};
use crate::catalog;
use crate::domain::error::Result;
use crate::domain::status::{transition, FetchOutcome};
use crate::domain::{Movie, ReelfinderError};
use crate::infrastructure::{HttpResponse, RequestTag};

/// Message shown when the host refuses web access.
pub const PERMISSION_DENIED_MESSAGE: &str =
    "Web access was not granted. Reopen the plugin and allow it to search movies.";

/// Events triggered by user input, host timers, or web responses.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The handler processes these sequentially.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Web access was granted; issue the initial fetch and trending query.
    Start,
    /// Web access was refused.
    PermissionDenied,
    /// Appends a character to the draft query.
    Char(char),
    /// Removes the last character of the draft query.
    Backspace,
    /// Empties the draft query.
    ClearQuery,
    /// Moves card selection down by one (wraps to top).
    KeyDown,
    /// Moves card selection up by one (wraps to bottom).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,
    /// One scheduled debounce timer elapsed.
    DebounceElapsed,
    /// A web response, with the tag of the request it answers.
    WebResponse {
        tag: RequestTag,
        response: HttpResponse,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Parameters
///
/// * `state` - Mutable reference to application state
/// * `event` - Event to process
///
/// # Returns
///
/// Whether the pane needs a re-render, and the actions to execute in order.
///
/// # Errors
///
/// Reserved for failures that should abort event processing. Fetch and
/// analytics failures are folded into state and never surface here.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event_kind(event)).entered();

    match event {
        Event::Start => {
            if state.started {
                tracing::debug!("already started");
                return Ok((false, vec![]));
            }
            state.started = true;

            let mut actions = Vec::new();
            if let Some(sink) = state.analytics.as_deref() {
                actions.push(Action::SendRequest {
                    tag: RequestTag::Trending,
                    request: sink.trending(),
                });
            }
            let query = state.settled_query.clone();
            actions.extend(begin_fetch(state, &query));
            Ok((true, actions))
        }
        Event::PermissionDenied => {
            tracing::warn!("web access permission denied");
            state.status = transition(
                &state.status,
                FetchOutcome::Failed(PERMISSION_DENIED_MESSAGE.to_string()),
            );
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            state.draft_query.push(*c);
            tracing::trace!(query = %state.draft_query, char = %c, "draft query updated");
            Ok((true, vec![schedule_settle(state)]))
        }
        Event::Backspace => {
            if state.draft_query.pop().is_none() {
                return Ok((false, vec![]));
            }
            Ok((true, vec![schedule_settle(state)]))
        }
        Event::ClearQuery => {
            if state.draft_query.is_empty() {
                return Ok((false, vec![]));
            }
            state.draft_query.clear();
            Ok((true, vec![schedule_settle(state)]))
        }
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::DebounceElapsed => {
            let Some(settled) = state.debouncer.on_timer_elapsed() else {
                return Ok((false, vec![]));
            };

            if settled == state.settled_query {
                tracing::debug!(query = %settled, "settled query unchanged, skipping fetch");
                return Ok((true, vec![]));
            }

            tracing::debug!(query = %settled, "query settled");
            state.settled_query = settled;

            if !state.started {
                tracing::debug!("not started yet, deferring fetch");
                return Ok((true, vec![]));
            }

            let query = state.settled_query.clone();
            Ok((true, begin_fetch(state, &query)))
        }
        Event::WebResponse { tag, response } => match *tag {
            RequestTag::Catalog { fetch_id } => on_catalog_response(state, fetch_id, response),
            RequestTag::Analytics { fetch_id } => on_analytics_response(state, fetch_id, response),
            RequestTag::Trending => on_trending_response(state, response),
        },
    }
}

fn event_kind(event: &Event) -> &'static str {
    match event {
        Event::Start => "start",
        Event::PermissionDenied => "permission_denied",
        Event::Char(_) => "char",
        Event::Backspace => "backspace",
        Event::ClearQuery => "clear_query",
        Event::KeyDown => "key_down",
        Event::KeyUp => "key_up",
        Event::CloseFocus => "close_focus",
        Event::DebounceElapsed => "debounce_elapsed",
        Event::WebResponse { .. } => "web_response",
    }
}

fn schedule_settle(state: &mut AppState) -> Action {
    Action::ScheduleTimer(state.debouncer.push(state.draft_query.clone()))
}

/// Starts a catalog fetch for `query`, superseding any fetch in flight.
fn begin_fetch(state: &mut AppState, query: &str) -> Vec<Action> {
    let Some(catalog) = state.catalog.as_ref() else {
        let message = state
            .config_error
            .clone()
            .unwrap_or_else(|| ReelfinderError::Config("no movie catalog configured".into()).user_message());
        tracing::error!(error = %message, "cannot fetch movies");
        state.status = transition(&state.status, FetchOutcome::Failed(message));
        return vec![];
    };

    let request = catalog.movies_request(query);
    let fetch_id = state.fetches.begin(query);
    state.status = transition(&state.status, FetchOutcome::Started);
    state.selected_index = 0;

    tracing::debug!(fetch_id, query = %query, "fetching movies");

    vec![Action::SendRequest {
        tag: RequestTag::Catalog { fetch_id },
        request,
    }]
}

fn on_catalog_response(
    state: &mut AppState,
    fetch_id: u64,
    response: &HttpResponse,
) -> Result<(bool, Vec<Action>)> {
    let Some(query) = state
        .fetches
        .current()
        .filter(|f| f.fetch_id == fetch_id)
        .map(|f| f.query.clone())
    else {
        tracing::debug!(fetch_id, "ignoring stale catalog response");
        return Ok((false, vec![]));
    };

    match catalog::interpret(response) {
        Ok(movies) => {
            tracing::debug!(fetch_id, count = movies.len(), "movies fetched");

            if let Some(action) = start_record(state, fetch_id, &query, &movies) {
                state.fetches.stage(fetch_id, movies);
                return Ok((false, vec![action]));
            }

            state.fetches.finish(fetch_id);
            state.status = transition(&state.status, FetchOutcome::Succeeded(movies));
            Ok((true, vec![]))
        }
        Err(e) => {
            if matches!(e, ReelfinderError::Api(_)) {
                tracing::warn!(fetch_id, error = %e, "catalog reported failure");
            } else {
                tracing::error!(fetch_id, error = %e, "error fetching movies");
            }
            state.fetches.finish(fetch_id);
            state.status = transition(&state.status, FetchOutcome::Failed(e.user_message()));
            Ok((true, vec![]))
        }
    }
}

/// Begins recording `query` against its top result, if there is one to record.
fn start_record(state: &mut AppState, fetch_id: u64, query: &str, movies: &[Movie]) -> Option<Action> {
    if query.is_empty() {
        return None;
    }
    let top_result = movies.first()?;
    let sink = state.analytics.as_deref()?;

    let request = sink.record(query, top_result);
    state.record_jobs.insert(
        fetch_id,
        RecordJob {
            fetch_id,
            search_term: query.to_string(),
            top_result: top_result.clone(),
            stage: RecordStage::Lookup,
        },
    );

    Some(Action::SendRequest {
        tag: RequestTag::Analytics { fetch_id },
        request,
    })
}

fn on_analytics_response(
    state: &mut AppState,
    fetch_id: u64,
    response: &HttpResponse,
) -> Result<(bool, Vec<Action>)> {
    let Some(job) = state.record_jobs.remove(&fetch_id) else {
        tracing::debug!(fetch_id, "analytics response without a record job");
        return Ok((false, vec![]));
    };

    let outcome = match state.analytics.as_deref() {
        Some(sink) => match job.stage {
            RecordStage::Lookup => sink
                .after_lookup(&job.search_term, &job.top_result, response)
                .map(Some),
            RecordStage::Write => sink.after_write(response).map(|()| None),
        },
        None => Err(ReelfinderError::Analytics("analytics sink went away".into())),
    };

    match outcome {
        Ok(Some(request)) => {
            state.record_jobs.insert(
                fetch_id,
                RecordJob {
                    stage: RecordStage::Write,
                    ..job
                },
            );
            return Ok((
                false,
                vec![Action::SendRequest {
                    tag: RequestTag::Analytics { fetch_id },
                    request,
                }],
            ));
        }
        Ok(None) => tracing::debug!(fetch_id, search_term = %job.search_term, "search recorded"),
        Err(e) => tracing::warn!(fetch_id, search_term = %job.search_term, error = %e, "failed to record search"),
    }

    publish_staged(state, fetch_id)
}

/// Shows results held back for `fetch_id`, if it is still the latest fetch.
fn publish_staged(state: &mut AppState, fetch_id: u64) -> Result<(bool, Vec<Action>)> {
    let Some(finished) = state.fetches.finish(fetch_id) else {
        tracing::debug!(fetch_id, "record chain outlived its fetch");
        return Ok((false, vec![]));
    };

    let movies = finished.staged.unwrap_or_default();
    state.status = transition(&state.status, FetchOutcome::Succeeded(movies));
    Ok((true, vec![]))
}

fn on_trending_response(state: &mut AppState, response: &HttpResponse) -> Result<(bool, Vec<Action>)> {
    let Some(sink) = state.analytics.as_deref() else {
        return Ok((false, vec![]));
    };

    match sink.parse_trending(response) {
        Ok(trending) => {
            tracing::debug!(count = trending.len(), "trending searches loaded");
            state.trending = trending;
            Ok((true, vec![]))
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to load trending searches");
            Ok((false, vec![]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{AppwriteSettings, AppwriteSink};
    use crate::catalog::CatalogClient;
    use crate::domain::{Status, GENERIC_FETCH_ERROR};
    use crate::infrastructure::{HttpRequest, Method};
    use crate::ui::theme::Theme;
    use std::time::Duration;

    const BATMAN_PAGE: &str = r#"{"page": 1, "results": [
        {"id": 268, "title": "Batman", "vote_average": 7.2, "poster_path": "/bat.jpg",
         "release_date": "1989-06-23", "original_language": "en"},
        {"id": 364, "title": "Batman Returns", "vote_average": 6.9}
    ]}"#;

    fn state() -> AppState {
        AppState::new(Theme::default())
            .with_catalog(CatalogClient::new("https://api.example.test/3", "key"))
            .with_quiet_period(Duration::from_millis(500))
    }

    fn state_with_analytics() -> AppState {
        let sink = AppwriteSink::new(AppwriteSettings {
            endpoint: "https://appwrite.example.test/v1".to_string(),
            project_id: "proj".to_string(),
            database_id: "db".to_string(),
            collection_id: "metrics".to_string(),
            api_key: None,
        })
        .unwrap();
        state().with_analytics(Box::new(sink))
    }

    fn handle(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
        handle_event(state, &event).unwrap()
    }

    fn sent(actions: &[Action]) -> Vec<(RequestTag, HttpRequest)> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::SendRequest { tag, request } => Some((*tag, request.clone())),
                _ => None,
            })
            .collect()
    }

    fn respond(state: &mut AppState, tag: RequestTag, status: u16, body: &str) -> (bool, Vec<Action>) {
        handle(
            state,
            Event::WebResponse {
                tag,
                response: HttpResponse::new(status, body),
            },
        )
    }

    fn type_and_settle(state: &mut AppState, text: &str) -> Vec<Action> {
        for c in text.chars() {
            handle(state, Event::Char(c));
        }
        let mut actions = Vec::new();
        for _ in text.chars() {
            actions.extend(handle(state, Event::DebounceElapsed).1);
        }
        actions
    }

    fn started(state: &mut AppState) -> u64 {
        let (_, actions) = handle(state, Event::Start);
        let requests = sent(&actions);
        match requests.last() {
            Some((RequestTag::Catalog { fetch_id }, _)) => *fetch_id,
            other => panic!("expected catalog request, got {other:?}"),
        }
    }

    #[test]
    fn start_fetches_popular_movies() {
        let mut state = state();
        let (render, actions) = handle(&mut state, Event::Start);

        assert!(render);
        assert!(state.is_loading());
        let requests = sent(&actions);
        assert_eq!(requests.len(), 1);
        assert!(requests[0].1.url.contains("/discover/movie?sort_by=popularity.desc"));
    }

    #[test]
    fn start_is_idempotent() {
        let mut state = state();
        started(&mut state);
        let (render, actions) = handle(&mut state, Event::Start);
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn start_with_analytics_loads_trending_first() {
        let mut state = state_with_analytics();
        let (_, actions) = handle(&mut state, Event::Start);
        let tags: Vec<RequestTag> = sent(&actions).into_iter().map(|(t, _)| t).collect();
        assert_eq!(tags[0], RequestTag::Trending);
        assert!(matches!(tags[1], RequestTag::Catalog { .. }));
    }

    #[test]
    fn missing_catalog_shows_config_error() {
        let mut state = AppState::new(Theme::default())
            .with_config_error("missing api_key".to_string());
        let (_, actions) = handle(&mut state, Event::Start);
        assert!(actions.is_empty());
        assert_eq!(state.status, Status::Error("missing api_key".to_string()));
    }

    #[test]
    fn typing_schedules_a_timer_per_keystroke_and_fetches_once() {
        let mut state = state();
        started(&mut state);

        let mut timers = 0;
        for c in "bat".chars() {
            let (_, actions) = handle(&mut state, Event::Char(c));
            assert_eq!(actions, vec![Action::ScheduleTimer(Duration::from_millis(500))]);
            timers += 1;
        }
        assert_eq!(state.draft_query, "bat");
        assert_eq!(state.settled_query, "", "nothing settles while typing");

        let mut fetches = Vec::new();
        for _ in 0..timers {
            fetches.extend(sent(&handle(&mut state, Event::DebounceElapsed).1));
        }
        assert_eq!(fetches.len(), 1);
        assert!(fetches[0].1.url.contains("/search/movie?query=bat"));
        assert_eq!(state.settled_query, "bat");
    }

    #[test]
    fn returning_to_settled_text_does_not_refetch() {
        let mut state = state();
        started(&mut state);
        type_and_settle(&mut state, "a");

        handle(&mut state, Event::Char('b'));
        handle(&mut state, Event::Backspace);
        let actions: Vec<Action> = (0..2)
            .flat_map(|_| handle(&mut state, Event::DebounceElapsed).1)
            .collect();
        assert!(sent(&actions).is_empty());
    }

    #[test]
    fn backspace_and_clear_on_empty_query_are_inert() {
        let mut state = state();
        assert_eq!(handle(&mut state, Event::Backspace), (false, vec![]));
        assert_eq!(handle(&mut state, Event::ClearQuery), (false, vec![]));
    }

    #[test]
    fn clearing_query_fetches_discover_again() {
        let mut state = state();
        started(&mut state);
        type_and_settle(&mut state, "bat");

        handle(&mut state, Event::ClearQuery);
        let requests = sent(&handle(&mut state, Event::DebounceElapsed).1);
        assert_eq!(requests.len(), 1);
        assert!(requests[0].1.url.contains("/discover/movie"));
    }

    #[test]
    fn settling_before_start_defers_to_start() {
        let mut state = state();
        let actions = type_and_settle(&mut state, "heat");
        assert!(actions.is_empty());

        let (_, actions) = handle(&mut state, Event::Start);
        assert!(sent(&actions)[0].1.url.contains("query=heat"));
    }

    #[test]
    fn successful_fetch_without_analytics_is_ready() {
        let mut state = state();
        let id = started(&mut state);

        let (render, _) = respond(&mut state, RequestTag::Catalog { fetch_id: id }, 200, BATMAN_PAGE);
        assert!(render);
        assert_eq!(state.movies().len(), 2);
        assert_eq!(state.movies()[0].title, "Batman");
    }

    #[test]
    fn http_failure_shows_generic_message() {
        let mut state = state();
        let id = started(&mut state);
        respond(&mut state, RequestTag::Catalog { fetch_id: id }, 401, "{}");
        assert_eq!(state.status, Status::Error(GENERIC_FETCH_ERROR.to_string()));
    }

    #[test]
    fn sentinel_failure_shows_server_text() {
        let mut state = state();
        let id = started(&mut state);
        respond(
            &mut state,
            RequestTag::Catalog { fetch_id: id },
            200,
            r#"{"Response": "False", "Error": "Too many results."}"#,
        );
        assert_eq!(state.status, Status::Error("Too many results.".to_string()));
    }

    #[test]
    fn failure_then_new_fetch_clears_error() {
        let mut state = state();
        let id = started(&mut state);
        respond(&mut state, RequestTag::Catalog { fetch_id: id }, 500, "");
        assert!(state.status.error_message().is_some());

        type_and_settle(&mut state, "x");
        assert!(state.is_loading());
    }

    #[test]
    fn stale_response_never_overwrites_newer_fetch() {
        let mut state = state();
        let first = started(&mut state);
        let second = match sent(&type_and_settle(&mut state, "bat")).as_slice() {
            [(RequestTag::Catalog { fetch_id }, _)] => *fetch_id,
            other => panic!("unexpected requests {other:?}"),
        };

        respond(&mut state, RequestTag::Catalog { fetch_id: second }, 200, BATMAN_PAGE);
        let (render, actions) = respond(
            &mut state,
            RequestTag::Catalog { fetch_id: first },
            200,
            r#"{"results": []}"#,
        );

        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.movies().len(), 2);
    }

    #[test]
    fn search_with_analytics_stays_loading_until_recorded() {
        let mut state = state_with_analytics();
        let initial = started(&mut state);
        respond(&mut state, RequestTag::Catalog { fetch_id: initial }, 200, BATMAN_PAGE);
        assert_eq!(state.movies().len(), 2, "empty query is never recorded");

        let id = match sent(&type_and_settle(&mut state, "batman")).as_slice() {
            [(RequestTag::Catalog { fetch_id }, _)] => *fetch_id,
            other => panic!("unexpected requests {other:?}"),
        };

        let (_, actions) = respond(&mut state, RequestTag::Catalog { fetch_id: id }, 200, BATMAN_PAGE);
        assert!(state.is_loading());
        let lookup = sent(&actions);
        assert_eq!(lookup[0].0, RequestTag::Analytics { fetch_id: id });
        assert_eq!(lookup[0].1.method, Method::Get);

        let (_, actions) = respond(
            &mut state,
            RequestTag::Analytics { fetch_id: id },
            200,
            r#"{"total": 0, "documents": []}"#,
        );
        assert!(state.is_loading());
        let write = sent(&actions);
        assert_eq!(write[0].1.method, Method::Post);
        assert_eq!(write[0].1.body_json().unwrap()["data"]["movie_id"], 268);

        let (render, _) = respond(&mut state, RequestTag::Analytics { fetch_id: id }, 201, "{}");
        assert!(render);
        assert_eq!(state.movies()[0].id, 268);
    }

    #[test]
    fn analytics_failure_still_shows_results() {
        let mut state = state_with_analytics();
        started(&mut state);
        let id = match sent(&type_and_settle(&mut state, "batman")).as_slice() {
            [(RequestTag::Catalog { fetch_id }, _)] => *fetch_id,
            other => panic!("unexpected requests {other:?}"),
        };
        respond(&mut state, RequestTag::Catalog { fetch_id: id }, 200, BATMAN_PAGE);

        let (render, actions) = respond(&mut state, RequestTag::Analytics { fetch_id: id }, 503, "");
        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.movies().len(), 2);
    }

    #[test]
    fn empty_results_are_not_recorded() {
        let mut state = state_with_analytics();
        started(&mut state);
        let id = match sent(&type_and_settle(&mut state, "zzzz")).as_slice() {
            [(RequestTag::Catalog { fetch_id }, _)] => *fetch_id,
            other => panic!("unexpected requests {other:?}"),
        };

        let (_, actions) = respond(&mut state, RequestTag::Catalog { fetch_id: id }, 200, r#"{"results": []}"#);
        assert!(actions.is_empty());
        assert_eq!(state.status, Status::Ready(vec![]));
    }

    #[test]
    fn superseded_record_chain_finishes_without_touching_results() {
        let mut state = state_with_analytics();
        started(&mut state);
        let old = match sent(&type_and_settle(&mut state, "batman")).as_slice() {
            [(RequestTag::Catalog { fetch_id }, _)] => *fetch_id,
            other => panic!("unexpected requests {other:?}"),
        };
        respond(&mut state, RequestTag::Catalog { fetch_id: old }, 200, BATMAN_PAGE);

        type_and_settle(&mut state, "x");
        assert!(state.is_loading());

        let (_, actions) = respond(
            &mut state,
            RequestTag::Analytics { fetch_id: old },
            200,
            r#"{"documents": []}"#,
        );
        assert_eq!(sent(&actions).len(), 1, "write still goes out");

        let (render, _) = respond(&mut state, RequestTag::Analytics { fetch_id: old }, 201, "{}");
        assert!(!render);
        assert!(state.is_loading());
    }

    #[test]
    fn trending_response_fills_strip_and_errors_are_quiet() {
        let mut state = state_with_analytics();
        let (render, _) = respond(
            &mut state,
            RequestTag::Trending,
            200,
            r#"{"documents": [{"searchTerm": "batman", "count": 3}]}"#,
        );
        assert!(render);
        assert_eq!(state.trending.len(), 1);

        let (render, _) = respond(&mut state, RequestTag::Trending, 500, "");
        assert!(!render);
        assert_eq!(state.trending.len(), 1);
    }

    #[test]
    fn permission_denied_is_an_error_state() {
        let mut state = state();
        handle(&mut state, Event::PermissionDenied);
        assert_eq!(state.status.error_message(), Some(PERMISSION_DENIED_MESSAGE));
    }

    #[test]
    fn navigation_and_close() {
        let mut state = state();
        let id = started(&mut state);
        respond(&mut state, RequestTag::Catalog { fetch_id: id }, 200, BATMAN_PAGE);

        handle(&mut state, Event::KeyDown);
        assert_eq!(state.selected_index, 1);
        handle(&mut state, Event::KeyUp);
        assert_eq!(state.selected_index, 0);
        assert_eq!(handle(&mut state, Event::CloseFocus), (false, vec![Action::CloseFocus]));
    }
}
