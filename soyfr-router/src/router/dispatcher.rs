//! The route dispatcher.
//!
//! Owns the route table, the current-route cell and the injected history.
//! Every location change goes through [`Dispatcher::dispatch`], which runs at
//! most one handler, synchronously.

use tokio::sync::watch;

use super::pattern::Params;
use super::table::{CurrentRoute, RouteContext, RouteTable};
use crate::config::{HistoryMode, NavConfig};
use crate::error::Result;
use crate::event::NavEvent;
use crate::history::History;
use crate::state::Entity;

/// Outcome of a single dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A route matched and its handler ran.
    Matched { pattern: String, params: Params },
    /// Nothing matched; the configured not-found route was made current.
    Fallback { route: String },
    /// Nothing matched; state is untouched.
    Unmatched,
}

impl Dispatch {
    pub fn is_matched(&self) -> bool {
        matches!(self, Dispatch::Matched { .. })
    }
}

pub struct Dispatcher<H: History> {
    table: RouteTable,
    current: CurrentRoute,
    history: H,
    mode: HistoryMode,
    not_found: Option<String>,
}

impl<H: History> Dispatcher<H> {
    /// Create a dispatcher in html5 mode with no not-found route.
    pub fn new(table: RouteTable, history: H) -> Self {
        Self {
            table,
            current: Entity::new(None),
            history,
            mode: HistoryMode::Html5,
            not_found: None,
        }
    }

    pub fn with_config(table: RouteTable, history: H, config: &NavConfig) -> Self {
        Self::new(table, history)
            .with_mode(config.history)
            .with_not_found(config.not_found.clone())
    }

    pub fn with_mode(mut self, mode: HistoryMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_not_found(mut self, route: Option<String>) -> Self {
        self.not_found = route;
        self
    }

    /// The current route name, `None` before the first successful dispatch.
    pub fn current(&self) -> Result<Option<String>> {
        self.current.read(|route| route.clone())
    }

    /// A handle to the current-route cell for the rendering layer.
    pub fn current_route(&self) -> CurrentRoute {
        self.current.clone()
    }

    /// Ticks after every write to the current route.
    pub fn subscribe(&self) -> watch::Receiver<()> {
        self.current.subscribe()
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn mode(&self) -> HistoryMode {
        self.mode
    }

    /// Dispatch the history's active location. Call once at startup.
    ///
    /// The active entry is replaced with itself, so the history owns it the
    /// same way as entries pushed later.
    pub fn start(&mut self) -> Result<Dispatch> {
        let location = self.history.location();
        tracing::debug!(location = %location, "dispatcher started");
        self.history.replace(&location);
        self.dispatch(&location)
    }

    /// Match `location` and run the first matching handler.
    pub fn dispatch(&self, location: &str) -> Result<Dispatch> {
        let path = normalize(location, self.mode);

        let Some((entry, params)) = self.table.find(&path) else {
            return match &self.not_found {
                Some(route) => {
                    tracing::debug!(path = %path, route = %route, "no route matched, using fallback");
                    self.current.update(|current| *current = Some(route.clone()))?;
                    Ok(Dispatch::Fallback {
                        route: route.clone(),
                    })
                }
                None => {
                    tracing::debug!(path = %path, "no route matched");
                    Ok(Dispatch::Unmatched)
                }
            };
        };

        tracing::debug!(path = %path, pattern = %entry.pattern, "route matched");
        let cx = RouteContext::new(&path, &params, &self.current);
        (entry.handler)(&cx)?;

        Ok(Dispatch::Matched {
            pattern: entry.pattern.as_str().to_string(),
            params,
        })
    }

    /// Navigate to `path`: push a history entry, then dispatch it.
    pub fn set_route(&mut self, path: &str) -> Result<Dispatch> {
        let location = match self.mode {
            HistoryMode::Html5 => path.to_string(),
            HistoryMode::Hash => format!("/#{}", path.trim_start_matches('#')),
        };
        self.history.push(&location);
        self.dispatch(&location)
    }

    /// Ask the history to go back. The current route is left alone until the
    /// history reports the move and [`sync_history`](Self::sync_history) runs.
    pub fn navigate_back(&mut self) {
        self.history.back();
    }

    /// Dispatch every location change the history has reported, in order.
    pub fn sync_history(&mut self) -> Result<usize> {
        let mut count = 0;
        while let Some(location) = self.history.poll_pop() {
            self.dispatch(&location)?;
            count += 1;
        }
        Ok(count)
    }

    pub fn handle(&mut self, event: NavEvent) -> Result<()> {
        tracing::debug!(event = event.name(), "navigation event");
        match event {
            NavEvent::ChangeRoute(path) => {
                self.set_route(&path)?;
            }
            NavEvent::ChangeRouteBack => self.navigate_back(),
        }
        Ok(())
    }
}

/// Reduce a location to the route path for `mode`.
///
/// Query strings and, in html5 mode, fragments are dropped before an
/// origin is stripped. A leading `/` is ensured and an empty path
/// becomes `/`. Trailing slashes are left for the matcher.
pub fn normalize(location: &str, mode: HistoryMode) -> String {
    let path = match mode {
        HistoryMode::Html5 => {
            let end = location
                .find(|c: char| c == '?' || c == '#')
                .unwrap_or(location.len());
            let bare = &location[..end];
            // An origin only counts when `://` comes before any `/`.
            match bare.find("://") {
                Some(i) if !bare[..i].contains('/') => {
                    let rest = &bare[i + 3..];
                    rest.find('/').map_or("/", |j| &rest[j..])
                }
                _ => bare,
            }
        }
        HistoryMode::Hash => location.split_once('#').map_or("", |(_, frag)| frag),
    };
    let path = path.split('?').next().unwrap_or("");

    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryHistory;
    use crate::router::table::handler;
    use crate::routes;
    use std::sync::{Arc, Mutex};

    fn table() -> RouteTable {
        routes! {
            "/" => handler(|cx| cx.set_route("index")),
            "/login" => handler(|cx| cx.set_route("login")),
            "/user" => handler(|cx| cx.set_route("users")),
            "/user/:username" => handler(|cx| cx.set_route("test")),
        }
        .unwrap()
    }

    /// Records calls so tests can see exactly what the dispatcher asked for.
    #[derive(Clone, Default)]
    struct RecordingHistory {
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingHistory {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl History for RecordingHistory {
        fn location(&self) -> String {
            "/".to_string()
        }
        fn push(&mut self, path: &str) {
            self.calls.lock().unwrap().push(format!("push {path}"));
        }
        fn replace(&mut self, path: &str) {
            self.calls.lock().unwrap().push(format!("replace {path}"));
        }
        fn back(&mut self) {
            self.calls.lock().unwrap().push("back".to_string());
        }
        fn poll_pop(&mut self) -> Option<String> {
            None
        }
    }

    #[test]
    fn test_initially_unset() {
        let dispatcher = Dispatcher::new(table(), MemoryHistory::default());
        assert_eq!(dispatcher.current().unwrap(), None);
    }

    #[test]
    fn test_start_dispatches_initial_location() {
        let mut dispatcher = Dispatcher::new(table(), MemoryHistory::new("/login"));
        assert!(dispatcher.start().unwrap().is_matched());
        assert_eq!(dispatcher.current().unwrap().as_deref(), Some("login"));
        assert_eq!(dispatcher.history().len(), 1);
    }

    #[test]
    fn test_handler_sees_params() {
        let seen = Arc::new(Mutex::new(None));
        let seen_in_handler = seen.clone();
        let table = routes! {
            "/user/:username" => handler(move |cx| {
                *seen_in_handler.lock().unwrap() =
                    Some((cx.path().to_string(), cx.param("username").map(String::from)));
                cx.set_route("test")
            }),
        }
        .unwrap();

        let dispatcher = Dispatcher::new(table, MemoryHistory::default());
        dispatcher.dispatch("/user/alice?tab=1").unwrap();
        assert_eq!(
            *seen.lock().unwrap(),
            Some(("/user/alice".to_string(), Some("alice".to_string())))
        );
    }

    #[test]
    fn test_handler_runs_exactly_once() {
        let hits = Arc::new(Mutex::new(0));
        let counter = hits.clone();
        let table = routes! {
            "/login" => handler(move |cx| {
                *counter.lock().unwrap() += 1;
                cx.set_route("login")
            }),
            "/login" => handler(|_| panic!("shadowed route must not run")),
        }
        .unwrap();

        let dispatcher = Dispatcher::new(table, MemoryHistory::default());
        dispatcher.dispatch("/login").unwrap();
        assert_eq!(*hits.lock().unwrap(), 1);
    }

    #[test]
    fn test_unmatched_is_noop() {
        let dispatcher = Dispatcher::new(table(), MemoryHistory::default());
        dispatcher.dispatch("/login").unwrap();
        let mut rx = dispatcher.subscribe();

        assert_eq!(dispatcher.dispatch("/does-not-exist").unwrap(), Dispatch::Unmatched);
        assert_eq!(dispatcher.current().unwrap().as_deref(), Some("login"));
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_unmatched_uses_fallback_when_configured() {
        let dispatcher = Dispatcher::new(table(), MemoryHistory::default())
            .with_not_found(Some("not-found".to_string()));
        assert_eq!(
            dispatcher.dispatch("/nope").unwrap(),
            Dispatch::Fallback {
                route: "not-found".into()
            }
        );
        assert_eq!(dispatcher.current().unwrap().as_deref(), Some("not-found"));
    }

    #[test]
    fn test_set_route_pushes_and_dispatches() {
        let mut dispatcher = Dispatcher::new(table(), MemoryHistory::default());
        dispatcher.start().unwrap();
        dispatcher.set_route("/user/bob").unwrap();

        assert_eq!(dispatcher.current().unwrap().as_deref(), Some("test"));
        assert_eq!(dispatcher.history().entries(), ["/", "/user/bob"]);
    }

    #[test]
    fn test_set_route_unmatched_still_pushes() {
        let mut dispatcher = Dispatcher::new(table(), MemoryHistory::default());
        dispatcher.start().unwrap();
        assert_eq!(dispatcher.set_route("/nowhere").unwrap(), Dispatch::Unmatched);
        assert_eq!(dispatcher.current().unwrap().as_deref(), Some("index"));
        assert_eq!(dispatcher.history().location(), "/nowhere");
    }

    #[test]
    fn test_navigate_back_only_asks_history() {
        let history = RecordingHistory::default();
        let mut dispatcher = Dispatcher::new(table(), history.clone());
        dispatcher.set_route("/login").unwrap();
        let mut rx = dispatcher.subscribe();

        dispatcher.navigate_back();

        assert_eq!(history.calls(), ["push /login", "back"]);
        assert_eq!(dispatcher.current().unwrap().as_deref(), Some("login"));
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_back_then_sync_restores_previous_route() {
        let mut dispatcher = Dispatcher::new(table(), MemoryHistory::default());
        dispatcher.start().unwrap();
        dispatcher.set_route("/login").unwrap();
        dispatcher.set_route("/user").unwrap();

        dispatcher.navigate_back();
        assert_eq!(dispatcher.current().unwrap().as_deref(), Some("users"));

        assert_eq!(dispatcher.sync_history().unwrap(), 1);
        assert_eq!(dispatcher.current().unwrap().as_deref(), Some("login"));
        assert_eq!(dispatcher.sync_history().unwrap(), 0);
    }

    #[test]
    fn test_handle_events() {
        let mut dispatcher = Dispatcher::new(table(), MemoryHistory::default());
        dispatcher.start().unwrap();

        dispatcher.handle(NavEvent::ChangeRoute("/user".into())).unwrap();
        assert_eq!(dispatcher.current().unwrap().as_deref(), Some("users"));

        dispatcher.handle(NavEvent::ChangeRouteBack).unwrap();
        dispatcher.sync_history().unwrap();
        assert_eq!(dispatcher.current().unwrap().as_deref(), Some("index"));
    }

    #[test]
    fn test_hash_mode() {
        let mut dispatcher =
            Dispatcher::new(table(), MemoryHistory::new("/#/user")).with_mode(HistoryMode::Hash);
        dispatcher.start().unwrap();
        assert_eq!(dispatcher.current().unwrap().as_deref(), Some("users"));

        dispatcher.set_route("/login").unwrap();
        assert_eq!(dispatcher.history().location(), "/#/login");
        assert_eq!(dispatcher.current().unwrap().as_deref(), Some("login"));
    }

    #[test]
    fn test_urls_in_query_or_fragment_do_not_change_route() {
        let dispatcher = Dispatcher::new(table(), MemoryHistory::default());
        let outcome = dispatcher.dispatch("/user?next=http://example.com/login").unwrap();
        assert!(matches!(outcome, Dispatch::Matched { ref pattern, .. } if pattern == "/user"));
        assert_eq!(dispatcher.current().unwrap().as_deref(), Some("users"));

        let outcome = dispatcher.dispatch("/login#see=https://h/user/bob").unwrap();
        assert!(matches!(outcome, Dispatch::Matched { ref pattern, .. } if pattern == "/login"));
        assert_eq!(dispatcher.current().unwrap().as_deref(), Some("login"));
    }

    #[test]
    fn test_hash_mode_detail_with_fragment() {
        let mut dispatcher =
            Dispatcher::new(table(), MemoryHistory::new("/#/")).with_mode(HistoryMode::Hash);
        dispatcher.start().unwrap();

        assert!(dispatcher.set_route("#/login").unwrap().is_matched());
        assert_eq!(dispatcher.history().location(), "/#/login");
        assert_eq!(dispatcher.current().unwrap().as_deref(), Some("login"));
    }

    #[test]
    fn test_start_replaces_initial_entry() {
        let history = RecordingHistory::default();
        let mut dispatcher = Dispatcher::new(table(), history.clone());
        dispatcher.start().unwrap();

        assert_eq!(history.calls(), ["replace /"]);
        assert_eq!(dispatcher.current().unwrap().as_deref(), Some("index"));
    }

    #[tokio::test]
    async fn test_subscribers_notified_on_dispatch() {
        let dispatcher = Dispatcher::new(table(), MemoryHistory::default());
        let mut rx = dispatcher.subscribe();
        let route = dispatcher.current_route();

        dispatcher.dispatch("/user").unwrap();
        rx.changed().await.unwrap();
        assert_eq!(route.read(|r| r.clone()).unwrap().as_deref(), Some("users"));
    }

    #[test]
    fn test_normalize_html5() {
        let m = HistoryMode::Html5;
        assert_eq!(normalize("", m), "/");
        assert_eq!(normalize("/", m), "/");
        assert_eq!(normalize("/login?next=/user", m), "/login");
        assert_eq!(normalize("/user/alice#top", m), "/user/alice");
        assert_eq!(normalize("login", m), "/login");
        assert_eq!(normalize("http://localhost:8080/register", m), "/register");
        assert_eq!(normalize("http://localhost:8080", m), "/");
        assert_eq!(normalize("/user?next=http://example.com/login", m), "/user");
        assert_eq!(normalize("/register#see=https://h/user/bob", m), "/register");
        assert_eq!(normalize("/a/http://b/c", m), "/a/http://b/c");
    }

    #[test]
    fn test_normalize_hash() {
        let m = HistoryMode::Hash;
        assert_eq!(normalize("/", m), "/");
        assert_eq!(normalize("/#/login", m), "/login");
        assert_eq!(normalize("#login", m), "/login");
        assert_eq!(normalize("/index.html#/user/bob?x=1", m), "/user/bob");
        assert_eq!(normalize("/#", m), "/");
    }
}
