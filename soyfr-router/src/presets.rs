//! The application's standard route table.

use crate::config::{NavConfig, RootTarget};
use crate::error::Result;
use crate::history::History;
use crate::router::{handler, Dispatcher, RouteTable};
use crate::routes;

pub const INDEX: &str = "index";
pub const LOGIN: &str = "login";
pub const REGISTER: &str = "register";
pub const USERS: &str = "users";
/// Shown for `/user/:username`.
pub const PROFILE: &str = "test";

/// Register `/`, `/login`, `/register`, `/user` and `/user/:username`, in
/// that order. `root` picks what `/` does.
pub fn standard_table(root: RootTarget) -> Result<RouteTable> {
    let login = handler(|cx| cx.set_route(LOGIN));
    let index = match root {
        RootTarget::Index => handler(|cx| cx.set_route(INDEX)),
        RootTarget::Login => login.clone(),
    };

    routes! {
        "/" => index,
        "/login" => login,
        "/register" => handler(|cx| cx.set_route(REGISTER)),
        "/user" => handler(|cx| cx.set_route(USERS)),
        // The username is captured but the view does not use it yet.
        "/user/:username" => handler(|cx| cx.set_route(PROFILE)),
    }
}

/// Build a dispatcher over [`standard_table`] configured by `config`.
pub fn standard_dispatcher<H: History>(config: &NavConfig, history: H) -> Result<Dispatcher<H>> {
    let table = standard_table(config.root)?;
    Ok(Dispatcher::with_config(table, history, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryHistory;
    use crate::router::Dispatch;

    fn dispatcher(root: RootTarget) -> Dispatcher<MemoryHistory> {
        Dispatcher::new(standard_table(root).unwrap(), MemoryHistory::default())
    }

    fn route_after(d: &Dispatcher<MemoryHistory>, path: &str) -> Option<String> {
        d.dispatch(path).unwrap();
        d.current().unwrap()
    }

    #[test]
    fn test_table_order() {
        let table = standard_table(RootTarget::Index).unwrap();
        let patterns: Vec<&str> = table.patterns().map(|p| p.as_str()).collect();
        assert_eq!(
            patterns,
            ["/", "/login", "/register", "/user", "/user/:username"]
        );
    }

    #[test]
    fn test_literal_routes() {
        let d = dispatcher(RootTarget::Index);
        assert_eq!(route_after(&d, "/").as_deref(), Some(INDEX));
        assert_eq!(route_after(&d, "/login").as_deref(), Some(LOGIN));
        assert_eq!(route_after(&d, "/register").as_deref(), Some(REGISTER));
        assert_eq!(route_after(&d, "/user").as_deref(), Some(USERS));
    }

    #[test]
    fn test_root_delegates_to_login() {
        let d = dispatcher(RootTarget::Login);
        let outcome = d.dispatch("/").unwrap();
        assert!(matches!(outcome, Dispatch::Matched { ref pattern, .. } if pattern == "/"));
        assert_eq!(d.current().unwrap().as_deref(), Some(LOGIN));
    }

    #[test]
    fn test_root_is_idempotent() {
        for (root, expected) in [(RootTarget::Index, INDEX), (RootTarget::Login, LOGIN)] {
            let d = dispatcher(root);
            assert_eq!(route_after(&d, "/").as_deref(), Some(expected));
            assert_eq!(route_after(&d, "/").as_deref(), Some(expected));
        }
    }

    #[test]
    fn test_profile_captures_username() {
        let d = dispatcher(RootTarget::Index);
        let outcome = d.dispatch("/user/alice").unwrap();
        match outcome {
            Dispatch::Matched { pattern, params } => {
                assert_eq!(pattern, "/user/:username");
                assert_eq!(params.get("username"), Some("alice"));
            }
            other => panic!("expected a match, got {other:?}"),
        }
        assert_eq!(d.current().unwrap().as_deref(), Some(PROFILE));
    }

    #[test]
    fn test_literal_user_wins_over_placeholder() {
        let d = dispatcher(RootTarget::Index);
        let outcome = d.dispatch("/user").unwrap();
        assert!(matches!(outcome, Dispatch::Matched { ref pattern, .. } if pattern == "/user"));
        assert_eq!(d.current().unwrap().as_deref(), Some(USERS));
    }

    #[test]
    fn test_unknown_path_keeps_previous_route() {
        let d = dispatcher(RootTarget::Index);
        assert_eq!(d.dispatch("/does-not-exist").unwrap(), Dispatch::Unmatched);
        assert_eq!(d.current().unwrap(), None);

        d.dispatch("/register").unwrap();
        assert_eq!(d.dispatch("/does-not-exist").unwrap(), Dispatch::Unmatched);
        assert_eq!(d.current().unwrap().as_deref(), Some(REGISTER));
    }

    #[test]
    fn test_standard_dispatcher_from_config() {
        let config = NavConfig::from_toml(
            r#"
            root = "login"
            history = "hash"
            not_found = "not-found"
            "#,
        )
        .unwrap();
        let mut d = standard_dispatcher(&config, MemoryHistory::new("/#/")).unwrap();
        d.start().unwrap();
        assert_eq!(d.current().unwrap().as_deref(), Some(LOGIN));

        d.set_route("/missing").unwrap();
        assert_eq!(d.current().unwrap().as_deref(), Some("not-found"));
    }
}
