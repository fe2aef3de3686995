//! The route table: ordered `(pattern, handler)` entries.

use std::fmt;
use std::sync::Arc;

use super::pattern::{Params, PathPattern};
use crate::error::Result;
use crate::state::Entity;

/// The single "current route" cell shared with the rendering layer.
pub type CurrentRoute = Entity<Option<String>>;

/// A route handler. Cloning shares the same callback, which is how one
/// entry delegates to another.
pub type Handler = Arc<dyn Fn(&RouteContext<'_>) -> Result<()> + Send + Sync>;

/// Wrap a closure as a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&RouteContext<'_>) -> Result<()> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// What a handler sees while it runs.
pub struct RouteContext<'a> {
    path: &'a str,
    params: &'a Params,
    current: &'a CurrentRoute,
}

impl<'a> RouteContext<'a> {
    pub(crate) fn new(path: &'a str, params: &'a Params, current: &'a CurrentRoute) -> Self {
        Self {
            path,
            params,
            current,
        }
    }

    /// The normalized path being dispatched.
    pub fn path(&self) -> &str {
        self.path
    }

    pub fn params(&self) -> &Params {
        self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Make `name` the current route.
    pub fn set_route(&self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        self.current.update(|route| *route = Some(name))
    }
}

pub(crate) struct RouteEntry {
    pub(crate) pattern: PathPattern,
    pub(crate) handler: Handler,
}

/// Ordered list of routes. Lookup is first match in registration order, so
/// for a duplicated pattern the earliest registration wins.
#[derive(Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route. Fails only if `pattern` is malformed.
    pub fn register(&mut self, pattern: &str, handler: Handler) -> Result<&mut Self> {
        let pattern = PathPattern::parse(pattern)?;
        tracing::trace!(pattern = %pattern, "route registered");
        self.entries.push(RouteEntry { pattern, handler });
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered patterns, in match order.
    pub fn patterns(&self) -> impl Iterator<Item = &PathPattern> {
        self.entries.iter().map(|e| &e.pattern)
    }

    pub(crate) fn find(&self, path: &str) -> Option<(&RouteEntry, Params)> {
        self.entries
            .iter()
            .find_map(|entry| entry.pattern.matches(path).map(|params| (entry, params)))
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| e.pattern.as_str()))
            .finish()
    }
}

/// Build a [`RouteTable`] from `pattern => handler` pairs, in order.
///
/// # Example
/// ```ignore
/// use soyfr_router::{handler, routes};
///
/// let table = routes! {
///     "/" => handler(|cx| cx.set_route("index")),
///     "/user/:username" => handler(|cx| cx.set_route("test")),
/// }?;
/// ```
#[macro_export]
macro_rules! routes {
    ($($pattern:expr => $handler:expr),* $(,)?) => {
        (|| -> $crate::Result<$crate::RouteTable> {
            #[allow(unused_mut)]
            let mut table = $crate::RouteTable::new();
            $( table.register($pattern, $handler)?; )*
            Ok(table)
        })()
    };
}
