//! Navigation requests raised by pages.

/// A request for the dispatcher, as raised by a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// `change-route`: navigate to the carried path.
    ChangeRoute(String),
    /// `change-route-back`: return to the previous history entry.
    ChangeRouteBack,
}

impl NavEvent {
    pub const CHANGE_ROUTE: &'static str = "change-route";
    pub const CHANGE_ROUTE_BACK: &'static str = "change-route-back";

    /// Build an event from a host event name and optional detail payload.
    ///
    /// Unknown names yield `None`, as does `change-route` without a
    /// non-empty detail.
    pub fn from_parts(name: &str, detail: Option<&str>) -> Option<Self> {
        match name {
            Self::CHANGE_ROUTE => detail
                .filter(|d| !d.is_empty())
                .map(|d| NavEvent::ChangeRoute(d.to_string())),
            Self::CHANGE_ROUTE_BACK => Some(NavEvent::ChangeRouteBack),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NavEvent::ChangeRoute(_) => Self::CHANGE_ROUTE,
            NavEvent::ChangeRouteBack => Self::CHANGE_ROUTE_BACK,
        }
    }
}
