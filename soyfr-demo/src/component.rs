//! Page components and the actions they hand back to the host.

use ratatui::layout::Rect;
use soyfr_router::NavEvent;

/// Input delivered to a page.
#[derive(Debug, Clone)]
pub enum Event {
    Key(crossterm::event::KeyEvent),
    Paste(String),
}

/// What a page wants the host to do after handling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Raise a navigation event on the dispatcher.
    Emit(NavEvent),
    Quit,
}

impl Action {
    pub fn change_route(path: impl Into<String>) -> Self {
        Action::Emit(NavEvent::ChangeRoute(path.into()))
    }

    pub fn back() -> Self {
        Action::Emit(NavEvent::ChangeRouteBack)
    }
}

/// Render-time information passed to pages.
pub struct Context<'a> {
    pub area: Rect,
    /// Active history location.
    pub location: &'a str,
    /// True while the page transition is running.
    pub transitioning: bool,
}

pub trait Component {
    /// Called each time the page becomes the current route.
    fn on_enter(&mut self) {}

    fn render(&mut self, frame: &mut ratatui::Frame, cx: &Context<'_>);

    fn handle_event(&mut self, event: Event) -> Option<Action> {
        let _ = event;
        None
    }
}
