//! Terminal host for the dispatcher.
//!
//! Renders the page for the current route, feeds key presses to it and turns
//! the page's actions into navigation events. The dispatcher's current-route
//! subscription drives re-rendering.

use std::io::{self, stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event as CrosstermEvent, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use soyfr_router::presets::{INDEX, LOGIN, PROFILE, REGISTER, USERS};
use soyfr_router::{Dispatcher, Entity, History, MemoryHistory, NavEvent};
use tokio::time::Instant;

use crate::component::{Action, Component, Context, Event};
use crate::model::Session;
use crate::pages::{IndexPage, LoginPage, NotFoundPage, ProfilePage, RegisterPage, UsersPage};

struct Pages {
    index: IndexPage,
    login: LoginPage,
    register: RegisterPage,
    users: UsersPage,
    profile: ProfilePage,
    not_found: NotFoundPage,
}

impl Pages {
    fn new(session: Entity<Session>) -> Self {
        Self {
            index: IndexPage,
            login: LoginPage::new(session.clone()),
            register: RegisterPage::new(session.clone()),
            users: UsersPage::new(session),
            profile: ProfilePage,
            not_found: NotFoundPage,
        }
    }

    /// The page for a route name. Unknown names get the not-found page.
    fn for_route(&mut self, route: &str) -> &mut dyn Component {
        match route {
            INDEX => &mut self.index,
            LOGIN => &mut self.login,
            REGISTER => &mut self.register,
            USERS => &mut self.users,
            PROFILE => &mut self.profile,
            _ => &mut self.not_found,
        }
    }
}

/// Outcome of one input event.
enum Flow {
    Continue,
    Quit,
}

pub struct Application {
    dispatcher: Dispatcher<MemoryHistory>,
    pages: Pages,
    transition: Duration,
    transition_until: Option<Instant>,
    /// Text typed into the `:` address bar, if open.
    address: Option<String>,
}

impl Application {
    pub fn new(dispatcher: Dispatcher<MemoryHistory>, transition: Duration) -> Self {
        Self {
            dispatcher,
            pages: Pages::new(Entity::new(Session::default())),
            transition,
            transition_until: None,
            address: None,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, event::EnableBracketedPaste)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            event::DisableBracketedPaste
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut route_rx = self.dispatcher.subscribe();
        self.dispatcher.start()?;
        let mut last_route = None;
        self.enter_current(&mut last_route)?;

        loop {
            terminal.draw(|frame| self.render(frame))?;

            let transition_deadline = self.transition_until;
            tokio::select! {
                changed = route_rx.changed() => {
                    if changed.is_err() {
                        return Ok(());
                    }
                    self.enter_current(&mut last_route)?;
                }
                _ = async {
                    match transition_deadline {
                        Some(deadline) => tokio::time::sleep_until(deadline).await,
                        None => std::future::pending::<()>().await,
                    }
                } => {
                    self.transition_until = None;
                }
                event_ready = async { event::poll(Duration::from_millis(100)) } => {
                    if let Ok(true) = event_ready {
                        if let Flow::Quit = self.on_terminal_event(event::read()?)? {
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    /// Run page entry hooks and start the transition when the route changed.
    fn enter_current(&mut self, last_route: &mut Option<String>) -> anyhow::Result<()> {
        let current = self.dispatcher.current()?;
        if current != *last_route {
            if let Some(route) = &current {
                tracing::info!(route = %route, location = %self.dispatcher.history().location(), "view changed");
                self.pages.for_route(route).on_enter();
                self.transition_until = Some(Instant::now() + self.transition);
            }
        }
        *last_route = current;
        Ok(())
    }

    fn on_terminal_event(&mut self, event: CrosstermEvent) -> anyhow::Result<Flow> {
        let event = match event {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
            CrosstermEvent::Paste(text) => Event::Paste(text),
            _ => return Ok(Flow::Continue),
        };

        if self.address.is_some() {
            return self.on_address_event(event);
        }
        if let Event::Key(key) = &event {
            if key.code == KeyCode::Char(':') {
                self.address = Some(String::new());
                return Ok(Flow::Continue);
            }
        }

        let action = match self.dispatcher.current()? {
            Some(route) => self.pages.for_route(&route).handle_event(event),
            None => match event {
                Event::Key(key) if key.code == KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
        };
        self.apply(action)
    }

    fn on_address_event(&mut self, event: Event) -> anyhow::Result<Flow> {
        let Some(address) = self.address.as_mut() else {
            return Ok(Flow::Continue);
        };
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Enter => {
                    let path = std::mem::take(address);
                    self.address = None;
                    let action = NavEvent::from_parts(NavEvent::CHANGE_ROUTE, Some(path.trim()))
                        .map(Action::Emit);
                    return self.apply(action);
                }
                KeyCode::Esc => self.address = None,
                KeyCode::Backspace => {
                    address.pop();
                }
                KeyCode::Char(c) => address.push(c),
                _ => {}
            },
            Event::Paste(text) => address.push_str(&text),
        }
        Ok(Flow::Continue)
    }

    fn apply(&mut self, action: Option<Action>) -> anyhow::Result<Flow> {
        match action {
            Some(Action::Emit(nav)) => {
                self.dispatcher.handle(nav)?;
                self.dispatcher.sync_history()?;
                Ok(Flow::Continue)
            }
            Some(Action::Quit) => Ok(Flow::Quit),
            None => Ok(Flow::Continue),
        }
    }

    /// The route to draw. A failed read is logged and drawn as loading.
    fn visible_route(&self) -> Option<String> {
        match self.dispatcher.current() {
            Ok(route) => route,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read current route");
                None
            }
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        let location = self.dispatcher.history().location();
        let route = self.visible_route();
        let cx = Context {
            area: chunks[0],
            location: &location,
            transitioning: self.transition_until.is_some(),
        };

        match &route {
            Some(route) => self.pages.for_route(route).render(frame, &cx),
            None => frame.render_widget(Paragraph::new("Loading…"), chunks[0]),
        }

        let footer = match &self.address {
            Some(address) => format!(" :{}_", address),
            None => format!(
                " {} │ route {} │ transition {:?} │ : go to path │ q quit ",
                location,
                route.as_deref().unwrap_or("-"),
                self.transition,
            ),
        };
        let footer = Paragraph::new(footer).style(Style::default().bg(Color::Cyan).fg(Color::Black));
        frame.render_widget(footer, chunks[1]);
    }
}
