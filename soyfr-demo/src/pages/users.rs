use crossterm::event::KeyCode;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem};
use soyfr_router::Entity;

use super::page_block;
use crate::component::{Action, Component, Context, Event};
use crate::model::Session;

pub struct UsersPage {
    session: Entity<Session>,
    selected: usize,
}

impl UsersPage {
    pub fn new(session: Entity<Session>) -> Self {
        Self {
            session,
            selected: 0,
        }
    }

    fn users(&self) -> Vec<String> {
        self.session.read(|s| s.users.clone()).unwrap_or_default()
    }
}

impl Component for UsersPage {
    fn on_enter(&mut self) {
        self.selected = self.selected.min(self.users().len().saturating_sub(1));
    }

    fn render(&mut self, frame: &mut ratatui::Frame, cx: &Context<'_>) {
        let signed_in = self.session.read(|s| s.username.clone()).ok().flatten();

        let items: Vec<ListItem> = self
            .users()
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let is_selected = i == self.selected;
                let marker = if signed_in.as_deref() == Some(name.as_str()) { " (you)" } else { "" };
                let style = if is_selected {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(if is_selected { "▶ " } else { "  " }, style),
                    Span::styled(name, style),
                    Span::styled(marker, Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();

        let list = List::new(items).block(page_block("Users", cx.transitioning));
        frame.render_widget(list, cx.area);
    }

    fn handle_event(&mut self, event: Event) -> Option<Action> {
        let Event::Key(key) = event else {
            return None;
        };
        let count = self.users().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = if self.selected == 0 { count.saturating_sub(1) } else { self.selected - 1 };
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = if self.selected + 1 >= count { 0 } else { self.selected + 1 };
                None
            }
            KeyCode::Enter => self
                .users()
                .get(self.selected)
                .map(|name| Action::change_route(format!("/user/{}", urlencoding::encode(name)))),
            KeyCode::Char('l') => Some(Action::change_route("/login")),
            KeyCode::Esc => Some(Action::back()),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        }
    }
}
