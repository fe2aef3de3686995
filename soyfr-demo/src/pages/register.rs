use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::widgets::{Block, Borders, Paragraph};
use soyfr_router::Entity;

use super::{page_block, TextInput};
use crate::component::{Action, Component, Context, Event};
use crate::model::Session;

/// Adds a username to the list, then sends the user to sign in.
pub struct RegisterPage {
    session: Entity<Session>,
    input: TextInput,
    notice: Option<String>,
}

impl RegisterPage {
    pub fn new(session: Entity<Session>) -> Self {
        Self {
            session,
            input: TextInput::default(),
            notice: None,
        }
    }
}

impl Component for RegisterPage {
    fn on_enter(&mut self) {
        self.input.clear();
        self.notice = None;
    }

    fn render(&mut self, frame: &mut ratatui::Frame, cx: &Context<'_>) {
        let block = page_block("Register", cx.transitioning);
        let inner = block.inner(cx.area);
        frame.render_widget(block, cx.area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let field = Paragraph::new(format!("{}_", self.input.value()))
            .block(Block::default().title("Choose a username").borders(Borders::ALL));
        frame.render_widget(field, chunks[0]);

        if let Some(notice) = &self.notice {
            frame.render_widget(Paragraph::new(notice.as_str()), chunks[1]);
        }

        let help = Paragraph::new("Enter register │ Tab sign in │ Esc back");
        frame.render_widget(help, chunks[2]);
    }

    fn handle_event(&mut self, event: Event) -> Option<Action> {
        if let Event::Key(key) = &event {
            match key.code {
                KeyCode::Enter => {
                    let name = self.input.value().trim().to_string();
                    if name.is_empty() {
                        return None;
                    }
                    return match self.session.update(|s| s.add_user(&name)) {
                        Ok(true) => Some(Action::change_route("/login")),
                        Ok(false) => {
                            self.notice = Some(format!("'{}' is already taken", name));
                            None
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "failed to register user");
                            None
                        }
                    };
                }
                KeyCode::Tab => return Some(Action::change_route("/login")),
                KeyCode::Esc => return Some(Action::back()),
                _ => {}
            }
        }
        self.input.handle(&event);
        None
    }
}
