use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::widgets::{Block, Borders, Paragraph};
use soyfr_router::Entity;

use super::{page_block, TextInput};
use crate::component::{Action, Component, Context, Event};
use crate::model::Session;

/// Username entry. Submitting signs the user in and opens the user list.
pub struct LoginPage {
    session: Entity<Session>,
    input: TextInput,
}

impl LoginPage {
    pub fn new(session: Entity<Session>) -> Self {
        Self {
            session,
            input: TextInput::default(),
        }
    }
}

impl Component for LoginPage {
    fn on_enter(&mut self) {
        self.input.clear();
    }

    fn render(&mut self, frame: &mut ratatui::Frame, cx: &Context<'_>) {
        let block = page_block("Sign in", cx.transitioning);
        let inner = block.inner(cx.area);
        frame.render_widget(block, cx.area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(inner);

        let field = Paragraph::new(format!("{}_", self.input.value()))
            .block(Block::default().title("Username").borders(Borders::ALL));
        frame.render_widget(field, chunks[0]);

        let help = Paragraph::new("Enter sign in │ Tab register │ Esc back");
        frame.render_widget(help, chunks[1]);
    }

    fn handle_event(&mut self, event: Event) -> Option<Action> {
        if let Event::Key(key) = &event {
            match key.code {
                KeyCode::Enter => {
                    let name = self.input.value().trim().to_string();
                    if name.is_empty() {
                        return None;
                    }
                    if let Err(e) = self.session.update(|s| s.select_username(&name)) {
                        tracing::warn!(error = %e, "failed to record username");
                        return None;
                    }
                    return Some(Action::change_route("/user"));
                }
                KeyCode::Tab => return Some(Action::change_route("/register")),
                KeyCode::Esc => return Some(Action::back()),
                _ => {}
            }
        }
        self.input.handle(&event);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::key;

    #[test]
    fn test_login_signs_in_and_opens_users() {
        let session = Entity::new(Session::default());
        let mut page = LoginPage::new(session.clone());

        assert_eq!(page.handle_event(key(KeyCode::Enter)), None);
        for c in "dave".chars() {
            assert_eq!(page.handle_event(key(KeyCode::Char(c))), None);
        }
        assert_eq!(
            page.handle_event(key(KeyCode::Enter)),
            Some(Action::change_route("/user"))
        );
        assert_eq!(
            session.read(|s| s.username.clone()).unwrap().as_deref(),
            Some("dave")
        );
    }

    #[test]
    fn test_login_typing_q_does_not_quit() {
        let mut page = LoginPage::new(Entity::new(Session::default()));
        assert_eq!(page.handle_event(key(KeyCode::Char('q'))), None);
        assert_eq!(page.input.value(), "q");
    }
}
