pub mod index;
pub mod login;
pub mod not_found;
pub mod profile;
pub mod register;
pub mod users;

pub use index::IndexPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use profile::ProfilePage;
pub use register::RegisterPage;
pub use users::UsersPage;

use crossterm::event::KeyCode;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use crate::component::Event;

/// Page frame; the border is highlighted while a transition runs.
pub(crate) fn page_block(title: &str, transitioning: bool) -> Block<'_> {
    let color = if transitioning { Color::Yellow } else { Color::Cyan };
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
}

/// Single-line text field.
#[derive(Debug, Default)]
pub(crate) struct TextInput {
    value: String,
}

impl TextInput {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Apply an editing event. Returns true if it was consumed.
    pub fn handle(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Char(c) if !c.is_control() => {
                    self.value.push(c);
                    true
                }
                KeyCode::Backspace => {
                    self.value.pop();
                    true
                }
                _ => false,
            },
            Event::Paste(text) => {
                self.value.extend(text.chars().filter(|c| !c.is_control()));
                true
            }
        }
    }
}

#[cfg(test)]
pub(crate) fn key(code: KeyCode) -> Event {
    Event::Key(crossterm::event::KeyEvent::new(
        code,
        crossterm::event::KeyModifiers::NONE,
    ))
}
