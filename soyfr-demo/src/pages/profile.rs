use crossterm::event::KeyCode;
use ratatui::layout::Alignment;
use ratatui::widgets::Paragraph;

use super::page_block;
use crate::component::{Action, Component, Context, Event};

/// Placeholder profile view for `/user/:username`.
#[derive(Default)]
pub struct ProfilePage;

impl Component for ProfilePage {
    fn render(&mut self, frame: &mut ratatui::Frame, cx: &Context<'_>) {
        let body = Paragraph::new("\nNo profile details yet.\n\n[u] Users    [Esc] Back")
            .alignment(Alignment::Center)
            .block(page_block("Profile", cx.transitioning));
        frame.render_widget(body, cx.area);
    }

    fn handle_event(&mut self, event: Event) -> Option<Action> {
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Char('u') => Some(Action::change_route("/user")),
                KeyCode::Esc => Some(Action::back()),
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }
}
