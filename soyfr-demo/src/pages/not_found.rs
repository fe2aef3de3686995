use crossterm::event::KeyCode;
use ratatui::layout::Alignment;
use ratatui::widgets::Paragraph;

use super::page_block;
use crate::component::{Action, Component, Context, Event};

/// Shown when the configured not-found route becomes current.
#[derive(Default)]
pub struct NotFoundPage;

impl Component for NotFoundPage {
    fn render(&mut self, frame: &mut ratatui::Frame, cx: &Context<'_>) {
        let text = format!("\nNothing lives at {}\n\n[h] Home    [Esc] Back", cx.location);
        let body = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(page_block("Not found", cx.transitioning));
        frame.render_widget(body, cx.area);
    }

    fn handle_event(&mut self, event: Event) -> Option<Action> {
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Char('h') => Some(Action::change_route("/")),
                KeyCode::Esc => Some(Action::back()),
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }
}
