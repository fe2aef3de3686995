use crossterm::event::KeyCode;
use ratatui::layout::Alignment;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use super::page_block;
use crate::component::{Action, Component, Context, Event};

#[derive(Default)]
pub struct IndexPage;

impl Component for IndexPage {
    fn render(&mut self, frame: &mut ratatui::Frame, cx: &Context<'_>) {
        let lines = vec![
            Line::from(""),
            Line::styled("soyfr", Style::default().fg(Color::Cyan)),
            Line::from(""),
            Line::from("[l] Sign in    [r] Register    [u] Users"),
        ];
        let body = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(page_block("Welcome", cx.transitioning));
        frame.render_widget(body, cx.area);
    }

    fn handle_event(&mut self, event: Event) -> Option<Action> {
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Char('l') => Some(Action::change_route("/login")),
                KeyCode::Char('r') => Some(Action::change_route("/register")),
                KeyCode::Char('u') => Some(Action::change_route("/user")),
                KeyCode::Esc => Some(Action::back()),
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }
}
