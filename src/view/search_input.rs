//! Search query box widget.

use crate::state::QueryInput;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Search query box.
///
/// While editing it shows the query with a block cursor; otherwise it shows
/// the query that produced the current results.
pub struct SearchInput<'a> {
    input: &'a QueryInput,
    current: &'a str,
}

impl<'a> SearchInput<'a> {
    /// Widget for `input`, falling back to the submitted `current` query.
    pub fn new(input: &'a QueryInput, current: &'a str) -> Self {
        Self { input, current }
    }
}

impl Widget for SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.input {
            QueryInput::Typing { query, cursor } => {
                let before: String = query.chars().take(*cursor).collect();
                let mut after = query.chars().skip(*cursor);
                let cursor_char = after.next().map(String::from).unwrap_or_else(|| " ".to_string());
                let rest: String = after.collect();

                let line = Line::from(vec![
                    Span::raw(before),
                    Span::styled(
                        cursor_char,
                        Style::default()
                            .bg(Color::White)
                            .fg(Color::Black)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(rest),
                ]);
                Paragraph::new(line)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title("Search (Enter to run, Esc to cancel)")
                            .style(Style::default().bg(Color::DarkGray)),
                    )
                    .render(area, buf);
            }
            QueryInput::Inactive => {
                let text = if self.current.is_empty() {
                    Line::styled("all users", super::styles::MUTED_TEXT)
                } else {
                    Line::from(self.current)
                };
                Paragraph::new(text)
                    .block(Block::default().borders(Borders::ALL).title("Search (/ to edit)"))
                    .render(area, buf);
            }
        }
    }
}
