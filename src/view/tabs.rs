//! Page tab bar widget.
//!
//! Displays the tabs of the mounted page using ratatui's Tabs widget.

use crate::model::TabKey;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

/// Human label for a tab.
pub fn tab_label(tab: &TabKey) -> String {
    let raw = tab.as_str();
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render the tab bar with `selected` highlighted.
///
/// An out-of-bounds `selected` renders without a highlight.
pub fn render_tab_bar(frame: &mut Frame, area: Rect, tabs: &[TabKey], selected: usize) {
    let titles: Vec<Line> = tabs.iter().map(|t| Line::from(tab_label(t))).collect();

    let mut widget = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::White));

    if selected < tabs.len() {
        widget = widget
            .highlight_style(Style::default().fg(Color::Yellow))
            .select(selected);
    }

    frame.render_widget(widget, area);
}
