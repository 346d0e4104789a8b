//! Help overlay widget displaying keyboard shortcuts.
//!
//! Shows a centered modal overlay with the shortcuts grouped by category.
//! Toggled by '?', dismissed by 'Esc' or '?'.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::styles::{MUTED_TEXT, SECTION_HEADER};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Shortcut groups shown in the overlay.
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Scrolling",
        &[
            ("j/↓ k/↑", "Scroll down / up one item"),
            ("PgDn PgUp", "Scroll one screen"),
            ("g G", "Jump to top / bottom"),
        ],
    ),
    (
        "Tabs",
        &[("Tab ]", "Next tab"), ("Shift+Tab [", "Previous tab")],
    ),
    (
        "Pages",
        &[
            ("1 2 3", "Home / Notifications / Search"),
            ("p", "Your profile"),
            ("Enter", "Open the selected author's profile"),
            ("o", "Open the selected post and its comments"),
            ("Esc Backspace", "Back"),
            ("/", "Edit search query"),
            ("r", "Refresh the current tab"),
            ("f", "Follow / unfollow this profile"),
        ],
    ),
    ("Application", &[("?", "Toggle this help"), ("q Ctrl+C", "Quit")]),
];

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();
    let popup_area = centered_rect(HELP_POPUP_WIDTH_PERCENT, HELP_POPUP_HEIGHT_PERCENT, area);

    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content())
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: 1,
    };
    let hint = Paragraph::new(Line::from(vec![Span::styled(
        " Press Esc or ? to close ",
        MUTED_TEXT.add_modifier(Modifier::DIM),
    )]))
    .alignment(Alignment::Center);

    frame.render_widget(hint, hint_area);
}

/// Rect with the given percentage of `area`, centered in it.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

fn build_help_content() -> Vec<Line<'static>> {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(Color::White);

    let mut lines = Vec::new();
    for (index, (title, keys)) in SECTIONS.iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::styled(*title, SECTION_HEADER));
        for (key, desc) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<14}"), key_style),
                Span::styled(*desc, desc_style),
            ]));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::buffer_to_string;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn centered_rect_is_centered() {
        let rect = centered_rect(50, 50, Rect::new(0, 0, 100, 40));
        assert_eq!(rect, Rect::new(25, 10, 50, 20));
    }

    #[test]
    fn help_content_lists_every_section() {
        let text: String = build_help_content()
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        for (title, _) in SECTIONS {
            assert!(text.contains(title), "missing section {title}");
        }
    }

    #[test]
    fn overlay_renders_title_and_hint() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| render_help_overlay(frame)).unwrap();
        let text = buffer_to_string(terminal.backend().buffer());
        assert!(text.contains("Keyboard Shortcuts"));
        assert!(text.contains("Press Esc or ? to close"));
    }
}
