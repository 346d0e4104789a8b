//! Screen layout.
//!
//! The screen is a vertical stack: header, optional tab bar, optional search
//! box or profile header, the feed, and a status bar. [`split_areas`] is the
//! single source of these rectangles so the feed height fed to the viewport
//! matches what is drawn.

use super::constants::{
    HEADER_HEIGHT, PROFILE_HEADER_HEIGHT, SEARCH_INPUT_HEIGHT, STATUS_BAR_HEIGHT, TAB_BAR_HEIGHT,
};
use super::feed::render_feed;
use super::help::render_help_overlay;
use super::search_input::SearchInput;
use super::styles::{FeedStyles, MUTED_TEXT};
use super::tabs::{render_tab_bar, tab_label};
use crate::model::Profile;
use crate::nav_cache::Viewport;
use crate::pages::{LoadStatus, Route};
use crate::state::AppState;
use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Rectangles of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    /// Title line.
    pub header: Rect,
    /// Tab bar, on pages with more than one tab.
    pub tabs: Option<Rect>,
    /// Search box, on the search page.
    pub search: Option<Rect>,
    /// Profile summary, on profile pages whose profile loaded.
    pub profile: Option<Rect>,
    /// Scrolling list.
    pub feed: Rect,
    /// Bottom status line.
    pub status: Rect,
}

/// Split `area` for the current state.
pub fn split_areas(area: Rect, state: &AppState) -> Areas {
    let page = state.page();
    let has_tabs = page.tabs().len() > 1;
    let has_search = *page.route() == Route::Search;
    let has_profile = page.profile().is_some();

    let mut constraints = vec![Constraint::Length(HEADER_HEIGHT)];
    if has_tabs {
        constraints.push(Constraint::Length(TAB_BAR_HEIGHT));
    }
    if has_search {
        constraints.push(Constraint::Length(SEARCH_INPUT_HEIGHT));
    }
    if has_profile {
        constraints.push(Constraint::Length(PROFILE_HEADER_HEIGHT));
    }
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(STATUS_BAR_HEIGHT));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut next = 1;
    let mut take = |present: bool| {
        present.then(|| {
            let rect = chunks[next];
            next += 1;
            rect
        })
    };
    let tabs = take(has_tabs);
    let search = take(has_search);
    let profile = take(has_profile);

    Areas {
        header: chunks[0],
        tabs,
        search,
        profile,
        feed: chunks[chunks.len() - 2],
        status: chunks[chunks.len() - 1],
    }
}

/// Render the whole screen.
pub fn render_layout(frame: &mut Frame, state: &AppState, now: DateTime<Utc>, styles: &FeedStyles) {
    let areas = split_areas(frame.area(), state);
    let page = state.page();

    render_header(frame, areas.header, state);

    if let Some(area) = areas.tabs {
        render_tab_bar(frame, area, page.tabs(), page.active_index());
    }
    if let Some(area) = areas.search {
        frame.render_widget(SearchInput::new(&state.query_input, page.search_query()), area);
    }
    if let (Some(area), Some(profile)) = (areas.profile, page.profile()) {
        render_profile_header(frame, area, profile);
    }

    render_feed(
        frame,
        areas.feed,
        page.items(),
        page.status(),
        state.viewport(),
        now,
        styles,
    );
    render_status_bar(frame, areas.status, state);

    if state.help_visible {
        render_help_overlay(frame);
    }
}

/// Render the header: app name, page title and the session user.
fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let who = match state.session() {
        Some(user) => format!("@{user}"),
        None => "anonymous".to_string(),
    };
    let line = Line::from(vec![
        Span::styled(
            " feedview ",
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::styled(
            format!(" {} ", state.page().route().title()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {who}"), MUTED_TEXT),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_profile_header(frame: &mut Frame, area: Rect, profile: &Profile) {
    let mut counts = format!(
        "{} followers · {} following",
        profile.followers, profile.following
    );
    if profile.is_following {
        counts.push_str(" · you follow");
    }
    let lines = vec![
        Line::from(vec![
            Span::styled(profile.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!(" @{}", profile.username), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(profile.bio.clone()),
        Line::styled(counts, MUTED_TEXT),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// Status line text for the current state.
fn status_text(state: &AppState) -> String {
    let page = state.page();
    let source = match page.status() {
        LoadStatus::FromCache => "cached",
        LoadStatus::Fetched => "fetched",
        LoadStatus::Failed => "load failed",
    };
    let viewport = state.viewport();
    let mut text = format!(
        " {} · {} · {} · row {}/{}",
        page.route(),
        tab_label(page.active_tab()),
        source,
        viewport.offset(),
        viewport.max_offset()
    );
    if page.has_more() {
        text.push_str(" · more");
    }
    text.push_str("  ? help  q quit");
    text
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let style = if state.page().status() == LoadStatus::Failed {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Gray)
    };
    frame.render_widget(Paragraph::new(status_text(state)).style(style), area);
}

// ===== Tests =====

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
