//! Feed pane rendering.
//!
//! Each item takes [`ROWS_PER_ITEM`] rows: a header, a body line and a blank
//! separator. Only the items intersecting the viewport are turned into lines.

use super::styles::FeedStyles;
use crate::model::{time_ago, Comment, FeedItem, Notification, Post, UserSummary};
use crate::nav_cache::Viewport;
use crate::pages::LoadStatus;
use crate::state::viewport::{ListViewport, ROWS_PER_ITEM};
use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `text` to at most `width` terminal columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

fn post_lines(post: &Post, now: DateTime<Utc>, styles: &FeedStyles) -> [Line<'static>; 2] {
    let header = Line::from(vec![
        Span::styled(post.name.clone(), styles.author),
        Span::raw(" "),
        Span::styled(format!("@{}", post.username), styles.handle),
        Span::styled(format!(" · {}", time_ago(post.created_at, now)), styles.meta),
    ]);
    let mut body = post.content.replace('\n', " ");
    if post.has_images() {
        body.push_str(&format!(" [{} img]", post.image_urls.len()));
    }
    body.push_str(&format!("  ♥{} ↩{}", post.likes, post.replies));
    [header, Line::from(body)]
}

fn notification_lines(
    n: &Notification,
    now: DateTime<Utc>,
    styles: &FeedStyles,
) -> [Line<'static>; 2] {
    let header = Line::from(vec![
        Span::styled(format!("@{}", n.username), styles.handle),
        Span::styled(format!(" · {}", time_ago(n.created_at, now)), styles.meta),
    ]);
    [header, Line::styled(n.message(), styles.notification)]
}

fn comment_lines(c: &Comment, now: DateTime<Utc>, styles: &FeedStyles) -> [Line<'static>; 2] {
    let indent = if c.is_reply() { "  ↳ " } else { "" };
    let header = Line::from(vec![
        Span::raw(indent),
        Span::styled(format!("@{}", c.username), styles.handle),
        Span::styled(format!(" · {}", time_ago(c.created_at, now)), styles.meta),
    ]);
    let body = format!(
        "{}{}  ♥{}",
        if c.is_reply() { "    " } else { "" },
        c.content.replace('\n', " "),
        c.likes
    );
    [header, Line::from(body)]
}

fn user_lines(user: &UserSummary, styles: &FeedStyles) -> [Line<'static>; 2] {
    let mut header = vec![
        Span::styled(user.name.clone(), styles.author),
        Span::raw(" "),
        Span::styled(format!("@{}", user.username), styles.handle),
    ];
    if user.is_following {
        header.push(Span::styled(" · following", styles.meta));
    }
    [Line::from(header), Line::from(user.bio.clone())]
}

fn clip(line: Line<'static>, width: usize) -> Line<'static> {
    if line.width() <= width {
        return line;
    }
    let style = line.spans.first().map(|s| s.style).unwrap_or_default();
    let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
    Line::styled(truncate_to_width(&text, width), style)
}

/// Lines for the rows `viewport.offset() .. offset + height`.
pub fn visible_lines(
    items: &[FeedItem],
    viewport: &ListViewport,
    width: u16,
    now: DateTime<Utc>,
    styles: &FeedStyles,
) -> Vec<Line<'static>> {
    let rows = ROWS_PER_ITEM as usize;
    let offset = viewport.offset() as usize;
    let height = viewport.height() as usize;
    let selected = viewport.top_item();
    let first = offset / rows;
    let skip = offset % rows;

    items
        .iter()
        .enumerate()
        .skip(first)
        .take(height / rows + 2)
        .flat_map(|(index, item)| {
            let [mut header, body] = match item {
                FeedItem::Post(p) => post_lines(p, now, styles),
                FeedItem::Notification(n) => notification_lines(n, now, styles),
                FeedItem::User(u) => user_lines(u, styles),
                FeedItem::Comment(c) => comment_lines(c, now, styles),
            };
            if index == selected {
                header = header.patch_style(styles.selected);
            }
            [
                clip(header, width as usize),
                clip(body, width as usize),
                Line::default(),
            ]
        })
        .skip(skip)
        .take(height)
        .collect()
}

/// Render the feed pane, or a placeholder when the list is empty.
pub fn render_feed(
    frame: &mut Frame,
    area: Rect,
    items: &[FeedItem],
    status: LoadStatus,
    viewport: &ListViewport,
    now: DateTime<Utc>,
    styles: &FeedStyles,
) {
    if items.is_empty() {
        let placeholder = match status {
            LoadStatus::Failed => {
                Line::styled("Could not load this page. Press r to retry.", styles.error)
            }
            _ => Line::styled("Nothing here yet.", styles.meta),
        };
        frame.render_widget(Paragraph::new(placeholder), area);
        return;
    }

    let lines = visible_lines(items, viewport, area.width, now, styles);
    frame.render_widget(Paragraph::new(lines), area);
}
