//! Scroll position of the feed pane.

use crate::nav_cache::{Viewport, ViewportError};

/// Terminal rows each list item occupies.
pub const ROWS_PER_ITEM: u32 = 3;

/// Row-based viewport over the rendered list.
///
/// Offsets are clamped to the content, as a browser clamps `scrollTo` on a
/// page that is shorter than the requested offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListViewport {
    offset: u32,
    content_height: u32,
    height: u32,
}

impl ListViewport {
    /// Viewport `height` rows tall over empty content.
    pub fn new(height: u32) -> Self {
        Self {
            offset: 0,
            content_height: 0,
            height,
        }
    }

    /// Largest reachable offset.
    pub fn max_offset(&self) -> u32 {
        self.content_height.saturating_sub(self.height)
    }

    /// Visible rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total rows of content.
    pub fn content_height(&self) -> u32 {
        self.content_height
    }

    /// Resize the visible area, re-clamping the offset.
    pub fn set_height(&mut self, height: u32) {
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Content changed to `items` rows' worth, re-clamping the offset.
    pub fn set_items(&mut self, items: usize) {
        let items = u32::try_from(items).unwrap_or(u32::MAX);
        self.content_height = items.saturating_mul(ROWS_PER_ITEM);
        self.offset = self.offset.min(self.max_offset());
    }

    /// Back to the first row.
    pub fn reset_offset(&mut self) {
        self.offset = 0;
    }

    /// Move by `delta` rows. Returns `true` if the offset changed.
    pub fn scroll_by(&mut self, delta: i64) -> bool {
        let target = (i64::from(self.offset) + delta).clamp(0, i64::from(self.max_offset()));
        let target = u32::try_from(target).unwrap_or(0);
        let changed = target != self.offset;
        self.offset = target;
        changed
    }

    /// Whether the last row of content is on screen.
    pub fn bottom_visible(&self) -> bool {
        self.offset + self.height >= self.content_height
    }

    /// Index of the item at the top of the viewport.
    pub fn top_item(&self) -> usize {
        (self.offset / ROWS_PER_ITEM) as usize
    }
}

impl Viewport for ListViewport {
    fn offset(&self) -> u32 {
        self.offset
    }

    fn scroll_to(&mut self, offset: u32) -> Result<(), ViewportError> {
        if self.height == 0 {
            return Err(ViewportError::Detached);
        }
        self.offset = offset.min(self.max_offset());
        Ok(())
    }
}
