//! Frame coalescing for high-frequency scroll events.
//!
//! Raw scroll events only raise a pending flag. The next frame reads the
//! current viewport offset once and writes it, so the write rate is bounded
//! by the frame rate no matter how many events arrived.

use super::NavigationCache;
use crate::model::{PageKey, TabKey};
use tracing::trace;

/// Pending-flag scheduler: at most one flush per frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameCoalescer {
    pending: bool,
}

impl FrameCoalescer {
    /// New coalescer with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event. Returns `true` only for the event that scheduled the flush.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Run at frame time. Returns `true` if a flush was scheduled, clearing it.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Whether a flush is scheduled for the next frame.
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Where scroll offsets of the mounted page are recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollTarget {
    /// Logical page key.
    pub page: PageKey,
    /// Active tab of the page.
    pub tab: TabKey,
    /// Route path, for the page-level entry.
    pub path: PageKey,
}

/// Saves the viewport offset of the mounted page, coalesced per frame.
///
/// Each flush writes both the tab-specific and the page-level entry.
#[derive(Debug, Clone, Default)]
pub struct ScrollTracker {
    coalescer: FrameCoalescer,
    writes: u64,
}

impl ScrollTracker {
    /// New tracker with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one raw scroll event.
    pub fn on_scroll(&mut self) {
        self.coalescer.request();
    }

    /// Flush at frame time. Returns `true` if the cache was written.
    pub fn on_frame<T>(
        &mut self,
        cache: &mut NavigationCache<T>,
        target: &ScrollTarget,
        offset: u32,
    ) -> bool {
        if !self.coalescer.take() {
            return false;
        }
        cache.save_scroll_position(&target.page, &target.tab, offset);
        cache.save_page_scroll_position(&target.path, offset);
        self.writes += 1;
        trace!(page = %target.page, tab = %target.tab, offset, "Saved scroll position");
        true
    }

    /// Drop a scheduled flush without writing.
    ///
    /// Used when the caller has just written the offset directly.
    pub fn cancel(&mut self) {
        self.coalescer.take();
    }

    /// Number of cache writes performed so far.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Whether a flush is scheduled for the next frame.
    pub fn is_pending(&self) -> bool {
        self.coalescer.is_pending()
    }
}
