//! Deferred scroll restoration.
//!
//! A page that remounts asks for its previous offset back. The list it
//! renders is usually not at its final height yet, so the offset is applied
//! later: either after a fixed delay or once the page reports its content is
//! rendered. Requests belong to the mount that issued them; a request whose
//! page has unmounted is discarded when it comes due.

use super::{NavigationCache, ScrollTarget};
use crate::model::{PageKey, TabKey};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

/// The host's global scroll primitive.
pub trait Viewport {
    /// Current scroll offset in rows.
    fn offset(&self) -> u32;

    /// Move to `offset`.
    ///
    /// # Errors
    ///
    /// Implementations may fail when no view is attached.
    fn scroll_to(&mut self, offset: u32) -> Result<(), ViewportError>;
}

/// Failure of the host scroll primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewportError {
    /// No rendered view to scroll.
    #[error("Viewport is not attached to a rendered view")]
    Detached,
}

/// Identity of one page mount. Each navigation gets a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MountId(u64);

impl MountId {
    /// Id of the first mount in a session.
    pub fn first() -> Self {
        Self(1)
    }

    /// Id of the mount after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// When a scheduled restoration is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreTrigger {
    /// Fixed delay after the request.
    Delay(Duration),
    /// When the owning page reports its list has rendered.
    ContentReady,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Due {
    At(Instant),
    AwaitingContent,
    Now,
}

#[derive(Debug, Clone)]
struct PendingRestore {
    owner: MountId,
    offset: u32,
    due: Due,
}

/// One-shot restoration timers.
///
/// At most one request is pending per mount; a newer request from the same
/// mount replaces the older one.
#[derive(Debug, Clone, Default)]
pub struct RestoreScheduler {
    pending: Vec<PendingRestore>,
}

impl RestoreScheduler {
    /// Scheduler with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `offset` to be applied for `owner`.
    pub fn schedule(&mut self, owner: MountId, offset: u32, trigger: RestoreTrigger, now: Instant) {
        let due = match trigger {
            RestoreTrigger::Delay(delay) => Due::At(now + delay),
            RestoreTrigger::ContentReady => Due::AwaitingContent,
        };
        self.pending.retain(|p| p.owner != owner);
        self.pending.push(PendingRestore { owner, offset, due });
        debug!(mount = owner.get(), offset, ?trigger, "Scheduled scroll restore");
    }

    /// Schedule the tab-specific offset of `(page, tab)` if stored and non-zero.
    ///
    /// Returns the scheduled offset.
    pub fn restore_scroll_position<T>(
        &mut self,
        cache: &NavigationCache<T>,
        page: &PageKey,
        tab: &TabKey,
        owner: MountId,
        trigger: RestoreTrigger,
        now: Instant,
    ) -> Option<u32> {
        let offset = cache.tab_scroll_position(page, tab)?;
        self.schedule(owner, offset, trigger, now);
        Some(offset)
    }

    /// Schedule the page-level offset of `path` if stored and non-zero.
    pub fn restore_page_scroll_position<T>(
        &mut self,
        cache: &NavigationCache<T>,
        path: &PageKey,
        owner: MountId,
        trigger: RestoreTrigger,
        now: Instant,
    ) -> Option<u32> {
        let offset = cache.page_scroll_position(path)?;
        self.schedule(owner, offset, trigger, now);
        Some(offset)
    }

    /// Schedule the tab-specific offset, falling back to the page-level one.
    pub fn restore_with_fallback<T>(
        &mut self,
        cache: &NavigationCache<T>,
        target: &ScrollTarget,
        owner: MountId,
        trigger: RestoreTrigger,
        now: Instant,
    ) -> Option<u32> {
        self.restore_scroll_position(cache, &target.page, &target.tab, owner, trigger, now)
            .or_else(|| self.restore_page_scroll_position(cache, &target.path, owner, trigger, now))
    }

    /// Offset still waiting to be applied for `owner`.
    ///
    /// Until it fires, this is where the mounted page is meant to be, not
    /// where its viewport currently sits.
    pub fn pending_offset(&self, owner: MountId) -> Option<u32> {
        self.pending
            .iter()
            .find(|p| p.owner == owner)
            .map(|p| p.offset)
    }

    /// Drop any request owned by `owner`.
    pub fn cancel(&mut self, owner: MountId) {
        self.pending.retain(|p| p.owner != owner);
    }

    /// The page mounted as `owner` has rendered its list.
    pub fn content_ready(&mut self, owner: MountId) {
        for p in self.pending.iter_mut() {
            if p.owner == owner && p.due == Due::AwaitingContent {
                p.due = Due::Now;
            }
        }
    }

    /// Apply every request that is due at `now`.
    ///
    /// Requests not owned by `live` are discarded. Viewport failures are
    /// logged and swallowed. Returns the number of offsets applied.
    pub fn fire_due<V: Viewport + ?Sized>(
        &mut self,
        now: Instant,
        live: Option<MountId>,
        viewport: &mut V,
    ) -> usize {
        let mut applied = 0;
        let mut remaining = Vec::with_capacity(self.pending.len());

        for p in self.pending.drain(..) {
            let is_live = live == Some(p.owner);
            let is_due = match p.due {
                Due::At(at) => at <= now,
                Due::Now => true,
                Due::AwaitingContent => false,
            };

            if !is_live && (is_due || p.due == Due::AwaitingContent) {
                debug!(mount = p.owner.get(), "Discarding restore for unmounted page");
                continue;
            }
            if !is_due {
                remaining.push(p);
                continue;
            }

            match viewport.scroll_to(p.offset) {
                Ok(()) => {
                    applied += 1;
                    debug!(mount = p.owner.get(), offset = p.offset, "Restored scroll position");
                }
                Err(e) => warn!(error = %e, offset = p.offset, "Failed to restore scroll position"),
            }
        }

        self.pending = remaining;
        applied
    }

    /// Earliest timed deadline, for sizing the event-loop poll.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending
            .iter()
            .filter_map(|p| match p.due {
                Due::At(at) => Some(at),
                _ => None,
            })
            .min()
    }

    /// Number of requests not yet applied or discarded.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
