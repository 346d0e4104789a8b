//! Session-scoped navigation state cache (pure).
//!
//! Holds, per page and per tab within that page, the last fetched payload,
//! the active-tab indicator, the scroll offset and an optional search query.
//! Pages consult it on mount to skip refetching and to restore the viewport
//! when the user navigates back.
//!
//! # Lifecycle
//!
//! Entries are created lazily on the first write for a `(page, tab)` pair and
//! are never evicted. A read miss creates nothing. The whole cache lives as
//! long as the value that owns it; the application constructs exactly one and
//! lends it to pages by `&mut`.
//!
//! There is no staleness policy: present, non-empty data is always served.

pub mod coalesce;
pub mod restore;

pub use coalesce::{FrameCoalescer, ScrollTarget, ScrollTracker};
pub use restore::{MountId, RestoreScheduler, RestoreTrigger, Viewport, ViewportError};

use crate::model::{PageKey, TabKey};
use std::collections::HashMap;

/// Payloads that can tell whether they hold anything worth rendering.
///
/// Only non-empty payloads count as a cache hit.
pub trait CachePayload {
    /// True when there is nothing to render.
    fn is_empty_payload(&self) -> bool;
}

impl<T> CachePayload for Vec<T> {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

/// Cached view state of one tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabState<T> {
    /// Which tab of the page was selected when this state was last written.
    pub active_tab: String,
    /// Scroll offset in rows.
    pub scroll_position: u32,
    /// Last fetched payload, if any.
    pub data: Option<T>,
    /// Query that produced `data`, for search-driven tabs.
    pub search_query: Option<String>,
}

impl<T> TabState<T> {
    /// Fresh state for a tab that has never been written.
    pub fn new(tab: &TabKey) -> Self {
        Self {
            active_tab: tab.as_str().to_string(),
            scroll_position: 0,
            data: None,
            search_query: None,
        }
    }
}

/// Partial update for a [`TabState`].
///
/// `None` fields leave the stored value untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabStatePatch<T> {
    /// Replacement payload.
    pub data: Option<T>,
    /// Replacement active-tab indicator.
    pub active_tab: Option<String>,
    /// Replacement scroll offset.
    pub scroll_position: Option<u32>,
    /// Replacement search query.
    pub search_query: Option<String>,
}

impl<T> Default for TabStatePatch<T> {
    fn default() -> Self {
        Self {
            data: None,
            active_tab: None,
            scroll_position: None,
            search_query: None,
        }
    }
}

impl<T> TabStatePatch<T> {
    /// Empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the payload.
    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    /// Set the active-tab indicator.
    pub fn with_active_tab(mut self, tab: &TabKey) -> Self {
        self.active_tab = Some(tab.as_str().to_string());
        self
    }

    /// Set the scroll offset.
    pub fn with_scroll_position(mut self, position: u32) -> Self {
        self.scroll_position = Some(position);
        self
    }

    /// Set the search query.
    pub fn with_search_query(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    /// Shallow-merge into `state`.
    pub fn apply(self, state: &mut TabState<T>) {
        if let Some(data) = self.data {
            state.data = Some(data);
        }
        if let Some(active_tab) = self.active_tab {
            state.active_tab = active_tab;
        }
        if let Some(position) = self.scroll_position {
            state.scroll_position = position;
        }
        if let Some(query) = self.search_query {
            state.search_query = Some(query);
        }
    }
}

/// Cached view state of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState<T> {
    /// Page-level scroll offset, used when no tab-specific offset exists.
    pub scroll_position: u32,
    /// One entry per tab ever written.
    pub tabs: HashMap<TabKey, TabState<T>>,
}

impl<T> Default for PageState<T> {
    fn default() -> Self {
        Self {
            scroll_position: 0,
            tabs: HashMap::new(),
        }
    }
}

/// The process-wide page/tab state store.
///
/// Generic over the payload so each application picks a concrete, typed list
/// instead of storing an opaque blob.
#[derive(Debug, Clone)]
pub struct NavigationCache<T> {
    pages: HashMap<PageKey, PageState<T>>,
}

impl<T> Default for NavigationCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NavigationCache<T> {
    /// Empty cache.
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
        }
    }

    /// Stored state for `(page, tab)`, or `None` if never written.
    pub fn get_tab_state(&self, page: &PageKey, tab: &TabKey) -> Option<&TabState<T>> {
        self.pages.get(page).and_then(|p| p.tabs.get(tab))
    }

    /// Stored page state, or `None` if the page was never written.
    pub fn get_page_state(&self, page: &PageKey) -> Option<&PageState<T>> {
        self.pages.get(page)
    }

    /// Merge `patch` into the state for `(page, tab)`, creating it if absent.
    pub fn set_tab_state(&mut self, page: &PageKey, tab: &TabKey, patch: TabStatePatch<T>) {
        let state = self
            .pages
            .entry(page.clone())
            .or_default()
            .tabs
            .entry(tab.clone())
            .or_insert_with(|| TabState::new(tab));
        patch.apply(state);
    }

    /// Record the tab-specific scroll offset.
    pub fn save_scroll_position(&mut self, page: &PageKey, tab: &TabKey, position: u32) {
        self.set_tab_state(page, tab, TabStatePatch::new().with_scroll_position(position));
    }

    /// Record the page-level scroll offset for a route path.
    pub fn save_page_scroll_position(&mut self, path: &PageKey, position: u32) {
        self.pages.entry(path.clone()).or_default().scroll_position = position;
    }

    /// Tab-specific offset if stored and non-zero.
    pub fn tab_scroll_position(&self, page: &PageKey, tab: &TabKey) -> Option<u32> {
        self.get_tab_state(page, tab)
            .map(|s| s.scroll_position)
            .filter(|&p| p > 0)
    }

    /// Page-level offset if stored and non-zero.
    pub fn page_scroll_position(&self, path: &PageKey) -> Option<u32> {
        self.pages
            .get(path)
            .map(|p| p.scroll_position)
            .filter(|&p| p > 0)
    }

    /// Offset to restore for a page returning to `tab`.
    ///
    /// The tab-specific value wins; the page-level value for `path` is the
    /// fallback when the tab has no offset yet.
    pub fn restore_target(&self, page: &PageKey, tab: &TabKey, path: &PageKey) -> Option<u32> {
        self.tab_scroll_position(page, tab)
            .or_else(|| self.page_scroll_position(path))
    }

    /// Drop the payload of one tab, keeping its scroll and query.
    ///
    /// Used by explicit user refresh only.
    pub fn clear_tab_data(&mut self, page: &PageKey, tab: &TabKey) -> Option<T> {
        self.pages
            .get_mut(page)
            .and_then(|p| p.tabs.get_mut(tab))
            .and_then(|s| s.data.take())
    }

    /// Number of pages with any stored state.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

impl<T: CachePayload> NavigationCache<T> {
    /// Payload for `(page, tab)` if present and non-empty.
    ///
    /// A `Some` result means the caller renders from cache and skips the fetch.
    pub fn cached_data(&self, page: &PageKey, tab: &TabKey) -> Option<&T> {
        self.get_tab_state(page, tab)
            .and_then(|s| s.data.as_ref())
            .filter(|d| !d.is_empty_payload())
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
