//! Application state and transitions.
//!
//! AppState owns the session's single [`NavigationCache`] and lends it to the
//! mounted page. Every transition takes the current time explicitly, so the
//! whole state machine is deterministic under test.

use crate::api::FeedApi;
use crate::model::{FeedItem, FeedItems, Username};
use crate::nav_cache::{
    MountId, NavigationCache, RestoreScheduler, RestoreTrigger, ScrollTracker, Viewport,
};
use crate::pages::{Page, PageContext, Route};
use crate::state::search_input::{self, QueryInput};
use crate::state::viewport::ListViewport;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

// ===== Settings =====

/// Tunables resolved from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Items per request on paginated feeds.
    pub page_size: usize,
    /// How a remounted page's offset is restored.
    pub mount_restore: RestoreTrigger,
    /// How a re-selected tab's offset is restored.
    pub tab_restore: RestoreTrigger,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: 10,
            mount_restore: RestoreTrigger::Delay(Duration::from_millis(150)),
            tab_restore: RestoreTrigger::Delay(Duration::from_millis(50)),
        }
    }
}

// ===== AppState =====

/// Application state.
///
/// # Lifecycle
///
/// - **Mount**: the page loads from cache or API, then a restore of the
///   tab-specific (else page-level) offset is scheduled.
/// - **Scroll**: each moved row is a raw scroll event; the next
///   [`frame`](AppState::frame) writes the offset once.
/// - **Tab switch**: the current offset is written immediately, the new tab
///   loads and its own offset is scheduled.
/// - **Unmount**: the current offset is written at tab and page level.
pub struct AppState {
    cache: NavigationCache<FeedItems>,
    api: Box<dyn FeedApi>,
    session: Option<Username>,
    settings: Settings,
    page: Page,
    history: Vec<Route>,
    viewport: ListViewport,
    scroll: ScrollTracker,
    restores: RestoreScheduler,
    next_mount: MountId,
    /// Search query editor.
    pub query_input: QueryInput,
    /// Whether the help overlay is visible.
    pub help_visible: bool,
}

impl AppState {
    /// Build the application tree and mount `route`.
    ///
    /// The session user comes from the API; a failure there means anonymous.
    pub fn new(
        api: Box<dyn FeedApi>,
        settings: Settings,
        route: Route,
        viewport_height: u32,
        now: Instant,
    ) -> Self {
        let session = api.session_username().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to resolve session user, continuing anonymously");
            None
        });
        info!(user = ?session.as_ref().map(Username::as_str), "Session resolved");

        let mut cache = NavigationCache::new();
        let mount = MountId::first();
        let page = {
            let mut ctx = PageContext {
                cache: &mut cache,
                api: api.as_ref(),
                session: session.as_ref(),
                page_size: settings.page_size,
            };
            Page::mount(route, mount, &mut ctx)
        };

        let mut state = Self {
            cache,
            api,
            session,
            settings,
            page,
            history: Vec::new(),
            viewport: ListViewport::new(viewport_height),
            scroll: ScrollTracker::new(),
            restores: RestoreScheduler::new(),
            next_mount: mount.next(),
            query_input: QueryInput::Inactive,
            help_visible: false,
        };
        state.after_mount(now);
        state
    }

    fn split(&mut self) -> (&mut Page, PageContext<'_>) {
        (
            &mut self.page,
            PageContext {
                cache: &mut self.cache,
                api: self.api.as_ref(),
                session: self.session.as_ref(),
                page_size: self.settings.page_size,
            },
        )
    }

    // ===== Lifecycle =====

    fn mount(&mut self, route: Route, now: Instant) {
        let mount = self.next_mount;
        self.next_mount = mount.next();
        let page = {
            let mut ctx = PageContext {
                cache: &mut self.cache,
                api: self.api.as_ref(),
                session: self.session.as_ref(),
                page_size: self.settings.page_size,
            };
            Page::mount(route, mount, &mut ctx)
        };
        self.page = page;
        self.after_mount(now);
    }

    fn after_mount(&mut self, now: Instant) {
        self.viewport.set_items(self.page.items().len());
        self.viewport.reset_offset();
        self.scroll.cancel();
        self.query_input = QueryInput::Inactive;

        let target = self.page.scroll_target();
        let scheduled = self.restores.restore_with_fallback(
            &self.cache,
            &target,
            self.page.mount_id(),
            self.settings.mount_restore,
            now,
        );
        debug!(page = %target.page, tab = %target.tab, ?scheduled, "Mounted");
    }

    /// Write the current offset at tab and page level.
    ///
    /// A restore that has not fired yet still holds the page's real position;
    /// the viewport sits at the top until it does.
    fn save_now(&mut self) {
        let target = self.page.scroll_target();
        let offset = self
            .restores
            .pending_offset(self.page.mount_id())
            .unwrap_or_else(|| self.viewport.offset());
        self.cache
            .save_scroll_position(&target.page, &target.tab, offset);
        self.cache.save_page_scroll_position(&target.path, offset);
        self.scroll.cancel();
    }

    fn unmount(&mut self) {
        self.save_now();
        debug!(route = %self.page.route(), offset = self.viewport.offset(), "Unmounted");
    }

    /// Navigate to `route`, keeping the current page on the back stack.
    ///
    /// Navigating to the current route is a no-op.
    pub fn navigate(&mut self, route: Route, now: Instant) {
        if *self.page.route() == route {
            return;
        }
        self.unmount();
        self.history.push(self.page.route().clone());
        self.mount(route, now);
    }

    /// Return to the previous page. Returns `false` with an empty back stack.
    pub fn back(&mut self, now: Instant) -> bool {
        let Some(route) = self.history.pop() else {
            return false;
        };
        self.unmount();
        self.mount(route, now);
        true
    }

    // ===== Frame =====

    /// Per-frame work: flush coalesced scroll writes, apply due restorations
    /// and trigger infinite scroll. Returns `true` if the view changed.
    pub fn frame(&mut self, now: Instant) -> bool {
        let target = self.page.scroll_target();
        self.scroll
            .on_frame(&mut self.cache, &target, self.viewport.offset());

        let mut changed = self.restores.fire_due(
            now,
            Some(self.page.mount_id()),
            &mut self.viewport,
        ) > 0;

        if self.page.is_paginated() && self.page.has_more() && self.viewport.bottom_visible() {
            let appended = {
                let (page, mut ctx) = self.split();
                page.load_more(&mut ctx)
            };
            if appended > 0 {
                self.viewport.set_items(self.page.items().len());
            }
            changed = true;
        }
        changed
    }

    /// The mounted page's list has been drawn.
    pub fn content_rendered(&mut self) {
        self.restores.content_ready(self.page.mount_id());
    }

    /// Earliest pending restore deadline, for sizing the event-loop poll.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.restores.next_deadline()
    }

    // ===== Scrolling =====

    /// Scroll by `delta` rows; a moved viewport counts as one scroll event.
    pub fn scroll_by(&mut self, delta: i64) {
        if self.viewport.scroll_by(delta) {
            self.scroll.on_scroll();
        }
    }

    /// Jump to the first row.
    pub fn scroll_to_top(&mut self) {
        self.scroll_by(-i64::from(self.viewport.offset()));
    }

    /// Jump to the last row.
    pub fn scroll_to_bottom(&mut self) {
        let delta = i64::from(self.viewport.max_offset()) - i64::from(self.viewport.offset());
        self.scroll_by(delta);
    }

    /// Scroll by one screen.
    pub fn page_by(&mut self, pages: i64) {
        let rows = i64::from(self.viewport.height().max(1));
        self.scroll_by(rows * pages);
    }

    /// Resize the visible area.
    pub fn set_viewport_height(&mut self, height: u32) {
        self.viewport.set_height(height);
    }

    // ===== Tabs =====

    /// Switch to tab `index` of the current page.
    pub fn select_tab(&mut self, index: usize, now: Instant) {
        if index == self.page.active_index() || index >= self.page.tabs().len() {
            return;
        }
        self.save_now();

        let switched = {
            let (page, mut ctx) = self.split();
            page.switch_tab(index, &mut ctx)
        };
        if !switched {
            return;
        }
        self.viewport.set_items(self.page.items().len());

        let tab = self.page.active_tab().clone();
        let scheduled = self.restores.restore_scroll_position(
            &self.cache,
            self.page.key(),
            &tab,
            self.page.mount_id(),
            self.settings.tab_restore,
            now,
        );
        if scheduled.is_none() {
            self.restores.cancel(self.page.mount_id());
        }
        debug!(tab = %tab, ?scheduled, "Switched tab");
    }

    /// Switch to the next tab, wrapping.
    pub fn next_tab(&mut self, now: Instant) {
        let count = self.page.tabs().len();
        self.select_tab((self.page.active_index() + 1) % count, now);
    }

    /// Switch to the previous tab, wrapping.
    pub fn prev_tab(&mut self, now: Instant) {
        let count = self.page.tabs().len();
        self.select_tab((self.page.active_index() + count - 1) % count, now);
    }

    // ===== Page actions =====

    /// Refetch the active tab, dropping its cached data.
    pub fn refresh(&mut self) {
        {
            let (page, mut ctx) = self.split();
            page.refresh(&mut ctx);
        }
        self.viewport.set_items(self.page.items().len());
        self.scroll_to_top();
    }

    /// Open the profile linked by the item at the top of the viewport.
    pub fn open_selected(&mut self, now: Instant) {
        let Some(user) = self
            .page
            .items()
            .get(self.viewport.top_item())
            .map(|item| item.linked_user().clone())
        else {
            return;
        };
        self.navigate(Route::Profile(user), now);
    }

    /// Open the post linked by the item at the top of the viewport.
    pub fn open_selected_post(&mut self, now: Instant) {
        let Some(post_id) = self
            .page
            .items()
            .get(self.viewport.top_item())
            .and_then(FeedItem::linked_post)
        else {
            return;
        };
        self.navigate(Route::Post(post_id), now);
    }

    /// Follow or unfollow the profile being viewed.
    pub fn toggle_follow(&mut self) {
        let (page, mut ctx) = self.split();
        page.toggle_follow(&mut ctx);
    }

    /// Open the session user's profile, if logged in.
    pub fn open_own_profile(&mut self, now: Instant) {
        if let Some(user) = self.session.clone() {
            self.navigate(Route::Profile(user), now);
        }
    }

    /// Start editing the search query (search page only).
    pub fn start_search(&mut self) {
        if *self.page.route() != Route::Search {
            return;
        }
        let current = self.page.search_query().to_string();
        self.query_input = search_input::activate(std::mem::take(&mut self.query_input), &current);
    }

    /// Run the edited query.
    pub fn submit_search(&mut self) {
        let (input, query) = search_input::submit(std::mem::take(&mut self.query_input));
        self.query_input = input;
        let Some(query) = query else {
            return;
        };
        {
            let (page, mut ctx) = self.split();
            page.set_search_query(&query, &mut ctx);
        }
        self.viewport.set_items(self.page.items().len());
        self.scroll_to_top();
    }

    // ===== Accessors =====

    /// The mounted page.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// The session's navigation cache.
    pub fn cache(&self) -> &NavigationCache<FeedItems> {
        &self.cache
    }

    /// Feed pane viewport.
    pub fn viewport(&self) -> &ListViewport {
        &self.viewport
    }

    /// Logged-in user.
    pub fn session(&self) -> Option<&Username> {
        self.session.as_ref()
    }

    /// Number of pages on the back stack.
    #[cfg(test)]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Coalesced scroll writes performed so far.
    #[cfg(test)]
    pub fn scroll_writes(&self) -> u64 {
        self.scroll.writes()
    }

    /// Restorations not yet applied.
    pub fn pending_restores(&self) -> usize {
        self.restores.pending_len()
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
