//! Page components.
//!
//! A [`Page`] is one mounted view: it owns a local mirror of the list it
//! renders, while the [`NavigationCache`] stays the source of truth across
//! mounts. On mount a page renders from cache when it can and fetches (then
//! writes back) when it cannot.

mod home;
mod notifications;
mod post;
mod profile;
mod search;

use crate::api::FeedApi;
use crate::model::{
    ApiError, FeedItem, FeedItems, PageKey, Profile, RouteError, TabKey, Username,
};
use crate::nav_cache::{MountId, NavigationCache, ScrollTarget, TabStatePatch};
use std::fmt;
use tracing::{debug, info, warn};

/// A navigable view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Home,
    /// `/notification`
    Notifications,
    /// `/search`
    Search,
    /// `/<username>`
    Profile(Username),
    /// `/post/<id>`
    Post(u64),
}

impl Route {
    /// Parse a route path.
    ///
    /// # Errors
    ///
    /// Rejects relative paths, and paths with more than one segment other
    /// than `/post/<id>`.
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let rest = path
            .strip_prefix('/')
            .ok_or_else(|| RouteError::NotAbsolute(path.to_string()))?;
        let rest = rest.trim_end_matches('/');
        let unknown = || RouteError::Unknown(path.to_string());
        match rest.split_once('/') {
            Some(("post", id)) => id.parse().map(Route::Post).map_err(|_| unknown()),
            Some(_) => Err(unknown()),
            None => match rest {
                "" => Ok(Route::Home),
                "notification" => Ok(Route::Notifications),
                "search" => Ok(Route::Search),
                segment => Username::new(segment)
                    .map(Route::Profile)
                    .map_err(|_| unknown()),
            },
        }
    }

    /// Route path, also used as the page-level scroll key.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Notifications => "/notification".to_string(),
            Route::Search => "/search".to_string(),
            Route::Profile(user) => format!("/{user}"),
            Route::Post(id) => format!("/post/{id}"),
        }
    }

    /// Logical page key for tab entries.
    pub fn page_key(&self) -> PageKey {
        match self {
            Route::Home => PageKey::home(),
            Route::Notifications => PageKey::notification(),
            Route::Search => PageKey::search(),
            Route::Profile(user) => PageKey::profile(user),
            Route::Post(id) => PageKey::post(*id),
        }
    }

    /// Header title.
    pub fn title(&self) -> String {
        match self {
            Route::Home => "Home".to_string(),
            Route::Notifications => "Notifications".to_string(),
            Route::Search => "Search".to_string(),
            Route::Profile(user) => format!("@{user}"),
            Route::Post(_) => "Post".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Everything a page needs from the application while loading.
pub struct PageContext<'a> {
    /// The session's navigation cache.
    pub cache: &'a mut NavigationCache<FeedItems>,
    /// Remote API.
    pub api: &'a dyn FeedApi,
    /// Logged-in user, if any.
    pub session: Option<&'a Username>,
    /// Items per request on paginated feeds.
    pub page_size: usize,
}

/// How the current list was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Served from the navigation cache, no request made.
    FromCache,
    /// Fetched from the API on this mount.
    Fetched,
    /// The fetch failed; the list is empty.
    Failed,
}

/// A mounted page.
#[derive(Debug, Clone)]
pub struct Page {
    route: Route,
    key: PageKey,
    tabs: Vec<TabKey>,
    active: usize,
    items: FeedItems,
    status: LoadStatus,
    has_more: bool,
    next_page: usize,
    search_query: String,
    profile: Option<Profile>,
    mount: MountId,
}

impl Page {
    /// Mount `route`: pick the remembered tab, then render from cache or fetch.
    pub fn mount(route: Route, mount: MountId, ctx: &mut PageContext<'_>) -> Self {
        let key = route.page_key();
        let tabs = match &route {
            Route::Home => home::tabs(ctx.session),
            Route::Profile(_) => profile::tabs(),
            Route::Notifications | Route::Search | Route::Post(_) => vec![TabKey::main()],
        };

        let default_state = ctx.cache.get_tab_state(&key, &tabs[0]);
        let active = default_state
            .and_then(|s| tabs.iter().position(|t| t.as_str() == s.active_tab))
            .unwrap_or(0);
        let search_query = ctx
            .cache
            .get_tab_state(&key, &tabs[active])
            .and_then(|s| s.search_query.clone())
            .unwrap_or_default();

        let profile = match &route {
            Route::Profile(user) => profile::fetch_header(ctx.api, user),
            _ => None,
        };

        info!(route = %route, mount = mount.get(), tab = %tabs[active], "Mounting page");

        let mut page = Self {
            route,
            key,
            tabs,
            active,
            items: Vec::new(),
            status: LoadStatus::Fetched,
            has_more: false,
            next_page: 0,
            search_query,
            profile,
            mount,
        };
        page.load_active(ctx);
        page
    }

    /// Serve the active tab from cache, fetching and writing back on a miss.
    fn load_active(&mut self, ctx: &mut PageContext<'_>) {
        let tab = self.active_tab().clone();

        if let Some(data) = ctx.cache.cached_data(&self.key, &tab) {
            self.items = data.clone();
            self.status = LoadStatus::FromCache;
            if self.is_paginated() {
                // A short last page means the end was already reached.
                self.next_page = self.items.len() / ctx.page_size.max(1);
                self.has_more = self.items.len() % ctx.page_size.max(1) == 0;
            } else {
                self.has_more = false;
            }
            debug!(page = %self.key, tab = %tab, items = self.items.len(), "Cache hit");
            return;
        }

        match self.fetch(ctx, &tab, 0) {
            Ok(items) => {
                debug!(page = %self.key, tab = %tab, items = items.len(), "Fetched");
                self.has_more = self.is_paginated() && !items.is_empty();
                self.next_page = 1;
                self.items = items;
                self.status = LoadStatus::Fetched;
                let mut patch = TabStatePatch::new()
                    .with_data(self.items.clone())
                    .with_active_tab(&tab);
                if self.route == Route::Search {
                    patch = patch.with_search_query(self.search_query.clone());
                }
                ctx.cache.set_tab_state(&self.key, &tab, patch);
            }
            Err(e) => {
                warn!(page = %self.key, tab = %tab, error = %e, "Failed to load page data");
                self.items.clear();
                self.has_more = false;
                self.status = LoadStatus::Failed;
            }
        }
    }

    fn fetch(
        &self,
        ctx: &PageContext<'_>,
        tab: &TabKey,
        page_index: usize,
    ) -> Result<FeedItems, ApiError> {
        match &self.route {
            Route::Home => home::fetch(ctx.api, tab, page_index, ctx.page_size),
            Route::Profile(user) => profile::fetch(ctx.api, user, tab),
            Route::Notifications => notifications::fetch(ctx.api),
            Route::Search => search::fetch(ctx.api, &self.search_query),
            Route::Post(id) => post::fetch(ctx.api, *id),
        }
    }

    /// Fetch the next page of a paginated tab and append it.
    ///
    /// Returns the number of appended items. An empty page or an error ends
    /// pagination for this mount.
    pub fn load_more(&mut self, ctx: &mut PageContext<'_>) -> usize {
        if !self.is_paginated() || !self.has_more {
            return 0;
        }
        let tab = self.active_tab().clone();
        match self.fetch(ctx, &tab, self.next_page) {
            Ok(more) if more.is_empty() => {
                self.has_more = false;
                0
            }
            Ok(more) => {
                let appended = more.len();
                self.items.extend(more);
                self.next_page += 1;
                ctx.cache.set_tab_state(
                    &self.key,
                    &tab,
                    TabStatePatch::new()
                        .with_data(self.items.clone())
                        .with_active_tab(&tab),
                );
                debug!(page = %self.key, appended, total = self.items.len(), "Loaded next page");
                appended
            }
            Err(e) => {
                warn!(page = %self.key, error = %e, "Failed to load next page");
                self.has_more = false;
                0
            }
        }
    }

    /// Activate tab `index`. Returns `false` if it is already active or out of range.
    ///
    /// The selection is remembered on the page's first tab so a remount
    /// reopens the same tab.
    pub fn switch_tab(&mut self, index: usize, ctx: &mut PageContext<'_>) -> bool {
        if index == self.active || index >= self.tabs.len() {
            return false;
        }
        self.active = index;
        let selected = self.tabs[index].clone();
        ctx.cache.set_tab_state(
            &self.key,
            &self.tabs[0],
            TabStatePatch::new().with_active_tab(&selected),
        );
        self.load_active(ctx);
        true
    }

    /// Drop the active tab's cached data and fetch it again.
    pub fn refresh(&mut self, ctx: &mut PageContext<'_>) {
        let tab = self.active_tab().clone();
        ctx.cache.clear_tab_data(&self.key, &tab);
        if let Route::Profile(user) = &self.route {
            self.profile = profile::fetch_header(ctx.api, user);
        }
        self.load_active(ctx);
    }

    /// Run a new search. Ignored on pages other than search.
    pub fn set_search_query(&mut self, query: &str, ctx: &mut PageContext<'_>) {
        if self.route != Route::Search {
            return;
        }
        self.search_query = query.to_string();
        let tab = self.active_tab().clone();
        ctx.cache.clear_tab_data(&self.key, &tab);
        self.load_active(ctx);
        // An empty result is still the answer to this query.
        ctx.cache.set_tab_state(
            &self.key,
            &tab,
            TabStatePatch::new().with_search_query(query),
        );
    }

    /// Follow or unfollow the profile shown on this page.
    ///
    /// Only a logged-in user viewing someone else's loaded profile can do
    /// this. On success the header and any cached search hit for that user
    /// flip to the new state. Returns whether anything changed.
    pub fn toggle_follow(&mut self, ctx: &mut PageContext<'_>) -> bool {
        let Route::Profile(user) = &self.route else {
            return false;
        };
        let Some(header) = self.profile.as_mut() else {
            return false;
        };
        if ctx.session.map_or(true, |me| me == user) {
            debug!(user = %user, "Follow toggle ignored");
            return false;
        }

        let follow = !header.is_following;
        let result = if follow {
            ctx.api.follow(user)
        } else {
            ctx.api.unfollow(user)
        };
        if let Err(e) = result {
            warn!(user = %user, follow, error = %e, "Failed to change follow state");
            return false;
        }

        profile::apply_follow(header, follow);
        search::mark_following(ctx.cache, user, follow);
        info!(user = %user, follow, "Follow state changed");
        true
    }

    /// Route this page was mounted for.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Logical page key.
    pub fn key(&self) -> &PageKey {
        &self.key
    }

    /// Tabs in display order.
    pub fn tabs(&self) -> &[TabKey] {
        &self.tabs
    }

    /// Index of the active tab.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The active tab.
    pub fn active_tab(&self) -> &TabKey {
        &self.tabs[self.active]
    }

    /// Rows currently rendered.
    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    /// How the rows were obtained.
    pub fn status(&self) -> LoadStatus {
        self.status
    }

    /// Whether another page can be requested.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Current search query (empty outside search).
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Profile header, on profile pages whose profile loaded.
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// Identity of this mount.
    pub fn mount_id(&self) -> MountId {
        self.mount
    }

    /// Whether the active tab loads more items at the end of the list.
    pub fn is_paginated(&self) -> bool {
        self.route == Route::Home && home::is_paginated(self.active_tab())
    }

    /// Where this page's scroll offsets are recorded.
    pub fn scroll_target(&self) -> ScrollTarget {
        ScrollTarget {
            page: self.key.clone(),
            tab: self.active_tab().clone(),
            path: PageKey::for_path(&self.route.path()),
        }
    }
}

fn posts_to_items(posts: Vec<crate::model::Post>) -> FeedItems {
    posts.into_iter().map(FeedItem::Post).collect()
}

#[cfg(test)]
#[path = "pages_tests.rs"]
mod tests;
