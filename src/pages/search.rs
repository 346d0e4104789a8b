//! User search.

use crate::api::FeedApi;
use crate::model::{ApiError, FeedItem, FeedItems, PageKey, TabKey, Username};
use crate::nav_cache::{NavigationCache, TabStatePatch};

pub(super) fn fetch(api: &dyn FeedApi, query: &str) -> Result<FeedItems, ApiError> {
    Ok(api
        .search_users(query)?
        .into_iter()
        .map(FeedItem::User)
        .collect())
}

/// Flip the follow marker of `user` in the cached search results.
pub(super) fn mark_following(
    cache: &mut NavigationCache<FeedItems>,
    user: &Username,
    following: bool,
) {
    let (page, tab) = (PageKey::search(), TabKey::main());
    let Some(mut items) = cache.cached_data(&page, &tab).cloned() else {
        return;
    };
    let mut changed = false;
    for item in &mut items {
        if let FeedItem::User(hit) = item {
            if &hit.username == user && hit.is_following != following {
                hit.is_following = following;
                changed = true;
            }
        }
    }
    if changed {
        cache.set_tab_state(&page, &tab, TabStatePatch::new().with_data(items));
    }
}
