//! Home feed: the whole network, plus a following tab for logged-in users.

use super::posts_to_items;
use crate::api::FeedApi;
use crate::model::{ApiError, FeedItems, TabKey, Username};

pub(super) fn tabs(session: Option<&Username>) -> Vec<TabKey> {
    match session {
        Some(_) => vec![TabKey::home(), TabKey::following()],
        None => vec![TabKey::home()],
    }
}

pub(super) fn is_paginated(tab: &TabKey) -> bool {
    *tab == TabKey::home()
}

pub(super) fn fetch(
    api: &dyn FeedApi,
    tab: &TabKey,
    page: usize,
    size: usize,
) -> Result<FeedItems, ApiError> {
    if *tab == TabKey::home() {
        api.posts(page, size).map(posts_to_items)
    } else if *tab == TabKey::following() {
        api.following_posts().map(posts_to_items)
    } else {
        Err(ApiError::NotFound {
            what: format!("home tab {tab}"),
        })
    }
}
