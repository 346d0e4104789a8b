//! Profile page: a user's threads and image gallery.

use super::posts_to_items;
use crate::api::FeedApi;
use crate::model::{ApiError, FeedItems, Profile, TabKey, Username};
use tracing::warn;

pub(super) fn tabs() -> Vec<TabKey> {
    vec![TabKey::threads(), TabKey::gallery()]
}

/// Header after the session user followed (or unfollowed) this profile.
pub(super) fn apply_follow(header: &mut Profile, follow: bool) {
    header.is_following = follow;
    header.followers = if follow {
        header.followers + 1
    } else {
        header.followers.saturating_sub(1)
    };
}

pub(super) fn fetch_header(api: &dyn FeedApi, user: &Username) -> Option<Profile> {
    match api.user_profile(user) {
        Ok(profile) => Some(profile),
        Err(e) => {
            warn!(user = %user, error = %e, "Failed to load profile");
            None
        }
    }
}

pub(super) fn fetch(
    api: &dyn FeedApi,
    user: &Username,
    tab: &TabKey,
) -> Result<FeedItems, ApiError> {
    if *tab == TabKey::gallery() {
        api.user_gallery(user).map(posts_to_items)
    } else {
        api.user_posts(user).map(posts_to_items)
    }
}
