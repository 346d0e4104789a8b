//! Notification list of the logged-in user.

use crate::api::FeedApi;
use crate::model::{ApiError, FeedItem, FeedItems};

pub(super) fn fetch(api: &dyn FeedApi) -> Result<FeedItems, ApiError> {
    Ok(api
        .notifications()?
        .into_iter()
        .map(FeedItem::Notification)
        .collect())
}
