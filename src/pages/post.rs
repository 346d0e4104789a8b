//! Post detail: the post followed by its comment thread.

use crate::api::FeedApi;
use crate::model::{ApiError, FeedItem, FeedItems};

pub(super) fn fetch(api: &dyn FeedApi, post_id: u64) -> Result<FeedItems, ApiError> {
    let detail = api.post_with_comments(post_id)?;
    let mut items = Vec::with_capacity(detail.comments.len() + 1);
    items.push(FeedItem::Post(detail.post));
    items.extend(detail.comments.into_iter().map(FeedItem::Comment));
    Ok(items)
}
