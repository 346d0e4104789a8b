//! Records served by the remote API and mirrored into page caches.
//!
//! These types are owned by the remote service; the client only decodes,
//! stores and renders them.

use crate::model::Username;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single post in a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Server-assigned identifier.
    pub post_id: u64,
    /// Author handle.
    pub username: Username,
    /// Author display name.
    pub name: String,
    /// Body text.
    pub content: String,
    /// Attached image URLs, in display order.
    #[serde(default)]
    pub image_urls: Vec<String>,
    /// Like count.
    #[serde(default)]
    pub likes: u32,
    /// Reply count.
    #[serde(default)]
    pub replies: u32,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Whether the post carries at least one image.
    pub fn has_images(&self) -> bool {
        !self.image_urls.is_empty()
    }
}

/// A comment under a post. Replies carry the id of the comment they answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Server-assigned identifier.
    pub id: String,
    /// Post the comment belongs to.
    pub post_id: u64,
    /// Author handle.
    pub username: Username,
    /// Body text.
    pub content: String,
    /// Like count.
    #[serde(default)]
    pub likes: u32,
    /// Comment this one replies to; `None` for top-level comments.
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Whether this comment answers another comment.
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// A post together with its comment thread, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetail {
    /// The post itself.
    pub post: Post,
    /// Top-level comments oldest first, each followed by its replies.
    pub comments: Vec<Comment>,
}

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Someone liked one of your posts.
    Like,
    /// Someone replied to one of your posts.
    Comment,
    /// Someone followed you.
    Follow,
}

/// An entry in the logged-in user's notification list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Server-assigned identifier.
    pub id: String,
    /// Who the notification is addressed to.
    pub recipient: Username,
    /// Notification category.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// The acting user.
    pub username: Username,
    /// Related post, absent for follows.
    #[serde(default)]
    pub post_id: Option<u64>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Human-readable message line.
    pub fn message(&self) -> String {
        match self.kind {
            NotificationKind::Like => format!("{} liked your post", self.username),
            NotificationKind::Comment => format!("{} commented on your post", self.username),
            NotificationKind::Follow => format!("{} started following you", self.username),
        }
    }
}

/// A user as listed in search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// Handle.
    pub username: Username,
    /// Display name.
    pub name: String,
    /// Profile bio.
    #[serde(default)]
    pub bio: String,
    /// Whether the session user follows this user.
    #[serde(default)]
    pub is_following: bool,
}

/// Profile header data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Handle.
    pub username: Username,
    /// Display name.
    pub name: String,
    /// Profile bio.
    #[serde(default)]
    pub bio: String,
    /// Number of followers.
    pub followers: usize,
    /// Number of followed users.
    pub following: usize,
    /// Whether the session user follows this profile.
    #[serde(default)]
    pub is_following: bool,
}

/// One renderable row of a cached list.
///
/// Pages cache `Vec<FeedItem>`; the variant set is closed so every
/// use-site matches exhaustively instead of downcasting an opaque blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedItem {
    /// A post.
    Post(Post),
    /// A notification.
    Notification(Notification),
    /// A user search hit.
    User(UserSummary),
    /// A comment on the post detail page.
    Comment(Comment),
}

impl FeedItem {
    /// The user this row links to when opened.
    pub fn linked_user(&self) -> &Username {
        match self {
            FeedItem::Post(post) => &post.username,
            FeedItem::Notification(n) => &n.username,
            FeedItem::User(user) => &user.username,
            FeedItem::Comment(c) => &c.username,
        }
    }

    /// The post this row links to, if any.
    pub fn linked_post(&self) -> Option<u64> {
        match self {
            FeedItem::Post(post) => Some(post.post_id),
            FeedItem::Notification(n) => n.post_id,
            FeedItem::User(_) | FeedItem::Comment(_) => None,
        }
    }
}

/// Cached payload type used by every page.
pub type FeedItems = Vec<FeedItem>;

/// Compact relative age label ("now", "5m", "2h", "3d", "4w").
pub fn time_ago(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(created_at);
    if delta.num_minutes() < 1 {
        "now".to_string()
    } else if delta.num_hours() < 1 {
        format!("{}m", delta.num_minutes())
    } else if delta.num_days() < 1 {
        format!("{}h", delta.num_hours())
    } else if delta.num_weeks() < 1 {
        format!("{}d", delta.num_days())
    } else {
        format!("{}w", delta.num_weeks())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, h, m, 0).unwrap()
    }

    #[test]
    fn time_ago_buckets() {
        let now = at(12, 0);
        assert_eq!(time_ago(now, now), "now");
        assert_eq!(time_ago(at(11, 55), now), "5m");
        assert_eq!(time_ago(at(9, 0), now), "3h");
        assert_eq!(time_ago(now - Duration::days(2), now), "2d");
        assert_eq!(time_ago(now - Duration::days(15), now), "2w");
    }

    #[test]
    fn future_timestamps_read_as_now() {
        let now = at(12, 0);
        assert_eq!(time_ago(at(12, 30), now), "now");
    }

    #[test]
    fn post_decodes_from_camel_case_json() {
        let json = r#"{
            "postId": 7,
            "username": "alice",
            "name": "Alice",
            "content": "hello",
            "imageUrls": ["a.png"],
            "likes": 3,
            "createdAt": "2025-03-01T12:00:00Z"
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.post_id, 7);
        assert_eq!(post.replies, 0);
        assert!(post.has_images());
    }

    #[test]
    fn reply_decodes_parent_and_links_to_author() {
        let json = r#"{
            "id": "c2",
            "postId": 7,
            "username": "carol",
            "content": "same here",
            "parentId": "c1",
            "createdAt": "2025-03-01T12:00:00Z"
        }"#;
        let comment: Comment = serde_json::from_str(json).unwrap();
        assert!(comment.is_reply());
        assert_eq!(comment.likes, 0);

        let item = FeedItem::Comment(comment);
        assert_eq!(item.linked_user().as_str(), "carol");
        assert_eq!(item.linked_post(), None);
    }

    #[test]
    fn notification_message_mentions_actor() {
        let json = r#"{
            "id": "n1",
            "recipient": "alice",
            "type": "follow",
            "username": "bob",
            "createdAt": "2025-03-01T12:00:00Z"
        }"#;
        let n: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(n.kind, NotificationKind::Follow);
        assert_eq!(n.message(), "bob started following you");
        let item = FeedItem::Notification(n);
        assert_eq!(item.linked_user().as_str(), "bob");
        assert_eq!(item.linked_post(), None, "follows carry no post");
    }
}
