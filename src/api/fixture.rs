//! Directory-backed API for offline use and tests.
//!
//! Reads JSON documents from a data directory on every call, so edits to the
//! files show up on the next fetch just as server-side changes would:
//!
//! - `posts.json` - array of posts
//! - `users.json` - array of users, each with the handles they follow
//! - `notifications.json` - array of notifications with their recipient
//! - `comments.json` - array of comments with their post (optional)
//!
//! Follow and unfollow rewrite `users.json`.

use super::FeedApi;
use crate::model::{
    ApiError, Comment, Notification, Post, PostDetail, Profile, UserSummary, Username,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

const POSTS_FILE: &str = "posts.json";
const USERS_FILE: &str = "users.json";
const NOTIFICATIONS_FILE: &str = "notifications.json";
const COMMENTS_FILE: &str = "comments.json";

/// Account record as stored in `users.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    username: Username,
    name: String,
    #[serde(default)]
    bio: String,
    #[serde(default)]
    following: Vec<Username>,
}

/// [`FeedApi`] served from JSON files in a directory.
#[derive(Debug, Clone)]
pub struct FixtureApi {
    dir: PathBuf,
    session: Option<Username>,
}

impl FixtureApi {
    /// API over `dir`, logged in as `session` when given.
    pub fn new(dir: impl Into<PathBuf>, session: Option<Username>) -> Self {
        Self {
            dir: dir.into(),
            session,
        }
    }

    /// Directory the documents are read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn load<T: DeserializeOwned>(&self, file: &str) -> Result<T, ApiError> {
        let path = self.dir.join(file);
        let contents = std::fs::read_to_string(&path).map_err(|source| ApiError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), bytes = contents.len(), "Loaded fixture document");
        serde_json::from_str(&contents).map_err(|e| ApiError::Decode {
            path,
            message: e.to_string(),
        })
    }

    /// Like [`load`](Self::load), but a missing file reads as `T::default()`.
    fn load_optional<T: DeserializeOwned + Default>(&self, file: &str) -> Result<T, ApiError> {
        match self.load(file) {
            Err(ApiError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                Ok(T::default())
            }
            other => other,
        }
    }

    fn store<T: Serialize>(&self, file: &str, value: &T) -> Result<(), ApiError> {
        let path = self.dir.join(file);
        let contents = serde_json::to_string_pretty(value).map_err(|e| ApiError::Decode {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, contents).map_err(|source| ApiError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "Stored fixture document");
        Ok(())
    }

    /// Add or remove `target` in the session user's following list.
    fn set_following(&self, target: &Username, follow: bool) -> Result<(), ApiError> {
        let session = self.require_session()?;
        if follow && session == target {
            return Err(ApiError::Rejected {
                reason: "cannot follow yourself".to_string(),
            });
        }
        let mut users = self.users()?;
        if !users.iter().any(|u| &u.username == target) {
            return Err(ApiError::NotFound {
                what: format!("user {target}"),
            });
        }
        let me = users
            .iter_mut()
            .find(|u| &u.username == session)
            .ok_or_else(|| ApiError::NotFound {
                what: format!("user {session}"),
            })?;

        let present = me.following.contains(target);
        if present == follow {
            return Ok(());
        }
        if follow {
            me.following.push(target.clone());
        } else {
            me.following.retain(|u| u != target);
        }
        self.store(USERS_FILE, &users)
    }

    fn require_session(&self) -> Result<&Username, ApiError> {
        self.session.as_ref().ok_or(ApiError::Unauthorized)
    }

    fn users(&self) -> Result<Vec<UserRecord>, ApiError> {
        self.load(USERS_FILE)
    }

    fn all_posts(&self) -> Result<Vec<Post>, ApiError> {
        let mut posts: Vec<Post> = self.load(POSTS_FILE)?;
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.post_id.cmp(&a.post_id))
        });
        Ok(posts)
    }

    fn followed_by_session(&self, users: &[UserRecord]) -> Vec<Username> {
        let Some(session) = &self.session else {
            return Vec::new();
        };
        users
            .iter()
            .find(|u| &u.username == session)
            .map(|u| u.following.clone())
            .unwrap_or_default()
    }
}

impl FeedApi for FixtureApi {
    fn session_username(&self) -> Result<Option<Username>, ApiError> {
        Ok(self.session.clone())
    }

    fn posts(&self, page: usize, size: usize) -> Result<Vec<Post>, ApiError> {
        let posts = self.all_posts()?;
        Ok(posts
            .into_iter()
            .skip(page.saturating_mul(size))
            .take(size)
            .collect())
    }

    fn following_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.require_session()?;
        let followed = self.followed_by_session(&self.users()?);
        Ok(self
            .all_posts()?
            .into_iter()
            .filter(|p| followed.contains(&p.username))
            .collect())
    }

    fn user_profile(&self, username: &Username) -> Result<Profile, ApiError> {
        let users = self.users()?;
        let user = users
            .iter()
            .find(|u| &u.username == username)
            .ok_or_else(|| ApiError::NotFound {
                what: format!("user {username}"),
            })?;
        let followers = users
            .iter()
            .filter(|u| u.following.contains(username))
            .count();
        Ok(Profile {
            username: user.username.clone(),
            name: user.name.clone(),
            bio: user.bio.clone(),
            followers,
            following: user.following.len(),
            is_following: self.followed_by_session(&users).contains(username),
        })
    }

    fn follow(&self, username: &Username) -> Result<(), ApiError> {
        self.set_following(username, true)
    }

    fn unfollow(&self, username: &Username) -> Result<(), ApiError> {
        self.set_following(username, false)
    }

    fn post_with_comments(&self, post_id: u64) -> Result<PostDetail, ApiError> {
        let post = self
            .all_posts()?
            .into_iter()
            .find(|p| p.post_id == post_id)
            .ok_or_else(|| ApiError::NotFound {
                what: format!("post {post_id}"),
            })?;
        let mut comments: Vec<Comment> = self.load_optional(COMMENTS_FILE)?;
        comments.retain(|c| c.post_id == post_id);
        Ok(PostDetail {
            post,
            comments: thread_order(comments),
        })
    }

    fn user_posts(&self, username: &Username) -> Result<Vec<Post>, ApiError> {
        Ok(self
            .all_posts()?
            .into_iter()
            .filter(|p| &p.username == username)
            .collect())
    }

    fn user_gallery(&self, username: &Username) -> Result<Vec<Post>, ApiError> {
        Ok(self
            .user_posts(username)?
            .into_iter()
            .filter(Post::has_images)
            .collect())
    }

    fn notifications(&self) -> Result<Vec<Notification>, ApiError> {
        let session = self.require_session()?;
        let mut notifications: Vec<Notification> = self.load(NOTIFICATIONS_FILE)?;
        notifications.retain(|n| &n.recipient == session);
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    fn search_users(&self, query: &str) -> Result<Vec<UserSummary>, ApiError> {
        let users = self.users()?;
        let followed = self.followed_by_session(&users);
        let needle = query.trim().to_lowercase();
        Ok(users
            .into_iter()
            .filter(|u| {
                needle.is_empty()
                    || u.username.as_str().to_lowercase().contains(&needle)
                    || u.name.to_lowercase().contains(&needle)
            })
            .map(|u| UserSummary {
                is_following: followed.contains(&u.username),
                username: u.username,
                name: u.name,
                bio: u.bio,
            })
            .collect())
    }
}

/// Top-level comments oldest first, each followed by its replies oldest first.
///
/// Replies whose parent is not in the list are dropped.
fn thread_order(mut comments: Vec<Comment>) -> Vec<Comment> {
    comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    let (roots, replies): (Vec<_>, Vec<_>) = comments.into_iter().partition(|c| !c.is_reply());

    let mut ordered = Vec::with_capacity(roots.len() + replies.len());
    for root in roots {
        let id = root.id.clone();
        ordered.push(root);
        ordered.extend(
            replies
                .iter()
                .filter(|r| r.parent_id.as_deref() == Some(id.as_str()))
                .cloned(),
        );
    }
    ordered
}
