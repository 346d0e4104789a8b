//! Remote API collaborator.
//!
//! The social network's data lives behind this trait. Pages call it on a
//! cache miss and store whatever comes back; nothing here knows about the
//! navigation cache.

use crate::model::{ApiError, Notification, Post, PostDetail, Profile, UserSummary, Username};

pub mod fixture;

pub use fixture::FixtureApi;

/// Remote endpoints used by the client.
///
/// All calls are blocking request/response. Errors are reported, never retried.
pub trait FeedApi {
    /// Username of the logged-in session, `None` when anonymous.
    fn session_username(&self) -> Result<Option<Username>, ApiError>;

    /// One page of the whole-network feed, newest first.
    fn posts(&self, page: usize, size: usize) -> Result<Vec<Post>, ApiError>;

    /// Posts by users the session user follows.
    ///
    /// # Errors
    ///
    /// `ApiError::Unauthorized` when anonymous.
    fn following_posts(&self) -> Result<Vec<Post>, ApiError>;

    /// Profile header for `username`, with the session's follow state.
    fn user_profile(&self, username: &Username) -> Result<Profile, ApiError>;

    /// Start following `username`. Following someone already followed succeeds.
    ///
    /// # Errors
    ///
    /// `ApiError::Unauthorized` when anonymous, `ApiError::Rejected` for the
    /// session user's own handle.
    fn follow(&self, username: &Username) -> Result<(), ApiError>;

    /// Stop following `username`. Unfollowing someone not followed succeeds.
    ///
    /// # Errors
    ///
    /// `ApiError::Unauthorized` when anonymous.
    fn unfollow(&self, username: &Username) -> Result<(), ApiError>;

    /// Posts authored by `username`.
    fn user_posts(&self, username: &Username) -> Result<Vec<Post>, ApiError>;

    /// Posts authored by `username` that carry images.
    fn user_gallery(&self, username: &Username) -> Result<Vec<Post>, ApiError>;

    /// One post and its comment thread.
    fn post_with_comments(&self, post_id: u64) -> Result<PostDetail, ApiError>;

    /// Notifications addressed to the session user.
    ///
    /// # Errors
    ///
    /// `ApiError::Unauthorized` when anonymous.
    fn notifications(&self) -> Result<Vec<Notification>, ApiError>;

    /// Users whose handle or display name contains `query` (case-insensitive).
    fn search_users(&self, query: &str) -> Result<Vec<UserSummary>, ApiError>;
}
