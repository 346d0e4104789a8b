//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod feed;
pub mod identifiers;
pub mod key_action;

// Re-export for convenience
pub use error::{ApiError, AppError, RouteError};
pub use feed::{
    time_ago, Comment, FeedItem, FeedItems, Notification, NotificationKind, Post, PostDetail,
    Profile, UserSummary,
};
pub use identifiers::{InvalidPageKey, InvalidTabKey, InvalidUsername, PageKey, TabKey, Username};
pub use key_action::KeyAction;
