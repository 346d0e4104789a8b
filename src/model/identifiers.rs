//! Core identifier newtypes with smart constructors.
//!
//! All identifiers validate their input at construction time.
//! Raw constructors are never exported - use smart constructors only.

use std::fmt;

/// Logical page identifier ("home", "profile-alice", "notification") or a
/// route path ("/", "/alice") for page-level scroll entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageKey(String);

impl PageKey {
    /// Smart constructor: validates non-empty key
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidPageKey> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidPageKey::Empty);
        }
        Ok(Self(raw))
    }

    /// Page key of the home feed.
    pub fn home() -> Self {
        Self("home".to_string())
    }

    /// Page key of the notification list.
    pub fn notification() -> Self {
        Self("notification".to_string())
    }

    /// Page key of the user search page.
    pub fn search() -> Self {
        Self("search".to_string())
    }

    /// Page key of a user's profile page.
    pub fn profile(username: &Username) -> Self {
        Self(format!("profile-{}", username.as_str()))
    }

    /// Page key of a post detail page.
    pub fn post(post_id: u64) -> Self {
        Self(format!("post-{post_id}"))
    }

    /// Page key for a route path, used for page-level scroll entries.
    ///
    /// Paths are always non-empty ("/" at minimum).
    pub fn for_path(path: &str) -> Self {
        if path.is_empty() {
            Self("/".to_string())
        } else {
            Self(path.to_string())
        }
    }

    /// Borrow the raw key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sub-view within a page ("home", "following", "threads", "main").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabKey(String);

impl TabKey {
    /// Smart constructor: validates non-empty key
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidTabKey> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidTabKey::Empty);
        }
        Ok(Self(raw))
    }

    /// Implicit single tab of non-tabbed pages.
    pub fn main() -> Self {
        Self("main".to_string())
    }

    /// Whole-network feed tab on the home page.
    pub fn home() -> Self {
        Self("home".to_string())
    }

    /// Followed-users feed tab on the home page.
    pub fn following() -> Self {
        Self("following".to_string())
    }

    /// Post list tab on a profile page.
    pub fn threads() -> Self {
        Self("threads".to_string())
    }

    /// Image posts tab on a profile page.
    pub fn gallery() -> Self {
        Self("gallery".to_string())
    }

    /// Borrow the raw key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account handle as used in routes ("/alice").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Smart constructor: rejects empty handles and handles that cannot be a path segment
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidUsername> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidUsername::Empty);
        }
        if raw.contains('/') || raw.chars().any(char::is_whitespace) {
            return Err(InvalidUsername::NotAPathSegment(raw));
        }
        Ok(Self(raw))
    }

    /// Borrow the raw handle.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = InvalidUsername;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

// ===== Error Types =====

/// Rejected page key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPageKey {
    /// Key was the empty string.
    #[error("Page key cannot be empty")]
    Empty,
}

/// Rejected tab key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidTabKey {
    /// Key was the empty string.
    #[error("Tab key cannot be empty")]
    Empty,
}

/// Rejected username.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidUsername {
    /// Handle was the empty string.
    #[error("Username cannot be empty")]
    Empty,
    /// Handle contains '/' or whitespace.
    #[error("Username {0:?} cannot be used as a route segment")]
    NotAPathSegment(String),
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_key_rejects_empty_string() {
        assert_eq!(PageKey::new(""), Err(InvalidPageKey::Empty));
    }

    #[test]
    fn page_key_as_str_returns_original() {
        let key = PageKey::new("home").expect("valid key");
        assert_eq!(key.as_str(), "home");
        assert_eq!(key, PageKey::home());
    }

    #[test]
    fn profile_page_key_embeds_username() {
        let alice = Username::new("alice").unwrap();
        assert_eq!(PageKey::profile(&alice).as_str(), "profile-alice");
    }

    #[test]
    fn post_page_key_embeds_id() {
        assert_eq!(PageKey::post(42).as_str(), "post-42");
    }

    #[test]
    fn for_path_never_produces_empty_key() {
        assert_eq!(PageKey::for_path("").as_str(), "/");
        assert_eq!(PageKey::for_path("/alice").as_str(), "/alice");
    }

    #[test]
    fn tab_key_rejects_empty_string() {
        assert_eq!(TabKey::new(""), Err(InvalidTabKey::Empty));
    }

    #[test]
    fn tab_key_display_returns_inner_string() {
        assert_eq!(TabKey::following().to_string(), "following");
    }

    #[test]
    fn username_rejects_empty_string() {
        assert_eq!(Username::new(""), Err(InvalidUsername::Empty));
    }

    #[test]
    fn username_rejects_slash_and_whitespace() {
        assert!(matches!(
            Username::new("a/b"),
            Err(InvalidUsername::NotAPathSegment(_))
        ));
        assert!(matches!(
            Username::new("a b"),
            Err(InvalidUsername::NotAPathSegment(_))
        ));
    }

    #[test]
    fn username_deserializes_through_smart_constructor() {
        let ok: Username = serde_json::from_str("\"alice\"").unwrap();
        assert_eq!(ok.as_str(), "alice");

        let err = serde_json::from_str::<Username>("\"\"");
        assert!(err.is_err(), "empty username must not deserialize");
    }
}
