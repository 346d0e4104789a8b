//! Error types for feedview.
//!
//! This module defines a hierarchical error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error wrapping all fatal failures
//!   - [`ApiError`] - Remote API failures (missing resources, no session, unreadable data)
//!   - [`RouteError`] - A route path that names no page
//!   - `std::io::Error` - Terminal/TUI rendering failures
//!
//! # Error Recovery Strategy
//!
//! API errors raised while a page loads are **non-fatal**: the page logs the failure,
//! renders an empty list and stops paginating. Nothing is retried automatically. The
//! navigation cache never fails, so it has no error type of its own.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all fatal failure modes.
///
/// Returned from startup and from the main loop. Page-level fetch failures never
/// reach this type; they are logged and absorbed by the page.
#[derive(Debug, Error)]
pub enum AppError {
    /// The remote API could not be reached during startup.
    ///
    /// **Recovery**: Display error and exit.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The initial route given on the command line names no page.
    ///
    /// **Recovery**: Display error showing accepted routes, exit with non-zero status.
    #[error("Invalid route: {0}")]
    Route(#[from] RouteError),

    /// Terminal or TUI rendering error.
    ///
    /// This indicates failures in the crossterm/ratatui layer, such as broken pipes or
    /// I/O errors during rendering. This is a **fatal error**.
    ///
    /// **Recovery**: Attempt graceful terminal cleanup, then exit.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors returned by the remote API collaborator.
///
/// # Recovery Patterns
///
/// - **NotFound**: Page renders empty; profile header shows nothing
/// - **Unauthorized**: Session-only pages (notifications, following feed) render empty
/// - **Rejected**: The action is logged and the page keeps its previous state
/// - **Io / Decode**: Logged; the page renders what it has and stops paginating
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested resource does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use feedview::model::error::ApiError;
    ///
    /// let err = ApiError::NotFound { what: "user ghost".to_string() };
    /// assert!(err.to_string().contains("user ghost"));
    /// ```
    #[error("Not found: {what}")]
    NotFound {
        /// Description of the missing resource.
        what: String,
    },

    /// The endpoint needs a logged-in session and there is none.
    #[error("Login required")]
    Unauthorized,

    /// The request was understood but refused, e.g. following yourself.
    #[error("Request rejected: {reason}")]
    Rejected {
        /// Why the server refused.
        reason: String,
    },

    /// The backing document could not be read or written.
    #[error("Failed to access {path}: {source}")]
    Io {
        /// Document that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The backing document is not valid JSON for the expected schema.
    ///
    /// **Why `message` is `String` not `serde_json::Error`**: the message is enough for the
    /// log line and keeps the error `Send + Sync + 'static` without carrying parser state.
    #[error("Invalid data in {path}: {message}")]
    Decode {
        /// Document that failed to decode.
        path: PathBuf,
        /// Decoder error message.
        message: String,
    },
}

/// A route path that does not map to any page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Paths must start with '/'.
    #[error("Route must start with '/': {0:?}")]
    NotAbsolute(String),

    /// The path has more segments than any page accepts.
    #[error("Unknown route: {0:?}")]
    Unknown(String),
}
