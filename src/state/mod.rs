//! UI state machine (pure).
//!
//! All state transitions are testable without a terminal: time is passed in
//! explicitly and the viewport is a plain value.

pub mod app_state;
pub mod search_input;
pub mod viewport;

// Re-export for convenience
pub use app_state::{AppState, Settings};
pub use search_input::QueryInput;
pub use viewport::ListViewport;
