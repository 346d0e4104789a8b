//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

use std::time::Duration;

/// Height of the header bar in lines.
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the tab bar in lines (border + content).
///
/// Only pages with more than one tab show it.
pub const TAB_BAR_HEIGHT: u16 = 3;

/// Height of the search query box in lines (border + content).
pub const SEARCH_INPUT_HEIGHT: u16 = 3;

/// Height of the profile header in lines.
pub const PROFILE_HEADER_HEIGHT: u16 = 3;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 60;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;

/// Event poll timeout while restorations are pending (about 60 fps).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Event poll timeout when nothing is scheduled.
pub const IDLE_INTERVAL: Duration = Duration::from_millis(500);
