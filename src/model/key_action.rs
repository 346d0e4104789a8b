//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Scrolling
    /// Scroll the feed up by one line. Default: k/↑
    ScrollUp,
    /// Scroll the feed down by one line. Default: j/↓
    ScrollDown,
    /// Scroll up by one page height. Default: Ctrl+u/Page Up
    PageUp,
    /// Scroll down by one page height. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to top of the feed. Default: g/Home
    ScrollToTop,
    /// Jump to bottom of the feed. Default: G/End
    ScrollToBottom,

    // Tabs
    /// Switch to the next tab of the current page. Default: Tab/]
    NextTab,
    /// Switch to the previous tab of the current page. Default: Shift+Tab/[
    PrevTab,

    // Routing
    /// Open the home feed. Default: 1
    GoHome,
    /// Open the notification list. Default: 2
    GoNotifications,
    /// Open user search. Default: 3
    GoSearch,
    /// Open the logged-in user's profile. Default: p
    GoOwnProfile,
    /// Open the profile linked by the row at the top of the viewport. Default: Enter
    OpenSelected,
    /// Open the post linked by the row at the top of the viewport. Default: o
    OpenPost,
    /// Return to the previous page. Default: Esc/Backspace
    Back,

    // Page actions
    /// Start editing the search query. Default: /
    StartSearch,
    /// Drop the current tab's cached data and fetch it again. Default: r
    Refresh,
    /// Follow or unfollow the profile being viewed. Default: f
    ToggleFollow,

    // Application
    /// Toggle the help overlay. Default: ?
    Help,
    /// Quit application. Default: q
    Quit,
}
