//! Feed styling configuration.
//!
//! Provides distinct colors for authors, timestamps, notifications and errors.

use ratatui::style::{Color, Modifier, Style};

/// Style for secondary text such as hints.
pub const MUTED_TEXT: Style = Style::new().fg(Color::DarkGray);

/// Style for section headers in overlays.
pub const SECTION_HEADER: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== FeedStyles =====

/// Styles for rows of the feed pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedStyles {
    /// Display name of a post's author.
    pub author: Style,
    /// `@handle` text.
    pub handle: Style,
    /// Relative timestamps and counters.
    pub meta: Style,
    /// Notification headline.
    pub notification: Style,
    /// Load failures.
    pub error: Style,
    /// Header row of the item at the top of the viewport.
    pub selected: Style,
}

impl FeedStyles {
    /// Styles with the given color configuration.
    ///
    /// With colors disabled only modifiers remain, so the selection is still
    /// visible.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                author: Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
                handle: Style::new().fg(Color::Cyan),
                meta: MUTED_TEXT,
                notification: Style::new().fg(Color::Magenta),
                error: Style::new().fg(Color::Red),
                selected: Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            }
        } else {
            Self {
                author: Style::new().add_modifier(Modifier::BOLD),
                handle: Style::new(),
                meta: Style::new(),
                notification: Style::new(),
                error: Style::new(),
                selected: Style::new().add_modifier(Modifier::REVERSED),
            }
        }
    }
}

impl Default for FeedStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn color_config_respects_no_color_flag() {
        let config = ColorConfig::from_env_and_args(true);
        assert!(
            !config.colors_enabled(),
            "--no-color flag should disable colors"
        );
    }

    #[test]
    #[serial(no_color)]
    fn color_config_respects_no_color_env_var() {
        std::env::set_var("NO_COLOR", "");
        let config = ColorConfig::from_env_and_args(false);
        std::env::remove_var("NO_COLOR");
        assert!(
            !config.colors_enabled(),
            "NO_COLOR with any value should disable colors"
        );
    }

    #[test]
    #[serial(no_color)]
    fn color_config_enables_colors_by_default() {
        std::env::remove_var("NO_COLOR");
        let config = ColorConfig::from_env_and_args(false);
        assert!(config.colors_enabled(), "Colors should be enabled by default");
    }

    #[test]
    fn monochrome_styles_have_no_foreground() {
        let styles = FeedStyles::with_color_config(ColorConfig { enabled: false });
        assert_eq!(styles.handle.fg, None);
        assert_eq!(styles.error.fg, None);
        assert!(styles.selected.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn colored_styles_distinguish_errors() {
        let styles = FeedStyles::with_color_config(ColorConfig { enabled: true });
        assert_eq!(styles.error.fg, Some(Color::Red));
        assert_ne!(styles.selected, styles.author);
    }
}
