//! TUI rendering and terminal management (impure shell)

pub mod constants;
pub mod feed;
mod help;
pub mod layout;
mod search_input;
pub mod styles;
pub mod tabs;


pub use help::render_help_overlay;
pub use search_input::SearchInput;
pub use styles::{ColorConfig, FeedStyles};

use crate::config::keybindings::KeyBindings;
use crate::model::{AppError, KeyAction};
use crate::pages::Route;
use crate::state::search_input as query_edit;
use crate::state::viewport::ROWS_PER_ITEM;
use crate::state::AppState;
use constants::{FRAME_INTERVAL, IDLE_INTERVAL};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stdout};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    key_bindings: KeyBindings,
    styles: FeedStyles,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(app_state: AppState, key_bindings: KeyBindings) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self::with_terminal(terminal, app_state, key_bindings))
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Polls with a short timeout
    /// while a scroll restoration is pending so it fires on time, and with
    /// a long one when idle.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.tick(Instant::now())?;

        loop {
            let now = Instant::now();
            let timeout = match self.app_state.next_deadline() {
                Some(deadline) => deadline.saturating_duration_since(now).min(IDLE_INTERVAL),
                None if self.app_state.pending_restores() > 0 => FRAME_INTERVAL,
                None => IDLE_INTERVAL,
            };

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        if self.handle_key(key, Instant::now()) {
                            info!("Quit requested");
                            return Ok(());
                        }
                    }
                    Event::Resize(width, height) => {
                        debug!(width, height, "Terminal resized");
                        self.terminal.autoresize()?;
                    }
                    _ => {}
                }
            }

            // Every pass through the loop is one frame.
            self.tick(Instant::now())?;
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Wrap an existing terminal; used by `new` and by tests with `TestBackend`.
    pub fn with_terminal(terminal: Terminal<B>, app_state: AppState, key_bindings: KeyBindings) -> Self {
        Self {
            terminal,
            app_state,
            key_bindings,
            styles: FeedStyles::default(),
        }
    }

    /// Replace the feed styles.
    pub fn set_styles(&mut self, styles: FeedStyles) {
        self.styles = styles;
    }

    /// Current application state.
    pub fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Underlying terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// One frame: size the viewport, run per-frame state work, draw, then
    /// report the rendered content. Returns whether the state changed.
    pub fn tick(&mut self, now: Instant) -> Result<bool, TuiError> {
        let size = self.terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        let feed = layout::split_areas(area, &self.app_state).feed;
        self.app_state.set_viewport_height(u32::from(feed.height));

        let changed = self.app_state.frame(now);
        self.draw()?;
        self.app_state.content_rendered();
        Ok(changed)
    }

    fn draw(&mut self) -> Result<(), TuiError> {
        let state = &self.app_state;
        let styles = &self.styles;
        let wall_clock = chrono::Utc::now();
        self.terminal
            .draw(|frame| layout::render_layout(frame, state, wall_clock, styles))?;
        Ok(())
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        // Ctrl+C always quits, even if not in bindings
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.app_state.help_visible {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.app_state.help_visible = false;
            }
            return false;
        }

        if self.app_state.query_input.is_typing() {
            self.handle_query_key(key);
            return false;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        self.dispatch(action, now)
    }

    /// Keys while the search query is being edited.
    fn handle_query_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Enter {
            self.app_state.submit_search();
            return;
        }
        let state = &mut self.app_state;
        let input = std::mem::take(&mut state.query_input);
        state.query_input = match key.code {
            KeyCode::Esc => query_edit::cancel(input),
            KeyCode::Backspace => query_edit::handle_backspace(input),
            KeyCode::Left => query_edit::handle_cursor_left(input),
            KeyCode::Right => query_edit::handle_cursor_right(input),
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                query_edit::handle_char_input(input, ch)
            }
            _ => input,
        };
    }

    fn dispatch(&mut self, action: KeyAction, now: Instant) -> bool {
        let item = i64::from(ROWS_PER_ITEM);
        let state = &mut self.app_state;
        match action {
            KeyAction::ScrollDown => state.scroll_by(item),
            KeyAction::ScrollUp => state.scroll_by(-item),
            KeyAction::PageDown => state.page_by(1),
            KeyAction::PageUp => state.page_by(-1),
            KeyAction::ScrollToTop => state.scroll_to_top(),
            KeyAction::ScrollToBottom => state.scroll_to_bottom(),
            KeyAction::NextTab => state.next_tab(now),
            KeyAction::PrevTab => state.prev_tab(now),
            KeyAction::GoHome => state.navigate(Route::Home, now),
            KeyAction::GoNotifications => state.navigate(Route::Notifications, now),
            KeyAction::GoSearch => state.navigate(Route::Search, now),
            KeyAction::GoOwnProfile => state.open_own_profile(now),
            KeyAction::OpenSelected => state.open_selected(now),
            KeyAction::OpenPost => state.open_selected_post(now),
            KeyAction::Back => {
                state.back(now);
            }
            KeyAction::StartSearch => state.start_search(),
            KeyAction::Refresh => state.refresh(),
            KeyAction::ToggleFollow => state.toggle_follow(),
            KeyAction::Help => state.help_visible = true,
            KeyAction::Quit => return true,
        }
        false
    }
}

/// Initialize and run the TUI application.
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// even when the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_app(app_state: AppState, key_bindings: KeyBindings, styles: FeedStyles) -> Result<(), TuiError> {
    let mut app = TuiApp::new(app_state, key_bindings)?;
    app.set_styles(styles);

    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
