//! Test doubles and acceptance harness.
//!
//! [`FakeApi`] serves canned data and records every call, so tests can assert
//! that a cache hit skipped the network. [`AcceptanceTestHarness`] wraps
//! `TuiApp<TestBackend>` with a manual clock for simulating user sessions.

use crate::api::FeedApi;
use crate::config::keybindings::KeyBindings;
use crate::model::{
    ApiError, Comment, Notification, NotificationKind, Post, PostDetail, Profile, UserSummary,
    Username,
};
use crate::pages::Route;
use crate::state::{AppState, Settings};
use crate::view::TuiApp;
use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

// ===== Fixtures =====

/// Handle from a literal.
pub fn user(name: &str) -> Username {
    Username::new(name).expect("valid test username")
}

/// Post `id` by `author`; higher ids are newer.
pub fn post(id: u64, author: &str) -> Post {
    let base = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    Post {
        post_id: id,
        username: user(author),
        name: author.to_uppercase(),
        content: format!("post number {id}"),
        image_urls: if id % 2 == 0 {
            vec![format!("img{id}.png")]
        } else {
            Vec::new()
        },
        likes: 0,
        replies: 0,
        created_at: base + ChronoDuration::minutes(id as i64),
    }
}

/// Posts `1..=count` newest first, by a rotating set of authors.
pub fn posts(count: u64) -> Vec<Post> {
    let authors = ["alice", "bob", "carol"];
    (1..=count)
        .rev()
        .map(|id| post(id, authors[(id % 3) as usize]))
        .collect()
}

/// Comment `id` on `post_id` by `author`, replying to `parent` when given.
pub fn comment(id: &str, post_id: u64, author: &str, parent: Option<&str>) -> Comment {
    Comment {
        id: id.to_string(),
        post_id,
        username: user(author),
        content: format!("comment {id}"),
        likes: 0,
        parent_id: parent.map(str::to_string),
        created_at: Utc.with_ymd_and_hms(2025, 3, 2, 0, 0, 0).unwrap(),
    }
}

/// Shared record of API calls, kept by the test after the API is boxed.
pub type CallLog = Rc<RefCell<Vec<String>>>;

/// In-memory [`FeedApi`] with call recording and switchable failure.
pub struct FakeApi {
    session: Option<Username>,
    posts: Vec<Post>,
    following: Vec<Post>,
    users: Vec<UserSummary>,
    notifications: Vec<Notification>,
    followed: RefCell<Vec<Username>>,
    calls: CallLog,
    failing: Rc<Cell<bool>>,
}

impl FakeApi {
    /// Anonymous API serving `feed` as the whole-network feed.
    pub fn new(feed: Vec<Post>) -> Self {
        let users = ["alice", "bob", "carol"]
            .iter()
            .map(|n| UserSummary {
                username: user(n),
                name: n.to_uppercase(),
                bio: String::new(),
                is_following: false,
            })
            .collect();
        Self {
            session: None,
            posts: feed,
            following: Vec::new(),
            users,
            notifications: Vec::new(),
            followed: RefCell::new(Vec::new()),
            calls: Rc::new(RefCell::new(Vec::new())),
            failing: Rc::new(Cell::new(false)),
        }
    }

    /// Log in as `name`, with `following` as the following feed.
    pub fn logged_in(mut self, name: &str, following: Vec<Post>) -> Self {
        self.session = Some(user(name));
        self.following = following;
        self.notifications = vec![Notification {
            id: "n1".to_string(),
            recipient: user(name),
            kind: NotificationKind::Follow,
            username: user("bob"),
            post_id: None,
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
        }];
        self
    }

    /// Handle for inspecting calls after the API is moved.
    pub fn call_log(&self) -> CallLog {
        Rc::clone(&self.calls)
    }

    /// Switch for making every call fail with `ApiError::Io`.
    pub fn failure_switch(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.failing)
    }

    fn record(&self, call: String) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(call);
        if self.failing.get() {
            return Err(ApiError::Io {
                path: "fake".into(),
                source: std::io::Error::other("network down"),
            });
        }
        Ok(())
    }
}

/// Number of recorded calls starting with `prefix`.
pub fn count_calls(log: &CallLog, prefix: &str) -> usize {
    log.borrow().iter().filter(|c| c.starts_with(prefix)).count()
}

impl FeedApi for FakeApi {
    fn session_username(&self) -> Result<Option<Username>, ApiError> {
        Ok(self.session.clone())
    }

    fn posts(&self, page: usize, size: usize) -> Result<Vec<Post>, ApiError> {
        self.record(format!("posts:{page}"))?;
        Ok(self
            .posts
            .iter()
            .skip(page * size)
            .take(size)
            .cloned()
            .collect())
    }

    fn following_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.record("following".to_string())?;
        if self.session.is_none() {
            return Err(ApiError::Unauthorized);
        }
        Ok(self.following.clone())
    }

    fn user_profile(&self, username: &Username) -> Result<Profile, ApiError> {
        self.record(format!("profile:{username}"))?;
        Ok(Profile {
            username: username.clone(),
            name: username.as_str().to_uppercase(),
            bio: "bio".to_string(),
            followers: 1,
            following: 2,
            is_following: self.followed.borrow().contains(username),
        })
    }

    fn follow(&self, username: &Username) -> Result<(), ApiError> {
        self.record(format!("follow:{username}"))?;
        if self.session.is_none() {
            return Err(ApiError::Unauthorized);
        }
        let mut followed = self.followed.borrow_mut();
        if !followed.contains(username) {
            followed.push(username.clone());
        }
        Ok(())
    }

    fn unfollow(&self, username: &Username) -> Result<(), ApiError> {
        self.record(format!("unfollow:{username}"))?;
        if self.session.is_none() {
            return Err(ApiError::Unauthorized);
        }
        self.followed.borrow_mut().retain(|u| u != username);
        Ok(())
    }

    /// Every post has a comment by bob with a reply by carol.
    fn post_with_comments(&self, post_id: u64) -> Result<PostDetail, ApiError> {
        self.record(format!("post:{post_id}"))?;
        let post = self
            .posts
            .iter()
            .find(|p| p.post_id == post_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                what: format!("post {post_id}"),
            })?;
        Ok(PostDetail {
            post,
            comments: vec![
                comment("c1", post_id, "bob", None),
                comment("c2", post_id, "carol", Some("c1")),
            ],
        })
    }

    fn user_posts(&self, username: &Username) -> Result<Vec<Post>, ApiError> {
        self.record(format!("user_posts:{username}"))?;
        Ok(self
            .posts
            .iter()
            .filter(|p| &p.username == username)
            .cloned()
            .collect())
    }

    fn user_gallery(&self, username: &Username) -> Result<Vec<Post>, ApiError> {
        self.record(format!("gallery:{username}"))?;
        Ok(self
            .posts
            .iter()
            .filter(|p| &p.username == username && p.has_images())
            .cloned()
            .collect())
    }

    fn notifications(&self) -> Result<Vec<Notification>, ApiError> {
        self.record("notifications".to_string())?;
        if self.session.is_none() {
            return Err(ApiError::Unauthorized);
        }
        Ok(self.notifications.clone())
    }

    fn search_users(&self, query: &str) -> Result<Vec<UserSummary>, ApiError> {
        self.record(format!("search:{query}"))?;
        let needle = query.to_lowercase();
        Ok(self
            .users
            .iter()
            .filter(|u| u.username.as_str().contains(&needle))
            .cloned()
            .collect())
    }
}

// ===== Acceptance harness =====

/// Convert a ratatui buffer to a string, dropping empty trailing lines.
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// Drives `TuiApp<TestBackend>` with a manual clock.
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
    now: Instant,
    running: bool,
}

impl AcceptanceTestHarness {
    /// Mount `route` over `api` in an 80x24 terminal and draw once.
    pub fn new(api: FakeApi, route: Route) -> Self {
        Self::with_size(api, route, 80, 24)
    }

    /// Mount `route` over `api` with a custom terminal size and draw once.
    pub fn with_size(api: FakeApi, route: Route, width: u16, height: u16) -> Self {
        let now = Instant::now();
        let terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
        let state = AppState::new(
            Box::new(api),
            Settings::default(),
            route,
            u32::from(height),
            now,
        );
        let mut app = TuiApp::with_terminal(terminal, state, KeyBindings::default());
        app.tick(now).expect("initial draw");
        Self {
            app,
            now,
            running: true,
        }
    }

    /// Send a key and render a frame. Returns `true` if the app quit.
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    /// Send a key with modifiers and render a frame.
    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true;
        }
        if self.app.handle_key(KeyEvent::new(key, mods), self.now) {
            self.running = false;
            return true;
        }
        self.app.tick(self.now).expect("draw");
        false
    }

    /// Type text character by character.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            if self.send_key(KeyCode::Char(ch)) {
                break;
            }
        }
    }

    /// Let `ms` milliseconds pass, then render a frame.
    pub fn advance(&mut self, ms: u64) {
        self.now += Duration::from_millis(ms);
        self.app.tick(self.now).expect("draw");
    }

    /// Current application state.
    pub fn state(&self) -> &AppState {
        self.app.app_state()
    }

    /// Whether the app is still running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current screen contents.
    pub fn render_to_string(&self) -> String {
        buffer_to_string(self.app.terminal().backend().buffer())
    }
}
