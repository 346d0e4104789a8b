//! feedview - Entry Point

use clap::Parser;
use feedview::api::FixtureApi;
use feedview::config::KeyBindings;
use feedview::model::Username;
use feedview::pages::Route;
use feedview::state::AppState;
use feedview::view::{ColorConfig, FeedStyles};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Initial feed height before the first frame measures the terminal.
const INITIAL_VIEWPORT_HEIGHT: u32 = 20;

/// feedview - terminal client for a small social network
#[derive(Parser, Debug)]
#[command(name = "feedview")]
#[command(version)]
#[command(about = "Browse feeds, profiles and notifications with per-tab scroll restoration")]
pub struct Args {
    /// Directory holding posts.json, users.json and notifications.json
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Log in as this user (anonymous if omitted)
    #[arg(short, long)]
    pub user: Option<String>,

    /// Page to open first, e.g. "/", "/notification", "/search", "/alice", "/post/5"
    #[arg(short, long, default_value = "/")]
    pub route: String,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = feedview::config::load_config_with_precedence(args.config.clone())?;
        let merged = feedview::config::merge_config(config_file);
        let with_env = feedview::config::apply_env_overrides(merged);
        feedview::config::apply_cli_overrides(with_env, args.data_dir.clone(), args.user.clone())
    };

    // Keep the guard alive so buffered log lines are flushed on exit.
    let _log_guard = feedview::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let route = Route::parse(&args.route)?;
    let session = config.username.as_deref().map(Username::new).transpose()?;
    let api = FixtureApi::new(&config.data_dir, session);

    let state = AppState::new(
        Box::new(api),
        config.settings(),
        route,
        INITIAL_VIEWPORT_HEIGHT,
        Instant::now(),
    );
    let styles = FeedStyles::with_color_config(ColorConfig::from_env_and_args(args.no_color));

    feedview::view::run_app(state, KeyBindings::default(), styles)?;

    Ok(())
}
