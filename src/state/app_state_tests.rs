//! Tests for AppState page lifecycle, scroll saving and restoration.

use super::*;
use crate::model::{FeedItem, PageKey, TabKey};
use crate::pages::LoadStatus;
use crate::test_harness::{count_calls, post, posts, user, FakeApi};

const HEIGHT: u32 = 20;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn big_pages() -> Settings {
    Settings {
        page_size: 200,
        ..Settings::default()
    }
}

fn start(api: FakeApi, settings: Settings, route: Route) -> (AppState, Instant) {
    let t0 = Instant::now();
    (AppState::new(Box::new(api), settings, route, HEIGHT, t0), t0)
}

fn root() -> PageKey {
    PageKey::for_path("/")
}

// ===== Cache-hit policy =====

#[test]
fn remount_serves_home_from_cache_without_fetch() {
    let api = FakeApi::new(posts(5));
    let log = api.call_log();
    let (mut state, t0) = start(api, Settings::default(), Route::Home);
    assert_eq!(state.page().status(), LoadStatus::Fetched);

    state.navigate(Route::Search, t0);
    assert!(state.back(t0));

    assert_eq!(count_calls(&log, "posts:0"), 1, "fetched at most once per session");
    assert_eq!(state.page().status(), LoadStatus::FromCache);
    assert_eq!(state.page().items().len(), 5);
}

#[test]
fn following_tab_round_trip_keeps_data() {
    let following = vec![post(2, "bob"), post(1, "carol")];
    let api = FakeApi::new(posts(3)).logged_in("alice", following.clone());
    let log = api.call_log();
    let (mut state, t0) = start(api, Settings::default(), Route::Home);

    state.select_tab(1, t0);
    assert_eq!(state.page().active_tab(), &TabKey::following());

    state.navigate(Route::Notifications, t0);
    state.back(t0);

    assert_eq!(state.page().active_tab(), &TabKey::following(), "tab remembered");
    let expected: Vec<FeedItem> = following.into_iter().map(FeedItem::Post).collect();
    assert_eq!(state.page().items(), expected.as_slice());
    assert_eq!(
        state
            .cache()
            .get_tab_state(&PageKey::home(), &TabKey::following())
            .and_then(|s| s.data.clone()),
        Some(expected)
    );
    assert_eq!(count_calls(&log, "following"), 1);
}

#[test]
fn fetch_failure_leaves_page_empty_and_uncached() {
    let api = FakeApi::new(posts(5));
    api.failure_switch().set(true);
    let (state, _) = start(api, Settings::default(), Route::Home);

    assert_eq!(state.page().status(), LoadStatus::Failed);
    assert!(state.page().items().is_empty());
    assert!(!state.page().has_more());
    assert!(state
        .cache()
        .get_tab_state(&PageKey::home(), &TabKey::home())
        .is_none());
}

// ===== Restoration =====

#[test]
fn tab_offset_wins_over_page_offset() {
    let (mut state, t0) = start(FakeApi::new(posts(400)), Settings {
        page_size: 400,
        ..Settings::default()
    }, Route::Home);
    // Leaving home records its own offsets, so seed them while away.
    state.navigate(Route::Search, t0);
    state
        .cache
        .save_scroll_position(&PageKey::home(), &TabKey::home(), 400);
    state.cache.save_page_scroll_position(&root(), 900);
    state.back(t0);

    state.frame(t0 + ms(150));
    assert_eq!(state.viewport().offset(), 400);
}

#[test]
fn page_offset_is_used_without_tab_offset() {
    let (mut state, t0) = start(FakeApi::new(posts(400)), Settings {
        page_size: 400,
        ..Settings::default()
    }, Route::Home);
    state.navigate(Route::Search, t0);
    state.cache.save_page_scroll_position(&root(), 900);
    state.back(t0);

    state.frame(t0 + ms(150));
    assert_eq!(state.viewport().offset(), 900);
}

#[test]
fn restoration_waits_for_mount_delay() {
    let (mut state, t0) = start(FakeApi::new(posts(200)), big_pages(), Route::Home);
    state.scroll_by(60);
    state.frame(t0);
    state.navigate(Route::Search, t0);
    state.back(t0);

    assert_eq!(state.viewport().offset(), 0, "not restored synchronously");
    state.frame(t0 + ms(149));
    assert_eq!(state.viewport().offset(), 0);
    state.frame(t0 + ms(150));
    assert_eq!(state.viewport().offset(), 60);
    assert_eq!(state.pending_restores(), 0);
}

#[test]
fn restore_of_unmounted_page_is_discarded() {
    let (mut state, t0) = start(FakeApi::new(posts(200)), big_pages(), Route::Home);
    state.scroll_by(60);
    state.navigate(Route::Search, t0);
    state.back(t0);
    state.navigate(Route::Search, t0 + ms(10));

    state.frame(t0 + ms(500));
    assert_eq!(state.page().route(), &Route::Search);
    assert_eq!(state.viewport().offset(), 0);
    assert_eq!(state.pending_restores(), 0);
}

#[test]
fn leaving_before_restore_fires_keeps_saved_offset() {
    let (mut state, t0) = start(FakeApi::new(posts(200)), big_pages(), Route::Home);
    state.scroll_by(60);
    state.frame(t0);
    state.navigate(Route::Search, t0);
    state.back(t0);

    // Away again while the 150ms restore is still pending.
    state.navigate(Route::Search, t0 + ms(20));
    assert_eq!(
        state
            .cache()
            .tab_scroll_position(&PageKey::home(), &TabKey::home()),
        Some(60)
    );
    assert_eq!(state.cache().page_scroll_position(&root()), Some(60));

    state.back(t0 + ms(40));
    state.frame(t0 + ms(400));
    assert_eq!(state.viewport().offset(), 60);
}

#[test]
fn switching_tabs_before_tab_restore_fires_keeps_saved_offset() {
    let api = FakeApi::new(posts(200)).logged_in("alice", posts(100));
    let (mut state, t0) = start(api, big_pages(), Route::Home);
    state.scroll_by(30);
    state.frame(t0);
    state.select_tab(1, t0);
    state.scroll_to_top();
    state.scroll_by(12);
    state.frame(t0);
    state.select_tab(0, t0);

    // Back to following inside the 50ms tab delay, then home again.
    state.select_tab(1, t0 + ms(10));
    assert_eq!(
        state
            .cache()
            .tab_scroll_position(&PageKey::home(), &TabKey::home()),
        Some(30)
    );

    state.select_tab(0, t0 + ms(20));
    state.frame(t0 + ms(100));
    assert_eq!(state.viewport().offset(), 30);
}

#[test]
fn content_ready_trigger_restores_after_render() {
    let settings = Settings {
        page_size: 200,
        mount_restore: RestoreTrigger::ContentReady,
        tab_restore: RestoreTrigger::ContentReady,
    };
    let (mut state, t0) = start(FakeApi::new(posts(200)), settings, Route::Home);
    state.scroll_by(30);
    state.navigate(Route::Search, t0);
    state.back(t0);

    state.frame(t0 + ms(10_000));
    assert_eq!(state.viewport().offset(), 0, "no render signal yet");

    state.content_rendered();
    state.frame(t0 + ms(10_000));
    assert_eq!(state.viewport().offset(), 30);
}

// ===== Scroll coalescing =====

#[test]
fn hundred_scroll_events_in_a_frame_write_once() {
    let (mut state, t0) = start(FakeApi::new(posts(200)), big_pages(), Route::Home);
    for _ in 0..100 {
        state.scroll_by(1);
    }
    assert_eq!(state.scroll_writes(), 0, "nothing written before the frame");
    state.frame(t0);
    assert_eq!(state.scroll_writes(), 1);
    assert_eq!(
        state
            .cache()
            .tab_scroll_position(&PageKey::home(), &TabKey::home()),
        Some(100)
    );
    assert_eq!(state.cache().page_scroll_position(&root()), Some(100));
}

#[test]
fn frame_without_scroll_writes_nothing() {
    let (mut state, t0) = start(FakeApi::new(posts(200)), big_pages(), Route::Home);
    state.frame(t0);
    state.frame(t0 + ms(16));
    assert_eq!(state.scroll_writes(), 0);
}

// ===== Tabs =====

#[test]
fn tab_switch_saves_current_and_restores_target_after_tab_delay() {
    let following = posts(100);
    let api = FakeApi::new(posts(200)).logged_in("alice", following);
    let (mut state, t0) = start(api, big_pages(), Route::Home);

    state.scroll_by(90);
    state.select_tab(1, t0);
    assert_eq!(
        state
            .cache()
            .tab_scroll_position(&PageKey::home(), &TabKey::home()),
        Some(90),
        "outgoing tab saved immediately"
    );

    state.scroll_to_top();
    state.scroll_by(12);
    state.frame(t0);
    state.select_tab(0, t0);

    state.frame(t0 + ms(49));
    assert_ne!(state.viewport().offset(), 90);
    state.frame(t0 + ms(50));
    assert_eq!(state.viewport().offset(), 90);
}

#[test]
fn anonymous_home_has_single_tab() {
    let (mut state, t0) = start(FakeApi::new(posts(3)), Settings::default(), Route::Home);
    assert_eq!(state.page().tabs(), &[TabKey::home()]);
    state.next_tab(t0);
    assert_eq!(state.page().active_index(), 0);
}

// ===== Pagination =====

#[test]
fn reaching_the_end_loads_next_pages_until_empty() {
    let api = FakeApi::new(posts(12));
    let log = api.call_log();
    let settings = Settings {
        page_size: 5,
        ..Settings::default()
    };
    let t0 = Instant::now();
    let mut state = AppState::new(Box::new(api), settings, Route::Home, 100, t0);
    assert_eq!(state.page().items().len(), 5);

    state.frame(t0);
    assert_eq!(state.page().items().len(), 10);
    state.frame(t0);
    assert_eq!(state.page().items().len(), 12);
    state.frame(t0);
    assert!(!state.page().has_more());
    state.frame(t0);

    assert_eq!(count_calls(&log, "posts:"), 4);
    assert_eq!(
        state
            .cache()
            .cached_data(&PageKey::home(), &TabKey::home())
            .map(Vec::len),
        Some(12)
    );
}

// ===== Navigation =====

#[test]
fn open_selected_goes_to_author_profile() {
    let (mut state, t0) = start(FakeApi::new(posts(10)), Settings::default(), Route::Home);
    state.scroll_by(3); // second item
    let author = match &state.page().items()[1] {
        FeedItem::Post(p) => p.username.clone(),
        other => panic!("unexpected item {other:?}"),
    };

    state.open_selected(t0);
    assert_eq!(state.page().route(), &Route::Profile(author));
    assert_eq!(state.history_len(), 1);
}

#[test]
fn open_selected_post_follows_posts_and_notifications() {
    let (mut state, t0) = start(FakeApi::new(posts(10)), Settings::default(), Route::Home);
    state.scroll_by(3);
    state.open_selected_post(t0);
    assert_eq!(state.page().route(), &Route::Post(9));
    assert_eq!(state.page().items().len(), 3, "post plus two comments");

    // Follow notifications link to no post.
    let api = FakeApi::new(posts(1)).logged_in("alice", Vec::new());
    let (mut state, t0) = start(api, Settings::default(), Route::Notifications);
    state.open_selected_post(t0);
    assert_eq!(state.page().route(), &Route::Notifications);
}

#[test]
fn follow_toggle_survives_remount() {
    let api = FakeApi::new(posts(3)).logged_in("alice", Vec::new());
    let (mut state, t0) = start(api, Settings::default(), Route::Profile(user("bob")));
    state.toggle_follow();
    assert!(state.page().profile().unwrap().is_following);

    state.navigate(Route::Home, t0);
    state.back(t0);
    assert!(state.page().profile().unwrap().is_following, "header refetched");
}

#[test]
fn back_with_empty_history_is_refused() {
    let (mut state, t0) = start(FakeApi::new(posts(1)), Settings::default(), Route::Home);
    assert!(!state.back(t0));
}

#[test]
fn navigating_to_current_route_is_noop() {
    let (mut state, t0) = start(FakeApi::new(posts(1)), Settings::default(), Route::Home);
    state.navigate(Route::Home, t0);
    assert_eq!(state.history_len(), 0);
}

#[test]
fn own_profile_requires_session() {
    let (mut state, t0) = start(FakeApi::new(posts(1)), Settings::default(), Route::Home);
    state.open_own_profile(t0);
    assert_eq!(state.page().route(), &Route::Home);

    let api = FakeApi::new(posts(1)).logged_in("alice", Vec::new());
    let (mut state, t0) = start(api, Settings::default(), Route::Home);
    state.open_own_profile(t0);
    assert_eq!(state.page().route(), &Route::Profile(user("alice")));
}

// ===== Search =====

#[test]
fn search_query_and_results_survive_navigation() {
    let api = FakeApi::new(posts(1));
    let log = api.call_log();
    let (mut state, t0) = start(api, Settings::default(), Route::Search);
    assert_eq!(state.page().items().len(), 3, "empty query lists everyone");

    state.start_search();
    for ch in "bo".chars() {
        let input = std::mem::take(&mut state.query_input);
        state.query_input = search_input::handle_char_input(input, ch);
    }
    state.submit_search();
    assert_eq!(state.page().search_query(), "bo");
    assert_eq!(state.page().items().len(), 1);

    state.navigate(Route::Home, t0);
    state.back(t0);

    assert_eq!(state.page().search_query(), "bo");
    assert_eq!(state.page().items().len(), 1);
    assert_eq!(count_calls(&log, "search:bo"), 1);
}

#[test]
fn refresh_refetches_active_tab() {
    let api = FakeApi::new(posts(4));
    let log = api.call_log();
    let (mut state, _) = start(api, Settings::default(), Route::Home);
    state.refresh();
    assert_eq!(count_calls(&log, "posts:0"), 2);
    assert_eq!(state.page().status(), LoadStatus::Fetched);
}
