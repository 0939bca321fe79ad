//! Lifecycle tests across sessions, sync and notifications using mocks.

use std::sync::Arc;

use gamesearch_core::testing::{fixtures, Endpoint, MockGameApi, MockReply};
use gamesearch_core::{
    GameResult, ListStatus, NotificationCenter, NotificationLevel, SearchMode, SearchOutcome,
    SearchSession, SyncOrchestrator, SyncOutcome,
};

struct Page {
    api: Arc<MockGameApi>,
    index: Arc<SearchSession>,
    web: Arc<SearchSession>,
    notifications: Arc<NotificationCenter>,
    sync: SyncOrchestrator,
}

fn page() -> Page {
    let api = Arc::new(MockGameApi::new());
    let index = Arc::new(SearchSession::new(SearchMode::Index, api.clone()));
    let web = Arc::new(SearchSession::new(SearchMode::Web, api.clone()));
    let notifications = Arc::new(NotificationCenter::default());
    let sync = SyncOrchestrator::new(api.clone(), Arc::clone(&index), Arc::clone(&notifications));
    Page {
        api,
        index,
        web,
        notifications,
        sync,
    }
}

/// Wait until a detached search has written its result.
async fn settle(session: &SearchSession) {
    while session.snapshot().is_loading {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_search_sync_refresh_lifecycle() {
    let p = page();

    // Initial search shows one game
    p.api
        .push_index(MockReply::ok(vec![fixtures::indexed_game("1", "Celeste")]))
        .await;
    p.index.set_query("celeste");
    assert_eq!(p.index.run_search().await, SearchOutcome::Succeeded { count: 1 });
    assert!(matches!(
        p.index.snapshot().list_status(),
        ListStatus::Results { count: 1, .. }
    ));

    // Sync succeeds and the refreshed search finds a second game
    p.api.push_sync(MockReply::ok_null()).await;
    let release = p
        .api
        .push_index_gated(MockReply::ok(vec![
            fixtures::indexed_game("1", "Celeste"),
            fixtures::indexed_game("2", "Celeste Farewell"),
        ]))
        .await;

    let outcome = p.sync.sync().await;
    assert!(matches!(outcome, SyncOutcome::Synced { refreshed: true, .. }));
    assert!(!p.sync.is_syncing());

    // The refresh is in flight: old results stay until it resolves
    let during = p.index.snapshot();
    assert!(during.is_loading);
    assert_eq!(during.results.len(), 1);

    release.send(()).unwrap();
    settle(&p.index).await;

    let after = p.index.snapshot();
    assert_eq!(after.results.len(), 2);
    assert_eq!(
        after.list_status(),
        ListStatus::Results {
            count: 2,
            label: "Found 2 games".to_string()
        }
    );

    let recent = p.notifications.recent();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].level, NotificationLevel::Success);

    // The web session never heard about any of it
    assert!(!p.web.snapshot().has_searched);
    assert!(p.api.calls_to(Endpoint::SearchWeb).await.is_empty());
}

#[tokio::test]
async fn test_failed_refresh_clears_results() {
    let p = page();
    p.api
        .push_index(MockReply::ok(vec![fixtures::indexed_game("1", "Celeste")]))
        .await;
    p.index.set_query("celeste");
    p.index.run_search().await;

    p.api.push_sync(MockReply::ok_null()).await;
    p.api.push_index(MockReply::transport_failure()).await;
    p.sync.sync().await;

    p.api.wait_for_calls(3).await;
    settle(&p.index).await;

    let state = p.index.snapshot();
    assert!(state.results.is_empty());
    assert_eq!(
        state.error.as_deref(),
        Some(SearchMode::Index.connectivity_error())
    );
    // The sync itself still reported success
    assert_eq!(p.notifications.recent()[0].level, NotificationLevel::Success);
}

#[tokio::test]
async fn test_web_results_carry_their_variant() {
    let p = page();
    p.api
        .push_web(MockReply::ok(vec![
            fixtures::web_game("Celeste"),
            fixtures::web_game("Celeste 64"),
        ]))
        .await;

    p.web.set_query("celeste");
    p.web.run_search().await;

    let state = p.web.snapshot();
    assert!(state
        .results
        .iter()
        .all(|r| matches!(r, GameResult::Web(_))));
    let keys: Vec<String> = state
        .results
        .iter()
        .enumerate()
        .map(|(i, r)| r.display_key(i))
        .collect();
    assert_ne!(keys[0], keys[1]);
}
