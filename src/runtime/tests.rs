//! Navigation engine tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio_util::sync::CancellationToken;

use super::testing::{RecordingView, StubFetcher};
use super::*;
use crate::route::{RouteData, normalize};

type TestEngine = NavigationEngine<MemoryBrowser, StubFetcher, RecordingView>;

fn route(path: &str) -> RouteData {
    let file = match path {
        "/" => "index.tsx".to_string(),
        _ => format!("{}.tsx", path.trim_start_matches('/')),
    };
    normalize(&file).unwrap().into()
}

fn engine(paths: &[&str]) -> (TestEngine, Arc<MemoryBrowser>) {
    let routes: Vec<RouteData> = paths.iter().map(|p| route(p)).collect();
    let addresses: Vec<&str> = routes.iter().map(|r| r.fragment.as_str()).collect();
    let fetcher = StubFetcher::serving(&addresses);

    let browser = Arc::new(MemoryBrowser::open("http://localhost/").unwrap());
    let engine = NavigationEngine::new(
        RouteTable::new(routes),
        Arc::clone(&browser),
        fetcher,
        RecordingView::default(),
    );
    (engine, browser)
}

fn navigated(outcome: &NavigationOutcome) -> (&str, bool) {
    match outcome {
        NavigationOutcome::Navigated { route, pushed } => (route.path.as_str(), *pushed),
        other => panic!("expected navigation, got {other:?}"),
    }
}

fn fetcher(engine: &TestEngine) -> &StubFetcher {
    engine.fetcher()
}

fn count_notifications(engine: &TestEngine) -> (Arc<AtomicUsize>, Subscription) {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&count);
    let sub = engine.history().subscribe(move || {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    (count, sub)
}

#[tokio::test]
async fn test_navigate_fetches_and_pushes_once() {
    let (engine, browser) = engine(&["/", "/about"]);

    let outcome = engine.navigate("/about").await;
    assert_eq!(navigated(&outcome), ("/about", true));
    assert_eq!(fetcher(&engine).calls(), vec!["/about.rsc"]);
    assert_eq!(browser.pushes(), 1);
    assert_eq!(browser.location().pathname(), "/about");
    assert_eq!(
        engine.view().last_markup().unwrap(),
        StubFetcher::body("/about.rsc")
    );

    assert_eq!(engine.navigate("/about").await, NavigationOutcome::Unchanged);
    assert_eq!(fetcher(&engine).calls().len(), 1);
    assert_eq!(browser.pushes(), 1);
}

#[tokio::test]
async fn test_navigate_relative_target() {
    let (engine, browser) = engine(&["/", "/docs/intro", "/docs/setup"]);

    engine.navigate("/docs/intro").await;
    let outcome = engine.navigate("setup").await;
    assert_eq!(navigated(&outcome).0, "/docs/setup");
    assert_eq!(browser.location().pathname(), "/docs/setup");
}

#[tokio::test]
async fn test_trailing_slash_is_normalized_in_url() {
    let (engine, browser) = engine(&["/", "/blog"]);

    let outcome = engine.navigate("/blog/").await;
    assert_eq!(navigated(&outcome), ("/blog", true));
    assert_eq!(browser.location().pathname(), "/blog");
}

#[tokio::test]
async fn test_trailing_slash_at_current_location_is_unchanged() {
    let (engine, browser) = engine(&["/", "/blog"]);

    engine.navigate("/blog").await;
    assert_eq!(engine.navigate("/blog/").await, NavigationOutcome::Unchanged);
    assert_eq!(engine.navigate("/blog/index").await, NavigationOutcome::Unchanged);
    assert_eq!(engine.view().trees().len(), 1);
    assert_eq!(browser.pushes(), 1);

    let outcome = engine.navigate("/blog#comments").await;
    assert_eq!(navigated(&outcome), ("/blog", true));
}

#[tokio::test]
async fn test_missing_route_without_fallback() {
    let (engine, browser) = engine(&["/", "/about"]);

    assert_eq!(engine.navigate("/missing").await, NavigationOutcome::NotFound);
    assert_eq!(engine.view().trees(), vec![VisibleTree::NotFound]);
    assert_eq!(engine.view().last_markup().unwrap(), NOT_FOUND_MARKUP);
    assert!(fetcher(&engine).calls().is_empty());
    assert_eq!(browser.pushes(), 0);
    assert_eq!(browser.replaces(), 0);
    assert_eq!(browser.location().pathname(), "/");
}

#[tokio::test]
async fn test_missing_route_uses_not_found_route() {
    let (engine, browser) = engine(&["/", "/404"]);

    let outcome = engine.navigate("/missing?ref=nav").await;
    assert_eq!(navigated(&outcome), ("/404", true));
    assert_eq!(fetcher(&engine).calls(), vec!["/404.rsc"]);
    assert_eq!(browser.location().pathname(), "/missing");
    assert_eq!(browser.location().search(), Some("ref=nav"));
}

#[tokio::test]
async fn test_fetch_failure_leaves_history_untouched() {
    let (engine, browser) = engine(&["/", "/about"]);
    fetcher(&engine).fail("/about.rsc");

    let outcome = engine.navigate("/about").await;
    assert!(matches!(outcome, NavigationOutcome::Failed(FetchError::Failed { .. })));
    assert!(engine.view().trees().is_empty());
    assert!(!engine.cache().contains("/about.rsc"));
    assert_eq!(browser.pushes(), 0);
    assert_eq!(browser.replaces(), 0);
    assert_eq!(engine.phase(), NavigationPhase::Idle);

    fetcher(&engine).recover("/about.rsc");
    let outcome = engine.navigate("/about").await;
    assert_eq!(navigated(&outcome), ("/about", true));
    assert_eq!(fetcher(&engine).calls().len(), 2);
}

#[tokio::test]
async fn test_scroll_saved_on_push_and_restored_on_pop() {
    let (engine, browser) = engine(&["/", "/about"]);
    browser.set_scroll(ScrollOffset::new(50.0, 100.0));

    engine.navigate("/about").await;
    assert_eq!(browser.last_scroll(), Some(ScrollEvent::To(ScrollOffset::ORIGIN)));
    assert_eq!(browser.replaces(), 1);

    assert!(browser.back());
    let outcome = engine.handle_pop_state().await;
    assert_eq!(navigated(&outcome), ("/", false));
    assert_eq!(
        browser.last_scroll(),
        Some(ScrollEvent::To(ScrollOffset::new(50.0, 100.0)))
    );
    assert_eq!(browser.pushes(), 1);
}

#[tokio::test]
async fn test_pop_reuses_cached_fragment() {
    let (engine, browser) = engine(&["/", "/about"]);

    engine.navigate("/about").await;
    browser.back();
    engine.handle_pop_state().await;
    browser.forward();
    engine.handle_pop_state().await;

    assert_eq!(fetcher(&engine).calls(), vec!["/about.rsc", "/index.rsc"]);
    assert_eq!(browser.len(), 2);
}

#[tokio::test]
async fn test_hash_scrolls_element_into_view() {
    let (engine, browser) = engine(&["/", "/blog"]);
    browser.add_anchor("section1");

    engine.navigate("/blog#section1").await;
    assert_eq!(
        browser.last_scroll(),
        Some(ScrollEvent::IntoView("section1".into()))
    );
    assert_eq!(engine.restore_scroll(), ScrollRestore::Anchor);
}

#[tokio::test]
async fn test_hash_without_element_falls_back() {
    let (engine, browser) = engine(&["/", "/blog"]);

    engine.navigate("/blog#nowhere").await;
    assert_eq!(browser.last_scroll(), Some(ScrollEvent::To(ScrollOffset::ORIGIN)));
    assert_eq!(engine.restore_scroll(), ScrollRestore::Saved);
}

#[tokio::test]
async fn test_restore_scroll_without_state_goes_to_top() {
    let (engine, browser) = engine(&["/"]);
    browser.set_scroll(ScrollOffset::new(0.0, 300.0));

    assert_eq!(engine.restore_scroll(), ScrollRestore::Top);
    assert_eq!(browser.scroll_offset(), ScrollOffset::ORIGIN);
}

#[tokio::test]
async fn test_last_to_complete_wins() {
    let (engine, browser) = engine(&["/", "/slow", "/fast"]);
    let slow_gate = fetcher(&engine).gate("/slow.rsc");

    let (slow, fast) = tokio::join!(engine.navigate("/slow"), async {
        let outcome = engine.navigate("/fast").await;
        slow_gate.notify_one();
        outcome
    });

    assert_eq!(navigated(&fast), ("/fast", true));
    assert_eq!(navigated(&slow), ("/slow", true));
    assert_eq!(browser.location().pathname(), "/slow");
    assert_eq!(
        engine.view().last_markup().unwrap(),
        StubFetcher::body("/slow.rsc")
    );
    assert_eq!(browser.pushes(), 2);
}

#[tokio::test]
async fn test_phase_while_fetching() {
    let (engine, _browser) = engine(&["/", "/about"]);
    let gate = fetcher(&engine).gate("/about.rsc");

    let (outcome, during) = tokio::join!(engine.navigate("/about"), async {
        tokio::task::yield_now().await;
        let phase = engine.phase();
        gate.notify_one();
        phase
    });

    assert_eq!(during, NavigationPhase::Navigating);
    assert_eq!(engine.phase(), NavigationPhase::Idle);
    assert_eq!(navigated(&outcome).0, "/about");
}

#[tokio::test]
async fn test_prefetch_shares_cache() {
    let (engine, _browser) = engine(&["/", "/about"]);

    engine.prefetch("/about", &CancellationToken::new()).await;
    assert!(engine.cache().contains("/about.rsc"));

    engine.navigate("/about").await;
    assert_eq!(fetcher(&engine).calls(), vec!["/about.rsc"]);
}

#[tokio::test]
async fn test_prefetch_swallows_errors() {
    let (engine, browser) = engine(&["/", "/about"]);
    let signal = CancellationToken::new();
    signal.cancel();

    engine.prefetch("/about", &signal).await;
    engine.prefetch("/missing", &CancellationToken::new()).await;

    assert!(engine.cache().is_empty());
    assert!(engine.view().trees().is_empty());
    assert_eq!(browser.pushes(), 0);
}

#[tokio::test]
async fn test_listeners_notified_once_per_navigation() {
    let (engine, _browser) = engine(&["/", "/about"]);
    let (count, sub) = count_notifications(&engine);

    engine.navigate("/about").await;
    assert_eq!(count.load(Ordering::SeqCst), 1);

    engine.navigate("/about").await;
    assert_eq!(count.load(Ordering::SeqCst), 1);

    sub.unsubscribe();
    engine.navigate("/").await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_pop_into_failed_fetch_notifies_listeners() {
    let (engine, browser) = engine(&["/", "/about"]);
    let (count, _sub) = count_notifications(&engine);

    engine.navigate("/about").await;
    assert_eq!(count.load(Ordering::SeqCst), 1);

    fetcher(&engine).fail("/index.rsc");
    assert!(browser.back());
    let outcome = engine.handle_pop_state().await;
    assert!(matches!(outcome, NavigationOutcome::Failed(_)));
    assert_eq!(browser.location().pathname(), "/");
    assert_eq!(count.load(Ordering::SeqCst), 2);
    assert!(!engine.history().has_pending());
}

#[tokio::test]
async fn test_pop_into_missing_route_notifies_listeners() {
    let (engine, browser) = engine(&["/", "/about"]);
    let gone = browser.location().join("/gone").unwrap();
    browser.push_state(HistoryState::fresh(), &gone);
    assert!(browser.back());

    let (count, _sub) = count_notifications(&engine);
    assert!(browser.forward());
    assert_eq!(engine.handle_pop_state().await, NavigationOutcome::NotFound);
    assert_eq!(engine.view().trees(), vec![VisibleTree::NotFound]);
    assert_eq!(browser.location().pathname(), "/gone");
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(!engine.history().has_pending());
}

#[tokio::test]
async fn test_current_route() {
    let (engine, _browser) = engine(&["/", "/about"]);
    assert_eq!(engine.current_route().unwrap().route.path, "/");

    engine.navigate("/about#team").await;
    let current = engine.current_route().unwrap();
    assert_eq!(current.route.path, "/about");
    assert_eq!(current.url, "/about#team");
}

#[tokio::test]
async fn test_invalid_target() {
    let (engine, browser) = engine(&["/"]);
    let outcome = engine.navigate("http://[::1").await;
    assert!(matches!(outcome, NavigationOutcome::Invalid(_)));
    assert_eq!(browser.pushes(), 0);
}
