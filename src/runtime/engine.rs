//! Client-side navigation: resolve, fetch, swap, record history, scroll.
//!
//! # Flow
//!
//! ```text
//! navigate(target) ──> same address? ──yes──> Unchanged
//!        │
//!        ├─ capture scroll offset + current entry key
//!        ├─ resolve route (or not-found route, or built-in view)
//!        ├─ fetch fragment through the cache ──err──> Failed (no history change)
//!        ├─ swap view ──on commit──> save scroll into old entry, push new entry
//!        └─ flush history listeners, restore scroll
//! ```
//!
//! Overlapping navigations are not cancelled. Each one commits when its own
//! fetch settles, so the last to complete determines the visible tree.

use std::cell::Cell;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio_util::sync::CancellationToken;

use super::browser::{Browser, HistoryState, ScrollOffset, new_key};
use super::cache::FragmentCache;
use super::fetch::{FetchError, FragmentFetcher};
use super::history::HistoryStore;
use super::table::{PathData, RouteTable};
use super::url::{Location, decode};
use super::view::{CommitCallback, ViewSwap, VisibleTree};
use crate::route::RouteData;
use crate::{debug, log};

/// Result of a single navigation.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationOutcome {
    /// Target is the current location
    Unchanged,
    /// Fragment rendered; `pushed` tells whether a history entry was added
    Navigated { route: RouteData, pushed: bool },
    /// No matching route and no not-found route: built-in view rendered
    NotFound,
    /// Fragment fetch failed, the previous view stays
    Failed(FetchError),
    /// Target is not a valid URL reference
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPhase {
    Idle,
    Navigating,
}

/// How scroll was restored after a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollRestore {
    Anchor,
    Saved,
    Top,
}

/// Scroll position of the entry being navigated away from.
struct Departure {
    location: Location,
    key: Option<String>,
    offset: ScrollOffset,
}

enum Trigger {
    Push(Departure),
    Pop,
}

/// Decrements the outstanding counter even when the navigation future is
/// dropped mid-fetch.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

pub struct NavigationEngine<B, F, V> {
    routes: RouteTable,
    history: HistoryStore<B>,
    cache: FragmentCache,
    fetcher: F,
    view: V,
    outstanding: AtomicUsize,
}

impl<B, F, V> NavigationEngine<B, F, V>
where
    B: Browser,
    F: FragmentFetcher,
    V: ViewSwap,
{
    pub fn new(routes: RouteTable, browser: Arc<B>, fetcher: F, view: V) -> Self {
        Self {
            routes,
            history: HistoryStore::new(browser),
            cache: FragmentCache::new(),
            fetcher,
            view,
            outstanding: AtomicUsize::new(0),
        }
    }

    #[inline]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    #[inline]
    pub fn history(&self) -> &HistoryStore<B> {
        &self.history
    }

    #[inline]
    pub fn cache(&self) -> &FragmentCache {
        &self.cache
    }

    #[inline]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    #[inline]
    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn phase(&self) -> NavigationPhase {
        if self.outstanding.load(Ordering::Acquire) == 0 {
            NavigationPhase::Idle
        } else {
            NavigationPhase::Navigating
        }
    }

    /// Route matching the current location.
    pub fn current_route(&self) -> Option<PathData> {
        self.routes.resolve(&self.history.snapshot().location)
    }

    /// Navigate to `target`, resolved against the current location.
    pub async fn navigate(&self, target: &str) -> NavigationOutcome {
        let snapshot = self.history.snapshot();
        let location = match snapshot.location.join(target) {
            Ok(location) => location,
            Err(e) => {
                log!("navigate"; "invalid target `{}`: {}", target, e);
                return NavigationOutcome::Invalid(target.to_string());
            }
        };

        if location.same_address(&snapshot.location) {
            debug!("navigate"; "already at {}", location);
            return NavigationOutcome::Unchanged;
        }

        let departure = Departure {
            offset: self.history.browser().scroll_offset(),
            key: snapshot.state.map(|state| state.key),
            location: snapshot.location,
        };
        self.load(location, Trigger::Push(departure)).await
    }

    /// React to the browser moving through history on its own.
    ///
    /// Subscribers hear about the new location however the load ends.
    pub async fn handle_pop_state(&self) -> NavigationOutcome {
        self.history.pop();
        let location = self.history.snapshot().location;
        let outcome = self.load(location, Trigger::Pop).await;
        self.history.flush();
        outcome
    }

    /// Warm the cache for `target`. Failures are logged, never returned.
    pub async fn prefetch(&self, target: &str, signal: &CancellationToken) {
        let Ok(location) = self.history.snapshot().location.join(target) else {
            debug!("prefetch"; "invalid target `{}`", target);
            return;
        };
        let Some(path) = self.routes.resolve(&location) else {
            debug!("prefetch"; "no route for {}", location.pathname());
            return;
        };

        match self.cache.fetch(&path.route.fragment, &self.fetcher, signal).await {
            Ok(_) => debug!("prefetch"; "cached {}", path.route.fragment),
            Err(e) if e.is_aborted() => debug!("prefetch"; "{}", e),
            Err(e) => log!("prefetch"; "{}", e),
        }
    }

    async fn load(&self, location: Location, trigger: Trigger) -> NavigationOutcome {
        let (route, shown) = match self.routes.resolve(&location) {
            Some(path) => (path.route, path.url),
            None => {
                log!("navigate"; "no route found for {}", location.pathname());
                match self.routes.not_found() {
                    // Keep the requested address in the URL bar.
                    Some(route) => (route.clone(), location.display()),
                    None => {
                        self.view.replace_visible_tree(VisibleTree::NotFound, None);
                        return NavigationOutcome::NotFound;
                    }
                }
            }
        };

        let result = {
            let _in_flight = InFlight::start(&self.outstanding);
            let signal = CancellationToken::new();
            self.cache.fetch(&route.fragment, &self.fetcher, &signal).await
        };
        let fragment = match result {
            Ok(fragment) => fragment,
            Err(e) => {
                log!("navigate"; "error fetching {}: {}", route.path, e);
                return NavigationOutcome::Failed(e);
            }
        };

        let target = location.join(&shown).unwrap_or(location);
        let pushed = Cell::new(false);
        let on_commit = match trigger {
            Trigger::Push(departure) if target != self.history.snapshot().location => {
                let commit = || {
                    self.commit_push(departure, &target);
                    pushed.set(true);
                };
                Some(Box::new(commit) as CommitCallback<'_>)
            }
            _ => None,
        };
        self.view.replace_visible_tree(VisibleTree::Fragment(fragment), on_commit);

        self.history.flush();
        self.restore_scroll();
        debug!("navigate"; "showing {} at {}", route.path, shown);

        NavigationOutcome::Navigated {
            route,
            pushed: pushed.get(),
        }
    }

    /// Save the departure scroll into its entry, then push the new one.
    fn commit_push(&self, departure: Departure, target: &Location) {
        let current = self.history.snapshot();
        let still_current = current.location == departure.location
            && current.state.as_ref().map(|state| &state.key) == departure.key.as_ref();
        if still_current {
            let key = departure.key.unwrap_or_else(new_key);
            self.history
                .replace(&current.location, HistoryState::new(key, departure.offset));
        }
        self.history.push(target, HistoryState::fresh());
    }

    /// Scroll to the fragment identifier if its element exists, else to the
    /// saved offsets of the current entry, else to the top.
    pub fn restore_scroll(&self) -> ScrollRestore {
        let snapshot = self.history.snapshot();
        let browser = self.history.browser();

        if let Some(hash) = snapshot.location.hash()
            && browser.scroll_into_view(&decode(hash))
        {
            return ScrollRestore::Anchor;
        }
        match snapshot.state {
            Some(state) => {
                browser.scroll_to(state.offset());
                ScrollRestore::Saved
            }
            None => {
                browser.scroll_to(ScrollOffset::ORIGIN);
                ScrollRestore::Top
            }
        }
    }
}
