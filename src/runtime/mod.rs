//! Client navigation runtime.
//!
//! # Module Structure
//!
//! ```text
//! runtime/
//! ├── url       # Location, route path normalization
//! ├── table     # RouteTable loaded from the artifact
//! ├── browser   # Browser host trait, MemoryBrowser
//! ├── history   # HistoryStore (subscribe / snapshot / flush)
//! ├── fetch     # Fragment, FetchError, FragmentFetcher, DirFetcher
//! ├── cache     # FragmentCache (5 entries, insertion-order eviction)
//! ├── view      # ViewSwap, VisibleTree
//! └── engine    # NavigationEngine
//! ```

mod browser;
mod cache;
mod engine;
mod fetch;
mod history;
mod table;
mod url;
mod view;

#[cfg(test)]
mod testing;
#[cfg(test)]
mod tests;

pub use browser::{Browser, HistoryState, MemoryBrowser, ScrollEvent, ScrollOffset, new_key};
pub use cache::{FRAGMENT_CACHE_CAPACITY, FragmentCache, FragmentEntry};
pub use engine::{NavigationEngine, NavigationOutcome, NavigationPhase, ScrollRestore};
pub use fetch::{DirFetcher, FetchError, Fragment, FragmentFetcher};
pub use history::{HistorySnapshot, HistoryStore, Subscription};
pub use table::{NOT_FOUND_PATH, PathData, RouteTable};
pub use url::{Location, decode, normalize_route_path};
pub use view::{CommitCallback, NOT_FOUND_MARKUP, ViewSwap, VisibleTree};
