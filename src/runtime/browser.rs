//! Browser host interface and an in-memory implementation.
//!
//! The engine never touches a real window: everything it needs from the
//! host (location, session history, scrolling) goes through [`Browser`].

use parking_lot::Mutex;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::url::Location;

/// Scroll position of the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

impl ScrollOffset {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// State stored alongside a session history entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryState {
    /// Unique per entry, never reused
    pub key: String,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

impl HistoryState {
    pub fn new(key: impl Into<String>, offset: ScrollOffset) -> Self {
        Self {
            key: key.into(),
            scroll_x: offset.x,
            scroll_y: offset.y,
        }
    }

    /// Fresh entry at the top of the page.
    pub fn fresh() -> Self {
        Self::new(new_key(), ScrollOffset::ORIGIN)
    }

    #[inline]
    pub fn offset(&self) -> ScrollOffset {
        ScrollOffset::new(self.scroll_x, self.scroll_y)
    }
}

/// Generate a new history entry key.
pub fn new_key() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Host operations the navigation engine depends on.
pub trait Browser {
    fn location(&self) -> Location;

    /// State of the current history entry.
    fn history_state(&self) -> Option<HistoryState>;

    /// Append an entry after the current one, dropping any forward entries.
    fn push_state(&self, state: HistoryState, location: &Location);

    /// Overwrite the current entry.
    fn replace_state(&self, state: HistoryState, location: &Location);

    fn scroll_offset(&self) -> ScrollOffset;

    fn scroll_to(&self, offset: ScrollOffset);

    /// Scroll the element with this id into view. Returns false when no such
    /// element exists.
    fn scroll_into_view(&self, id: &str) -> bool;
}

/// Scroll operation performed on a [`MemoryBrowser`].
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollEvent {
    To(ScrollOffset),
    IntoView(String),
}

#[derive(Debug, Clone)]
struct Entry {
    location: Location,
    state: Option<HistoryState>,
}

#[derive(Debug)]
struct Session {
    entries: Vec<Entry>,
    index: usize,
    scroll: ScrollOffset,
    anchors: FxHashSet<String>,
    pushes: usize,
    replaces: usize,
    scroll_events: Vec<ScrollEvent>,
}

impl Session {
    fn current(&self) -> &Entry {
        &self.entries[self.index]
    }
}

/// Session history kept in memory. Used by the `navigate` command and tests.
#[derive(Debug)]
pub struct MemoryBrowser {
    session: Mutex<Session>,
}

impl MemoryBrowser {
    pub fn new(location: Location) -> Self {
        Self {
            session: Mutex::new(Session {
                entries: vec![Entry {
                    location,
                    state: None,
                }],
                index: 0,
                scroll: ScrollOffset::ORIGIN,
                anchors: FxHashSet::default(),
                pushes: 0,
                replaces: 0,
                scroll_events: Vec::new(),
            }),
        }
    }

    pub fn open(href: &str) -> Result<Self, url::ParseError> {
        Location::parse(href).map(Self::new)
    }

    /// Move to the previous entry, like the back button. The caller is
    /// responsible for dispatching the resulting pop event.
    pub fn back(&self) -> bool {
        let mut session = self.session.lock();
        if session.index == 0 {
            return false;
        }
        session.index -= 1;
        true
    }

    pub fn forward(&self) -> bool {
        let mut session = self.session.lock();
        if session.index + 1 >= session.entries.len() {
            return false;
        }
        session.index += 1;
        true
    }

    /// Simulate the user scrolling.
    pub fn set_scroll(&self, offset: ScrollOffset) {
        self.session.lock().scroll = offset;
    }

    /// Register an element id that can be scrolled into view.
    pub fn add_anchor(&self, id: impl Into<String>) {
        self.session.lock().anchors.insert(id.into());
    }

    /// Entries in the session history; the initial entry always exists.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.session.lock().entries.len()
    }

    pub fn pushes(&self) -> usize {
        self.session.lock().pushes
    }

    pub fn replaces(&self) -> usize {
        self.session.lock().replaces
    }

    pub fn scroll_events(&self) -> Vec<ScrollEvent> {
        self.session.lock().scroll_events.clone()
    }

    pub fn last_scroll(&self) -> Option<ScrollEvent> {
        self.session.lock().scroll_events.last().cloned()
    }
}

impl Browser for MemoryBrowser {
    fn location(&self) -> Location {
        self.session.lock().current().location.clone()
    }

    fn history_state(&self) -> Option<HistoryState> {
        self.session.lock().current().state.clone()
    }

    fn push_state(&self, state: HistoryState, location: &Location) {
        let mut session = self.session.lock();
        let next = session.index + 1;
        session.entries.truncate(next);
        session.entries.push(Entry {
            location: location.clone(),
            state: Some(state),
        });
        session.index = next;
        session.pushes += 1;
    }

    fn replace_state(&self, state: HistoryState, location: &Location) {
        let mut session = self.session.lock();
        let index = session.index;
        session.entries[index] = Entry {
            location: location.clone(),
            state: Some(state),
        };
        session.replaces += 1;
    }

    fn scroll_offset(&self) -> ScrollOffset {
        self.session.lock().scroll
    }

    fn scroll_to(&self, offset: ScrollOffset) {
        let mut session = self.session.lock();
        session.scroll = offset;
        session.scroll_events.push(ScrollEvent::To(offset));
    }

    fn scroll_into_view(&self, id: &str) -> bool {
        let mut session = self.session.lock();
        if !session.anchors.contains(id) {
            return false;
        }
        session.scroll_events.push(ScrollEvent::IntoView(id.to_string()));
        true
    }
}
