//! Rendering surface the navigation engine swaps trees into.

use super::fetch::Fragment;

/// Markup of the built-in not-found view.
pub const NOT_FOUND_MARKUP: &str = "<h1>404 Not Found</h1>";

/// What the view should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibleTree {
    Fragment(Fragment),
    /// Built-in view for sites without a not-found route
    NotFound,
}

impl VisibleTree {
    pub fn markup(&self) -> &str {
        match self {
            Self::Fragment(fragment) => fragment.as_str(),
            Self::NotFound => NOT_FOUND_MARKUP,
        }
    }
}

/// Runs once the new tree is committed.
pub type CommitCallback<'a> = Box<dyn FnOnce() + 'a>;

pub trait ViewSwap {
    /// Replace the visible tree, invoking `on_commit` after the swap is
    /// committed and before returning.
    fn replace_visible_tree(&self, tree: VisibleTree, on_commit: Option<CommitCallback<'_>>);
}
