//! Route graph construction from page source paths.
//!
//! ```text
//! "blog/post.mdx" ──normalize──> NormalizedPath { /blog/post, post, /blog/post.html, /blog/post.rsc }
//!        │
//!        └──build_route_tree──> RouteNode("/") ──flatten──> [RouteData] ──build_lookup──> RoutesByAddress
//! ```

mod error;
mod index;
mod normalize;
mod tree;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use error::RouteError;
pub use index::{build_lookup, flatten};
pub use normalize::{
    DOCUMENT_SUFFIX, FRAGMENT_SUFFIX, NormalizedPath, PAGE_EXTENSIONS, ROOT_PATH, ROOT_SLUG,
    is_page_file, normalize, strip_extension,
};
pub use tree::build_route_tree;

/// A single route without its subtree.
///
/// Serialized field names follow the generated artifact (`html`/`rsc`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteData {
    /// Canonical route path (e.g. `/blog/post`, root is `/`)
    pub path: String,
    /// Final path segment, [`ROOT_SLUG`] for the root
    pub slug: String,
    /// Address of the fully rendered document (e.g. `/blog/post.html`)
    #[serde(rename = "html")]
    pub document: String,
    /// Address of the pre-rendered fragment (e.g. `/blog/post.rsc`)
    #[serde(rename = "rsc")]
    pub fragment: String,
}

impl RouteData {
    #[inline]
    pub fn is_root(&self) -> bool {
        self.path == ROOT_PATH
    }
}

impl From<NormalizedPath> for RouteData {
    fn from(normalized: NormalizedPath) -> Self {
        Self {
            path: normalized.path,
            slug: normalized.slug,
            document: normalized.document,
            fragment: normalized.fragment,
        }
    }
}

/// A node of the route tree. Children are kept sorted by path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNode {
    #[serde(flatten)]
    pub route: RouteData,
    pub children: Vec<RouteNode>,
}

impl RouteNode {
    pub fn new(route: RouteData) -> Self {
        Self {
            route,
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.route.path
    }

    /// Number of nodes in this subtree, including `self`.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(RouteNode::len).sum::<usize>()
    }

    /// Depth-first lookup by canonical path.
    pub fn find(&self, path: &str) -> Option<&RouteNode> {
        if self.path() == path {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(path))
    }
}

/// Document address -> route.
pub type RoutesByAddress = BTreeMap<String, RouteData>;
