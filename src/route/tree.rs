//! Route tree construction.
//!
//! Every page is attached under its *best parent*: the existing node with the
//! longest path that is a proper `/`-prefix of the page path. The root is a
//! parent of everything, so pages without an intermediate directory page hang
//! directly off `/`, and tree depth need not match file-system depth:
//!
//! ```text
//! index.tsx, about.tsx, one/two/page.md
//!
//! /
//! ├── /about
//! └── /one/two/page
//! ```

use super::normalize::{self, NormalizedPath};
use super::{RouteData, RouteError, RouteNode};

/// Build the route tree from base-relative page paths.
///
/// Paths are validated first; a missing root index is reported after that.
/// Quadratic in the number of paths, which is fine at static-site scale.
pub fn build_route_tree<S: AsRef<str>>(files: &[S]) -> Result<RouteNode, RouteError> {
    let normalized = files
        .iter()
        .map(|file| normalize::normalize(file.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    if !normalized.iter().any(NormalizedPath::is_root) {
        return Err(RouteError::MissingRoot);
    }

    // Root files are all represented by the single root node.
    let mut candidates: Vec<_> = normalized.into_iter().filter(|n| !n.is_root()).collect();

    // Shallow first, so parents are placed before their descendants.
    candidates.sort_by_key(NormalizedPath::depth);

    let mut root = RouteNode::new(normalize::root().into());
    for candidate in candidates {
        let node = RouteNode::new(RouteData::from(candidate));

        let mut best = BestParent::default();
        find_best_parent(&root, node.path(), &mut Vec::new(), &mut best);

        let parent = node_at_mut(&mut root, &best.trail);
        parent.children.push(node);
        parent.children.sort_by(|a, b| a.path().cmp(b.path()));
    }

    Ok(root)
}

/// Longest qualifying ancestor found so far, as child indices from the root.
#[derive(Default)]
struct BestParent {
    path_len: usize,
    trail: Vec<usize>,
}

/// Check whether `parent` may contain a node at `path`.
fn is_potential_parent(parent: &str, path: &str) -> bool {
    if parent == path {
        return false;
    }
    if parent == normalize::ROOT_PATH {
        return true;
    }
    path.strip_prefix(parent)
        .is_some_and(|rest| rest.starts_with('/'))
}

fn find_best_parent(node: &RouteNode, path: &str, trail: &mut Vec<usize>, best: &mut BestParent) {
    // Strictly longer only: on equal lengths the first node in pre-order wins.
    if is_potential_parent(node.path(), path) && node.path().len() > best.path_len {
        best.path_len = node.path().len();
        best.trail.clone_from(trail);
    }

    for (i, child) in node.children.iter().enumerate() {
        trail.push(i);
        find_best_parent(child, path, trail, best);
        trail.pop();
    }
}

fn node_at_mut<'a>(root: &'a mut RouteNode, trail: &[usize]) -> &'a mut RouteNode {
    trail
        .iter()
        .fold(root, |node, &i| &mut node.children[i])
}
