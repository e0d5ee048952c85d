//! Flat route list and document-address lookup.

use super::{RouteData, RouteNode, RoutesByAddress};

/// Pre-order traversal: a node before its descendants, children in sorted order.
pub fn flatten(tree: &RouteNode) -> Vec<RouteData> {
    let mut routes = Vec::with_capacity(tree.len());
    collect(tree, &mut routes);
    routes
}

fn collect(node: &RouteNode, routes: &mut Vec<RouteData>) {
    routes.push(node.route.clone());
    for child in &node.children {
        collect(child, routes);
    }
}

/// Index routes by document address. A repeated address keeps the later route.
pub fn build_lookup(routes: &[RouteData]) -> RoutesByAddress {
    routes
        .iter()
        .map(|route| (route.document.clone(), route.clone()))
        .collect()
}
