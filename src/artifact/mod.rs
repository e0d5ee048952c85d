//! Route artifact: everything the client router needs, in one generated file.
//!
//! The artifact is only rewritten when its rendered content changes, so
//! downstream watchers don't rebuild on every generator run.

mod render;
mod write;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::route::{RouteData, RouteNode, RoutesByAddress, build_lookup, flatten};

pub use render::{ArtifactFormat, render};
pub use write::{WriteOutcome, write_if_changed};

/// Type-level entry of one route (the route table keyed by canonical path).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteType {
    pub slug: String,
    pub html: String,
    pub rsc: String,
}

/// Tree, flat list and lookup of a successful build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteArtifact {
    pub routes: BTreeMap<String, RouteType>,
    pub flat_routes: Vec<RouteData>,
    pub route_tree: RouteNode,
    pub routes_by_page: RoutesByAddress,
}

impl RouteArtifact {
    pub fn from_tree(route_tree: RouteNode) -> Self {
        let flat_routes = flatten(&route_tree);
        let routes_by_page = build_lookup(&flat_routes);
        let routes = flat_routes
            .iter()
            .map(|route| {
                let entry = RouteType {
                    slug: route.slug.clone(),
                    html: route.document.clone(),
                    rsc: route.fragment.clone(),
                };
                (route.path.clone(), entry)
            })
            .collect();

        Self {
            routes,
            flat_routes,
            route_tree,
            routes_by_page,
        }
    }

    /// Parse a JSON artifact.
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::build_route_tree;

    #[test]
    fn test_from_tree() {
        let tree = build_route_tree(&["index.tsx", "about.tsx", "blog/index.md"]).unwrap();
        let artifact = RouteArtifact::from_tree(tree);

        assert_eq!(artifact.flat_routes.len(), 3);
        assert_eq!(artifact.routes_by_page.len(), 3);
        assert_eq!(artifact.routes["/"].html, "/index.html");
        assert_eq!(artifact.routes["/blog"].rsc, "/blog.rsc");
    }

    #[test]
    fn test_json_field_names() {
        let tree = build_route_tree(&["index.tsx"]).unwrap();
        let artifact = RouteArtifact::from_tree(tree);
        let value = serde_json::to_value(&artifact).unwrap();

        assert!(value.get("flatRoutes").is_some());
        assert!(value.get("routesByPage").is_some());
        assert_eq!(value["routeTree"]["path"], "/");
        assert_eq!(value["routeTree"]["html"], "/index.html");
        assert_eq!(value["routeTree"]["rsc"], "/index.rsc");
        assert!(value["routeTree"]["children"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_json_parse_back() {
        let tree = build_route_tree(&["index.tsx", "docs/intro.md"]).unwrap();
        let artifact = RouteArtifact::from_tree(tree);
        let content = render(&artifact, ArtifactFormat::Json, "").unwrap();

        assert_eq!(RouteArtifact::from_json(&content).unwrap(), artifact);
    }
}
