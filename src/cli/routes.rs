//! Routes command: print the computed route structures as JSON.

use anyhow::Result;

use super::{RoutesArgs, RoutesView, plural_count};
use crate::artifact::RouteArtifact;
use crate::config::SiteConfig;
use crate::debug;
use crate::generator::compute_routes;

/// Execute the routes command. Nothing is written to disk.
pub fn run_routes(args: &RoutesArgs, config: &SiteConfig) -> Result<()> {
    let artifact = compute_routes(&config.routes, &config.root)?;
    debug!("routes"; "computed {}", plural_count(artifact.flat_routes.len(), "route"));
    println!("{}", render_view(&artifact, args.view, args.pretty)?);
    Ok(())
}

/// Serialize one structure of the artifact.
pub fn render_view(artifact: &RouteArtifact, view: RoutesView, pretty: bool) -> serde_json::Result<String> {
    let value = match view {
        RoutesView::Tree => serde_json::to_value(&artifact.route_tree)?,
        RoutesView::Flat => serde_json::to_value(&artifact.flat_routes)?,
        RoutesView::Lookup => serde_json::to_value(&artifact.routes_by_page)?,
    };
    if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
}
