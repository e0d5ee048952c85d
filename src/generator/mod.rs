//! Route artifact generation: scan -> tree -> artifact -> write.

use std::path::{Path, PathBuf};

use crate::artifact::{RouteArtifact, WriteOutcome, render, write_if_changed};
use crate::config::{RoutesConfig, SiteConfig};
use crate::route::{RouteError, build_route_tree};
use crate::scan::scan_pages;

/// Summary of one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub artifact: PathBuf,
    pub routes: usize,
    pub outcome: WriteOutcome,
}

/// Scan the pages directory and build the artifact without writing it.
pub fn compute_routes(routes: &RoutesConfig, root: &Path) -> Result<RouteArtifact, RouteError> {
    let files = scan_pages(&routes.pattern, root)?;
    let tree = build_route_tree(&files)?;
    Ok(RouteArtifact::from_tree(tree))
}

/// Generate the route artifact, writing it only when its content changed.
pub fn generate_routes(config: &SiteConfig) -> Result<GenerateReport, RouteError> {
    let artifact = compute_routes(&config.routes, &config.root)?;
    let content = render(&artifact, config.routes.format, &config.routes.module)?;

    let path = config.artifact_path();
    let outcome = write_if_changed(&path, &content).map_err(|e| RouteError::Io(path.clone(), e))?;

    Ok(GenerateReport {
        artifact: path,
        routes: artifact.flat_routes.len(),
        outcome,
    })
}
