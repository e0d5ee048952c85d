//! Runtime route table loaded from the generated artifact.

use std::fs;
use std::path::Path;

use super::url::{Location, decode, normalize_route_path};
use crate::artifact::RouteArtifact;
use crate::route::{RouteData, RouteError};

/// Default path of the designated not-found route.
pub const NOT_FOUND_PATH: &str = "/404";

/// A route matched for a location, plus the address to show in the URL bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathData {
    pub route: RouteData,
    pub url: String,
}

/// Read-only route list consulted by the navigation engine.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteData>,
    not_found: String,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteData>) -> Self {
        Self {
            routes,
            not_found: NOT_FOUND_PATH.to_string(),
        }
    }

    pub fn from_artifact(artifact: RouteArtifact) -> Self {
        Self::new(artifact.flat_routes)
    }

    /// Load a JSON artifact written by the generator.
    pub fn load(path: &Path) -> Result<Self, RouteError> {
        let content = fs::read_to_string(path).map_err(|e| RouteError::Io(path.to_path_buf(), e))?;
        let artifact = RouteArtifact::from_json(&content).map_err(|source| RouteError::Artifact {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_artifact(artifact))
    }

    /// Use a different route path as the not-found fallback.
    pub fn with_not_found(mut self, path: impl Into<String>) -> Self {
        self.not_found = path.into();
        self
    }

    #[inline]
    pub fn routes(&self) -> &[RouteData] {
        &self.routes
    }

    pub fn find(&self, path: &str) -> Option<&RouteData> {
        self.routes.iter().find(|route| route.path == path)
    }

    /// The designated not-found route, if the site has one.
    pub fn not_found(&self) -> Option<&RouteData> {
        self.find(&self.not_found)
    }

    /// Match a location against the table (query and fragment are ignored).
    pub fn resolve(&self, location: &Location) -> Option<PathData> {
        let decoded = decode(location.pathname());
        let route = self.find(normalize_route_path(&decoded))?;
        Some(PathData {
            route: route.clone(),
            url: location.display(),
        })
    }
}
