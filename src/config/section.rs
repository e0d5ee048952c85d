//! `[routes]` and `[navigation]` sections.
//!
//! # Example
//!
//! ```toml
//! [routes]
//! pattern = "src/pages/**/*.{tsx,mdx}"   # Page sources, relative to project root
//! output = "routes.json"                  # Generated artifact
//! format = "json"                         # "json" or "typescript"
//! module = "@trellis/router"              # Module augmented by the TypeScript artifact
//!
//! [navigation]
//! not_found = "/404"                      # Route rendered for unknown addresses
//! output_dir = "dist"                     # Pre-rendered documents and fragments
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactFormat;
use crate::runtime::NOT_FOUND_PATH;

/// Route generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Glob selecting page sources.
    pub pattern: String,
    /// Artifact path.
    pub output: PathBuf,
    /// Artifact format.
    pub format: ArtifactFormat,
    /// Router module name used by the TypeScript artifact.
    pub module: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            pattern: "src/pages/**/*.{tsx,mdx}".to_string(),
            output: PathBuf::from("routes.json"),
            format: ArtifactFormat::Json,
            module: "@trellis/router".to_string(),
        }
    }
}

/// Client navigation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Route path rendered when an address has no route.
    pub not_found: String,
    /// Directory with pre-rendered documents and fragments.
    pub output_dir: PathBuf,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            not_found: NOT_FOUND_PATH.to_string(),
            output_dir: PathBuf::from("dist"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::from_str("").unwrap();
        assert_eq!(config.routes, RoutesConfig::default());
        assert_eq!(config.navigation.not_found, "/404");
    }

    #[test]
    fn test_routes_section() {
        let config = SiteConfig::from_str(
            "[routes]\npattern = \"pages/**/*.md\"\noutput = \"gen/routes.ts\"\nformat = \"typescript\"",
        )
        .unwrap();

        assert_eq!(config.routes.pattern, "pages/**/*.md");
        assert_eq!(config.routes.output, PathBuf::from("gen/routes.ts"));
        assert_eq!(config.routes.format, ArtifactFormat::Typescript);
        assert_eq!(config.routes.module, "@trellis/router");
    }

    #[test]
    fn test_navigation_section() {
        let config =
            SiteConfig::from_str("[navigation]\nnot_found = \"/missing\"\noutput_dir = \"public\"")
                .unwrap();
        assert_eq!(config.navigation.not_found, "/missing");
        assert_eq!(config.navigation.output_dir, PathBuf::from("public"));
    }
}
