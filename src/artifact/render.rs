//! Artifact rendering.

use serde::{Deserialize, Serialize};

use super::RouteArtifact;

/// Output format of the generated artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    /// Plain JSON, loadable by the runtime route table
    #[default]
    Json,
    /// TypeScript module augmenting the router package's `App.Routes`
    Typescript,
}

impl ArtifactFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Typescript => "ts",
        }
    }
}

/// Render the artifact. Output is deterministic for a given artifact.
pub fn render(
    artifact: &RouteArtifact,
    format: ArtifactFormat,
    module: &str,
) -> serde_json::Result<String> {
    match format {
        ArtifactFormat::Json => {
            let mut content = serde_json::to_string_pretty(artifact)?;
            content.push('\n');
            Ok(content)
        }
        ArtifactFormat::Typescript => render_typescript(artifact, module),
    }
}

fn render_typescript(artifact: &RouteArtifact, module: &str) -> serde_json::Result<String> {
    let module = serde_json::to_string(module)?;

    let mut interface = String::new();
    for (path, route) in &artifact.routes {
        interface.push_str(&format!(
            "      {}: {{ slug: {}; rsc: {}; html: {} }};\n",
            serde_json::to_string(path)?,
            serde_json::to_string(&route.slug)?,
            serde_json::to_string(&route.rsc)?,
            serde_json::to_string(&route.html)?,
        ));
    }

    let flat_routes = serde_json::to_string_pretty(&artifact.flat_routes)?;
    let route_tree = serde_json::to_string_pretty(&artifact.route_tree)?;
    let routes_by_page = serde_json::to_string_pretty(&artifact.routes_by_page)?;

    Ok(format!(
        r#"/* eslint-disable */

// This file is auto-generated by trellis.
// Do not edit it manually.
// You should also exclude it from your linting/formatting rules.

import type {{ App, RouteData, RouteNode }} from {module};

declare module {module} {{
  namespace App {{
    interface Routes {{
{interface}    }}
  }}
}}

export const flatRoutes = {flat_routes} as const satisfies RouteData[];

export const routeTree = {route_tree} as const satisfies RouteNode;

// lookup routes by document address
export const routesByPage = {routes_by_page} satisfies {{
  [Key in keyof App.Routes as App.Routes[Key]["html"]]: App.Routes[Key];
}};
"#
    ))
}
