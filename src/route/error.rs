//! Build-time route generation errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort route generation.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("file path \"{path}\" contains unsupported character: {ch:?}")]
    Validation { path: String, ch: char },

    #[error("empty file path")]
    EmptyPath,

    #[error("no root index file found in the pages directory")]
    MissingRoot,

    #[error("no page files found matching pattern \"{pattern}\" in directory \"{}\"", root.display())]
    EmptyMatch { pattern: String, root: PathBuf },

    #[error("pages directory \"{}\" does not exist", .0.display())]
    PagesDirMissing(PathBuf),

    #[error("invalid glob pattern \"{pattern}\"")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("IO error when accessing `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to serialize route artifact")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid route artifact `{}`", path.display())]
    Artifact {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl RouteError {
    /// Remediation hint shown under the error message.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Validation { .. } => {
                Some("rename the file: whitespace and \\ ? # : * < > | ! $ % cannot appear in page paths")
            }
            Self::MissingRoot => Some("add an `index` page (e.g. index.tsx) at the top of the pages directory"),
            Self::EmptyMatch { .. } => {
                Some("check `routes.pattern` in trellis.toml, e.g. `src/pages/**/*.{tsx,mdx}`")
            }
            Self::PagesDirMissing(_) => {
                Some("the directory before the first glob character of `routes.pattern` must exist")
            }
            Self::Pattern { .. } => Some("brace groups and `*`, `**`, `?`, `[...]` are supported"),
            Self::Artifact { .. } => Some("regenerate it with `trellis generate --format json`"),
            Self::EmptyPath | Self::Io(..) | Self::Serialize(_) => None,
        }
    }
}
