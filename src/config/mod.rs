//! Project configuration management for `trellis.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section    # [routes] and [navigation]
//! ├── error      # ConfigError, ConfigDiagnostics
//! ├── handle     # Live config for watch mode
//! ├── util       # Config file discovery
//! └── mod.rs     # SiteConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section        | Purpose                                        |
//! |----------------|------------------------------------------------|
//! | `[routes]`     | Page pattern, artifact path and format         |
//! | `[navigation]` | Not-found route, pre-rendered output directory |

mod error;
mod handle;
mod section;
mod util;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use handle::ConfigHandle;
pub use section::{NavigationConfig, RoutesConfig};

use util::find_config_file;

use crate::cli::{Cli, Commands, PatternArgs};
use crate::{debug, log};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing trellis.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Route generation settings
    #[serde(default)]
    pub routes: RoutesConfig,

    /// Client navigation settings
    #[serde(default)]
    pub navigation: NavigationConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file. Without one,
    /// defaults apply and the project root is the current directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config, &cwd) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                config.config_path = path;
                config
            }
            None => {
                debug!("config"; "no {} found, using defaults", cli.config.display());
                Self {
                    config_path: cwd.join(&cli.config),
                    root: cwd,
                    ..Self::default()
                }
            }
        };

        config.apply_command_options(cli);
        config.validate().map_err(ConfigError::Diagnostics)?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            let name = path
                .file_name()
                .map_or_else(|| path.to_string_lossy(), |n| n.to_string_lossy());
            log!("warning"; "ignoring unknown fields in {}: {}", name, ignored.join(", "));
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Absolute artifact path.
    pub fn artifact_path(&self) -> PathBuf {
        self.root_join(&self.routes.output)
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Generate { args } => {
                self.apply_pattern_args(&args.pattern);
                Self::update_option(&mut self.routes.output, args.output.as_ref());
                Self::update_option(&mut self.routes.format, args.format.as_ref());
            }
            Commands::Routes { args } => self.apply_pattern_args(&args.pattern),
            Commands::Navigate { args } => {
                Self::update_option(&mut self.navigation.output_dir, args.output_dir.as_ref());
            }
        }
    }

    fn apply_pattern_args(&mut self, args: &PatternArgs) {
        Self::update_option(&mut self.routes.pattern, args.pattern.as_ref());
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(target: &mut T, value: Option<&T>) {
        if let Some(v) = value {
            *target = v.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration, collecting every problem before failing.
    pub fn validate(&self) -> Result<(), ConfigDiagnostics> {
        let mut diag = ConfigDiagnostics::new();

        let pattern = self.routes.pattern.trim();
        if pattern.is_empty() {
            diag.error_with_hint(
                "routes.pattern",
                "page pattern must not be empty",
                "e.g. pattern = \"src/pages/**/*.{tsx,mdx}\"",
            );
        } else if Path::new(pattern).is_absolute() {
            diag.error_with_hint(
                "routes.pattern",
                format!("`{pattern}` must be relative to the project root"),
                "remove the leading `/`",
            );
        }

        if self.routes.output.as_os_str().is_empty() {
            diag.error("routes.output", "artifact path must not be empty");
        }

        if self.routes.module.trim().is_empty() {
            diag.error("routes.module", "router module name must not be empty");
        }

        if !self.navigation.not_found.starts_with('/') {
            diag.error_with_hint(
                "navigation.not_found",
                format!("`{}` is not a route path", self.navigation.not_found),
                "route paths start with `/`, e.g. \"/404\"",
            );
        }

        diag.into_result()
    }
}

/// Build a CLI pointing at an explicit config file.
#[cfg(test)]
pub(crate) fn test_cli(config_path: &Path) -> Cli {
    use clap::Parser;
    use std::ffi::OsString;
    Cli::parse_from([
        OsString::from("trellis"),
        OsString::from("-C"),
        config_path.as_os_str().to_owned(),
        OsString::from("routes"),
    ])
}
