//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::artifact::ArtifactFormat;

/// Trellis file-system router CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: trellis.toml)
    #[arg(short = 'C', long, global = true, default_value = "trellis.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate the route artifact from the pages directory
    #[command(visible_alias = "g")]
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Print the computed routes without writing the artifact
    #[command(visible_alias = "r")]
    Routes {
        #[command(flatten)]
        args: RoutesArgs,
    },

    /// Simulate a client navigation against the pre-rendered output
    #[command(visible_alias = "n")]
    Navigate {
        #[command(flatten)]
        args: NavigateArgs,
    },
}

/// Options shared by commands that scan pages.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct PatternArgs {
    /// Glob selecting page sources, relative to the project root
    /// (e.g. "src/pages/**/*.{tsx,mdx}")
    #[arg(short, long)]
    pub pattern: Option<String>,
}

/// Generate command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub pattern: PatternArgs,

    /// Artifact path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Artifact format
    #[arg(short, long)]
    pub format: Option<ArtifactFormat>,

    /// Keep running and regenerate when pages or config change
    #[arg(short, long)]
    pub watch: bool,
}

/// Which route structure to print.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoutesView {
    /// Hierarchical route tree
    #[default]
    Tree,
    /// Flattened pre-order list
    Flat,
    /// Document address -> route lookup
    Lookup,
}

/// Routes command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct RoutesArgs {
    #[command(flatten)]
    pub pattern: PatternArgs,

    /// Route structure to print
    #[arg(long, value_enum, default_value_t = RoutesView::Tree)]
    pub view: RoutesView,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Navigate command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct NavigateArgs {
    /// Navigation target (e.g. "/blog/post#intro")
    pub target: String,

    /// Location the simulated browser starts at
    #[arg(long, default_value = "/")]
    pub from: String,

    /// Directory holding pre-rendered documents and fragments
    #[arg(short = 'd', long, value_hint = clap::ValueHint::DirPath)]
    pub output_dir: Option<PathBuf>,
}

impl Cli {
    pub fn is_watch(&self) -> bool {
        matches!(&self.command, Commands::Generate { args } if args.watch)
    }
}
