//! Generate command: write the route artifact, optionally on every change.

use anyhow::Result;

use super::{Cli, plural_count, report_route_error};
use crate::artifact::WriteOutcome;
use crate::config::{ConfigHandle, SiteConfig};
use crate::generator::{GenerateReport, generate_routes};
use crate::route::RouteError;
use crate::{debug, logger, watch};

/// Run the generator once. The writer logs the artifact location on a
/// write; the details only show up with `--verbose`.
pub fn generate_once(config: &SiteConfig) -> Result<GenerateReport, RouteError> {
    let report = generate_routes(config)?;
    match report.outcome {
        WriteOutcome::Written => debug!("routes"; "{}", plural_count(report.routes, "route")),
        WriteOutcome::Unchanged => debug!("routes"; "{} unchanged", report.artifact.display()),
    }
    Ok(report)
}

/// Execute the generate command.
///
/// Without `--watch`, a failed run is returned as an error. In watch mode
/// failures are reported and the previous artifact is kept until the next
/// change fixes the problem.
pub fn run_generate(handle: &ConfigHandle, cli: &Cli) -> Result<()> {
    let config = handle.load();
    if !cli.is_watch() {
        generate_once(&config)?;
        return Ok(());
    }

    if let Err(e) = generate_once(&config) {
        report_route_error(&e);
    }
    watch::watch_routes(handle, cli, regenerate)
}

/// One watch-mode run, reported through the status block.
fn regenerate(config: &SiteConfig) {
    match generate_routes(config) {
        Ok(report) if report.outcome.is_written() => {
            logger::status_success(&plural_count(report.routes, "route"));
        }
        Ok(report) => {
            logger::status_unchanged(&format!("{} unchanged", report.artifact.display()));
        }
        Err(e) => logger::status_error(&e.to_string(), e.hint()),
    }
}
