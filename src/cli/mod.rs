//! Command-line interface module.

mod args;
pub mod generate;
pub mod navigate;
pub mod routes;

pub use args::{Cli, Commands, GenerateArgs, NavigateArgs, PatternArgs, RoutesArgs, RoutesView};

use crate::log;
use crate::route::RouteError;

/// Print a command failure, followed by a remediation hint when one exists.
pub fn report_error(err: &anyhow::Error) {
    log!("error"; "{:#}", err);
    if let Some(hint) = err.downcast_ref::<RouteError>().and_then(RouteError::hint) {
        log!("hint"; "{}", hint);
    }
}

/// Like [`report_error`], for failures that don't end the process.
pub fn report_route_error(err: &RouteError) {
    log!("error"; "{}", err);
    if let Some(hint) = err.hint() {
        log!("hint"; "{}", hint);
    }
}

/// `1 route`, `3 routes`
pub(crate) fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}
