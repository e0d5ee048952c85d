//! Navigate command: run one client navigation against the pre-rendered
//! output, using an in-memory browser.

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use parking_lot::Mutex;

use super::NavigateArgs;
use crate::artifact::ArtifactFormat;
use crate::config::SiteConfig;
use crate::generator::compute_routes;
use crate::log;
use crate::runtime::{
    Browser, CommitCallback, DirFetcher, Location, MemoryBrowser, NavigationEngine,
    NavigationOutcome, RouteTable, ViewSwap, VisibleTree,
};

/// Origin of the simulated browser.
const ORIGIN: &str = "http://localhost/";

/// Keeps the markup of the last committed tree.
#[derive(Default)]
struct CapturedView {
    markup: Mutex<Option<String>>,
}

impl ViewSwap for CapturedView {
    fn replace_visible_tree(&self, tree: VisibleTree, on_commit: Option<CommitCallback<'_>>) {
        *self.markup.lock() = Some(tree.markup().to_string());
        if let Some(commit) = on_commit {
            commit();
        }
    }
}

/// What one simulated navigation did.
#[derive(Debug)]
pub struct NavigateReport {
    pub outcome: NavigationOutcome,
    /// Address bar after the navigation
    pub location: String,
    pub history_len: usize,
    /// Visible markup after the navigation
    pub markup: Option<String>,
}

/// Routes from the JSON artifact when there is one, otherwise scanned fresh.
fn load_routes(config: &SiteConfig) -> Result<RouteTable> {
    let artifact = config.artifact_path();
    let table = if config.routes.format == ArtifactFormat::Json && artifact.is_file() {
        RouteTable::load(&artifact)?
    } else {
        RouteTable::from_artifact(compute_routes(&config.routes, &config.root)?)
    };
    Ok(table.with_not_found(config.navigation.not_found.clone()))
}

/// Render the starting page, then navigate to `args.target`.
pub fn simulate(args: &NavigateArgs, config: &SiteConfig) -> Result<NavigateReport> {
    let routes = load_routes(config)?;
    let start = Location::parse(ORIGIN)
        .and_then(|origin| origin.join(&args.from))
        .with_context(|| format!("invalid start location `{}`", args.from))?;

    let browser = Arc::new(MemoryBrowser::new(start));
    let fetcher = DirFetcher::new(config.root_join(&config.navigation.output_dir));
    let engine = NavigationEngine::new(routes, Arc::clone(&browser), fetcher, CapturedView::default());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let outcome = runtime.block_on(async {
        // Initial load: show the starting page without touching history.
        if let NavigationOutcome::Failed(e) = engine.handle_pop_state().await {
            log!("warning"; "starting page not rendered: {}", e);
        }
        engine.navigate(&args.target).await
    });

    Ok(NavigateReport {
        outcome,
        location: browser.location().display(),
        history_len: browser.len(),
        markup: engine.view().markup.lock().clone(),
    })
}

/// Execute the navigate command.
pub fn run_navigate(args: &NavigateArgs, config: &SiteConfig) -> Result<()> {
    let report = simulate(args, config)?;

    match &report.outcome {
        NavigationOutcome::Unchanged => log!("navigate"; "already at {}", report.location),
        NavigationOutcome::Navigated { route, pushed } => {
            let verb = if *pushed { "pushed" } else { "showing" };
            log!("navigate"; "{} {} (route {}, {})", verb, report.location, route.path, route.fragment);
        }
        NavigationOutcome::NotFound => log!("navigate"; "no route for {}, showing built-in not-found view", args.target),
        NavigationOutcome::Failed(e) => return Err(anyhow!(e.clone())),
        NavigationOutcome::Invalid(target) => return Err(anyhow!("invalid navigation target `{target}`")),
    }
    log!("navigate"; "history has {} entries", report.history_len);

    if let Some(markup) = &report.markup {
        println!("{markup}");
    }
    Ok(())
}
