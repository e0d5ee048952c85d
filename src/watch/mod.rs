//! Watch mode: rerun route generation when pages or the config change.
//!
//! ```text
//! notify ──> Debouncer (300ms quiet period) ──> classify ──> Config: reload, regenerate
//!                                                       └──> Pages:  regenerate
//! ```

mod debounce;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use crossbeam::channel::{self, select};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};

use crate::cli::Cli;
use crate::config::{ConfigHandle, SiteConfig};
use crate::route::is_page_file;
use crate::scan::pages_dir;
use crate::{core, debug, log};
use debounce::Debouncer;

/// What a batch of file changes affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// The config file changed; reload before regenerating
    Config,
    /// Pages were added, removed or renamed
    Pages,
}

/// Decide whether changed paths require regeneration.
///
/// The artifact itself is ignored so writing it never retriggers a run.
pub fn classify(paths: &[PathBuf], config: &SiteConfig) -> Option<Change> {
    let config_path = canonical(&config.config_path);
    let artifact = canonical(&config.artifact_path());
    let pages = canonical(&pages_dir(&config.routes.pattern, &config.root));

    let mut change = None;
    for path in paths.iter().map(|p| canonical(p)) {
        if path == config_path {
            return Some(Change::Config);
        }
        if path == artifact || !path.starts_with(&pages) {
            continue;
        }
        // Directory moves arrive without a page extension.
        let name = path.to_string_lossy();
        if is_page_file(&name) || path.extension().is_none() {
            change = Some(Change::Pages);
        }
    }
    change
}

/// Resolve symlinks where possible. Removed files fall back to their
/// canonical parent so they still compare equal to watched paths.
fn canonical(path: &Path) -> PathBuf {
    if let Ok(resolved) = fs::canonicalize(path) {
        return resolved;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => fs::canonicalize(parent)
            .map(|p| p.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}

/// Directories under watch. The pages directory may not exist yet; it is
/// attached once it appears.
struct WatchRoots {
    project: PathBuf,
    pages: PathBuf,
    pages_attached: bool,
}

impl WatchRoots {
    fn new(config: &SiteConfig) -> Self {
        Self {
            project: config.root.clone(),
            pages: pages_dir(&config.routes.pattern, &config.root),
            pages_attached: false,
        }
    }

    fn attach(&mut self, watcher: &mut RecommendedWatcher) -> notify::Result<()> {
        // Non-recursive: only the config file lives here.
        watcher.watch(&self.project, RecursiveMode::NonRecursive)?;
        self.maintain(watcher);
        Ok(())
    }

    fn maintain(&mut self, watcher: &mut RecommendedWatcher) {
        if self.pages_attached || !self.pages.is_dir() {
            return;
        }
        match watcher.watch(&self.pages, RecursiveMode::Recursive) {
            Ok(()) => {
                debug!("watch"; "attached {}", self.pages.display());
                self.pages_attached = true;
            }
            Err(e) => log!("watch"; "failed to watch {}: {}", self.pages.display(), e),
        }
    }

    fn detach(&mut self, watcher: &mut RecommendedWatcher) {
        if self.pages_attached {
            let _ = watcher.unwatch(&self.pages);
            self.pages_attached = false;
        }
        let _ = watcher.unwatch(&self.project);
    }
}

enum Tick {
    Shutdown,
    Event(notify::Event),
    Error(notify::Error),
    Idle,
}

/// Block until Ctrl+C, calling `regenerate` after every relevant change.
pub fn watch_routes(
    handle: &ConfigHandle,
    cli: &Cli,
    mut regenerate: impl FnMut(&SiteConfig),
) -> Result<()> {
    let (shutdown_tx, shutdown_rx) = channel::bounded(1);
    core::register_watcher(shutdown_tx);

    let (notify_tx, notify_rx) = channel::unbounded();
    let mut watcher = notify::recommended_watcher(move |res| {
        let _ = notify_tx.send(res);
    })?;

    let mut roots = WatchRoots::new(&handle.load());
    roots.attach(&mut watcher)?;
    log!("watch"; "watching {} for changes (Ctrl+C to stop)", roots.pages.display());

    let mut debouncer = Debouncer::new();
    while !core::is_shutdown() {
        let tick = select! {
            recv(shutdown_rx) -> _ => Tick::Shutdown,
            recv(notify_rx) -> msg => match msg {
                Ok(Ok(event)) => Tick::Event(event),
                Ok(Err(e)) => Tick::Error(e),
                Err(_) => Tick::Shutdown,
            },
            default(debouncer.sleep_duration()) => Tick::Idle,
        };

        match tick {
            Tick::Shutdown => break,
            Tick::Event(event) => debouncer.add_event(&event),
            Tick::Error(e) => log!("watch"; "notify error: {}", e),
            Tick::Idle => {
                roots.maintain(&mut watcher);
                if let Some(paths) = debouncer.take_if_ready() {
                    process_changes(&paths, handle, cli, &mut watcher, &mut roots, &mut regenerate)?;
                }
            }
        }
    }

    roots.detach(&mut watcher);
    Ok(())
}

fn process_changes(
    paths: &[PathBuf],
    handle: &ConfigHandle,
    cli: &Cli,
    watcher: &mut RecommendedWatcher,
    roots: &mut WatchRoots,
    regenerate: &mut impl FnMut(&SiteConfig),
) -> Result<()> {
    let config = handle.load();
    match classify(paths, &config) {
        Some(Change::Config) => match handle.reload(cli) {
            Ok(true) => {
                log!("watch"; "config changed, regenerating");
                let config = handle.load();
                roots.detach(watcher);
                *roots = WatchRoots::new(&config);
                roots.attach(watcher)?;
                regenerate(&*config);
            }
            Ok(false) => debug!("watch"; "config unchanged"),
            Err(e) => log!("error"; "config reload failed, keeping previous: {:#}", e),
        },
        Some(Change::Pages) => {
            debug!("watch"; "{} path(s) changed", paths.len());
            regenerate(&*config);
        }
        None => debug!("watch"; "ignoring {} change(s)", paths.len()),
    }
    Ok(())
}
