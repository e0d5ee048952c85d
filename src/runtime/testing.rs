//! Test doubles for the navigation runtime.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

use super::fetch::{FetchError, Fragment, FragmentFetcher};
use super::view::{CommitCallback, ViewSwap, VisibleTree};

/// Serves `payload of <address>` for known addresses and records every call.
///
/// Gated addresses block until their [`Notify`] fires; failing addresses
/// return [`FetchError::Failed`].
#[derive(Default)]
pub struct StubFetcher {
    known: FxHashSet<String>,
    calls: Mutex<Vec<String>>,
    gates: Mutex<FxHashMap<String, Arc<Notify>>>,
    failing: Mutex<FxHashSet<String>>,
}

impl StubFetcher {
    pub fn serving(addresses: &[&str]) -> Self {
        Self {
            known: addresses.iter().map(|a| a.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn body(address: &str) -> String {
        format!("payload of {address}")
    }

    pub fn gate(&self, address: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates.lock().insert(address.to_string(), Arc::clone(&notify));
        notify
    }

    pub fn fail(&self, address: &str) {
        self.failing.lock().insert(address.to_string());
    }

    pub fn recover(&self, address: &str) {
        self.failing.lock().remove(address);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

impl FragmentFetcher for StubFetcher {
    async fn fetch(&self, address: &str, signal: &CancellationToken) -> Result<Fragment, FetchError> {
        self.calls.lock().push(address.to_string());
        let gate = self.gates.lock().get(address).cloned();

        let respond = async {
            if let Some(gate) = gate {
                gate.notified().await;
            }
            if self.failing.lock().contains(address) {
                return Err(FetchError::Failed {
                    address: address.to_string(),
                    message: "stub failure".into(),
                });
            }
            if !self.known.contains(address) {
                return Err(FetchError::NotFound(address.to_string()));
            }
            Ok(Fragment::new(Self::body(address)))
        };

        tokio::select! {
            biased;
            _ = signal.cancelled() => Err(FetchError::Aborted(address.to_string())),
            result = respond => result,
        }
    }
}

/// Commits immediately and records every tree it was handed.
#[derive(Default)]
pub struct RecordingView {
    trees: Mutex<Vec<VisibleTree>>,
}

impl RecordingView {
    pub fn trees(&self) -> Vec<VisibleTree> {
        self.trees.lock().clone()
    }

    pub fn last_markup(&self) -> Option<String> {
        self.trees.lock().last().map(|tree| tree.markup().to_string())
    }
}

impl ViewSwap for RecordingView {
    fn replace_visible_tree(&self, tree: VisibleTree, on_commit: Option<CommitCallback<'_>>) {
        self.trees.lock().push(tree);
        if let Some(commit) = on_commit {
            commit();
        }
    }
}
