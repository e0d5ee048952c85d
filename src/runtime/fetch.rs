//! Fragment payloads and the fetchers that load them.

use std::fmt;
use std::future::Future;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Pre-rendered component payload for one page.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Fragment(Arc<str>);

impl Fragment {
    pub fn new(body: impl Into<Arc<str>>) -> Self {
        Self(body.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fragment({} bytes)", self.0.len())
    }
}

/// Fragment fetch failures. Cloned to every waiter of a shared fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("fetch of `{0}` was aborted")]
    Aborted(String),

    #[error("fragment `{0}` not found")]
    NotFound(String),

    #[error("failed to fetch `{address}`: {message}")]
    Failed { address: String, message: String },
}

impl FetchError {
    #[inline]
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted(_))
    }

    pub fn address(&self) -> &str {
        match self {
            Self::Aborted(address) | Self::NotFound(address) => address,
            Self::Failed { address, .. } => address,
        }
    }
}

/// Loads the fragment at an address, honoring the cancellation signal.
pub trait FragmentFetcher {
    fn fetch(
        &self,
        address: &str,
        signal: &CancellationToken,
    ) -> impl Future<Output = Result<Fragment, FetchError>>;
}

/// Serves fragments from a directory of pre-rendered output.
#[derive(Debug, Clone)]
pub struct DirFetcher {
    root: PathBuf,
}

impl DirFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map an address onto the output directory, rejecting escapes.
    fn resolve(&self, address: &str) -> Option<PathBuf> {
        let relative = Path::new(address.trim_start_matches('/'));
        relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
            .then(|| self.root.join(relative))
    }
}

impl FragmentFetcher for DirFetcher {
    async fn fetch(&self, address: &str, signal: &CancellationToken) -> Result<Fragment, FetchError> {
        let Some(path) = self.resolve(address) else {
            return Err(FetchError::NotFound(address.to_string()));
        };

        tokio::select! {
            biased;
            _ = signal.cancelled() => Err(FetchError::Aborted(address.to_string())),
            read = tokio::fs::read_to_string(&path) => match read {
                Ok(body) => Ok(Fragment::new(body)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    Err(FetchError::NotFound(address.to_string()))
                }
                Err(e) => Err(FetchError::Failed {
                    address: address.to_string(),
                    message: e.to_string(),
                }),
            },
        }
    }
}
