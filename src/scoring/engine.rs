//! Scoring facade: lazy native initialization with a permanent fallback.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::error::FillError;

use super::fallback::{FallbackScorer, fallback_score};
use super::native::{BundledLoader, ModuleLoader, NativeScorer};
use super::{BackendKind, Scorer};

/// Owns the selected scoring backend.
///
/// The selection moves at most twice: pending → native after a successful
/// [`init`](Self::init), then native → fallback on the first failure. It never
/// moves back. Until `init` completes every call is served by the fallback.
/// `selected` is the only record of the active backend.
pub struct ScoringEngine {
    loader: Arc<dyn ModuleLoader>,
    initialized: OnceCell<()>,
    selected: Mutex<Box<dyn Scorer>>,
    downgrades: AtomicUsize,
}

impl std::fmt::Debug for ScoringEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringEngine")
            .field("loader", &self.loader.name())
            .field("backend", &self.backend())
            .field("downgrades", &self.downgrades())
            .finish()
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(Arc::new(BundledLoader::default()))
    }
}

impl ScoringEngine {
    #[must_use]
    pub fn new(loader: Arc<dyn ModuleLoader>) -> Self {
        Self {
            loader,
            initialized: OnceCell::new(),
            selected: Mutex::new(Box::new(FallbackScorer)),
            downgrades: AtomicUsize::new(0),
        }
    }

    /// Engine that never attempts the native module.
    #[must_use]
    pub fn fallback_only() -> Self {
        Self {
            loader: Arc::new(super::native::BlockedLoader::new("fallback selected")),
            initialized: OnceCell::new_with(Some(())),
            selected: Mutex::new(Box::new(FallbackScorer)),
            downgrades: AtomicUsize::new(0),
        }
    }

    /// Load the native module once. Concurrent callers share the same attempt
    /// and all observe its outcome. A failed load is not retried.
    pub async fn init(&self) {
        self.initialized
            .get_or_init(|| async {
                match self.loader.load().await {
                    Ok(module) => {
                        *self.selected.lock() = Box::new(NativeScorer::new(module));
                        debug!(target: "fillrank::scoring", loader = self.loader.name(), "native scorer loaded");
                    }
                    Err(err) => self.record_downgrade(&err),
                }
            })
            .await;
    }

    /// Relevance of `candidate` for `query` in `[0, 1]`. Never fails: a
    /// native fault switches the engine to the fallback and the score is
    /// recomputed there.
    pub fn score(&self, query: &str, candidate: &str) -> f64 {
        if query.is_empty() {
            return 0.0;
        }

        let mut selected = self.selected.lock();
        let failure = match selected.score(query, candidate) {
            Ok(score) if score.is_finite() => return score.clamp(0.0, 1.0),
            Ok(score) => FillError::ModuleTrap(format!("non-finite score {score}")),
            Err(err) => err,
        };

        if selected.kind() == BackendKind::Native {
            *selected = Box::new(FallbackScorer);
            drop(selected);
            self.record_downgrade(&failure);
        }
        fallback_score(query, candidate)
    }

    /// Backend currently serving requests.
    #[must_use]
    pub fn backend(&self) -> BackendKind {
        if !self.initialized.initialized() {
            return BackendKind::Pending;
        }
        self.selected.lock().kind()
    }

    /// Number of times the engine gave up on the native module (0 or 1).
    #[must_use]
    pub fn downgrades(&self) -> usize {
        self.downgrades.load(Ordering::Acquire)
    }

    /// Called once per engine at most: either `init` failed, or the native
    /// scorer faulted and was just swapped out under the lock.
    fn record_downgrade(&self, err: &FillError) {
        self.downgrades.fetch_add(1, Ordering::AcqRel);
        warn!(
            target: "fillrank::scoring",
            loader = self.loader.name(),
            error = %err,
            "native scorer disabled, falling back to portable scorer"
        );
    }
}
