//! Fuzzy relevance scoring.
//!
//! Two backends implement the same streak-weighted subsequence algorithm: a
//! native module driven through a linear-memory calling convention and a
//! portable fallback. [`ScoringEngine`] decides which one serves a call.

pub mod engine;
pub mod fallback;
pub mod native;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use engine::ScoringEngine;
pub use fallback::{FallbackScorer, fallback_score};
pub use native::{
    ArenaModule, BlockedLoader, BundledLoader, ModuleLoader, NativeScorer, ScoringModule,
    score_bytes,
};

/// Which backend serves scoring calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// `init` has not completed; calls use the fallback.
    Pending,
    Native,
    Fallback,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Native => "native",
            Self::Fallback => "fallback",
        };
        f.write_str(label)
    }
}

/// One scoring strategy.
pub trait Scorer: Send {
    fn kind(&self) -> BackendKind;

    fn score(&mut self, query: &str, candidate: &str) -> Result<f64>;
}
