use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tokio::runtime::Runtime;
use tracing::debug;

use crate::cli::Cli;
use crate::config::{Config, ScoringBackend, ScoringConfig};
use crate::error::Result;
use crate::library::Library;
use crate::scoring::{BundledLoader, ScoringEngine};

/// Where the active library came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibrarySource {
    File(PathBuf),
    Sample,
}

pub struct AppContext {
    pub config: Config,
    pub library: Library,
    pub library_source: LibrarySource,
    pub robot_mode: bool,
    pub verbosity: u8,
    runtime: Runtime,
    engine: ScoringEngine,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref())?;
        let (library, library_source) = match &cli.library {
            Some(path) => {
                let library = Library::load(path)?;
                library.validate()?;
                (library, LibrarySource::File(path.clone()))
            }
            None => (Library::sample(Utc::now()), LibrarySource::Sample),
        };

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let engine = build_engine(&config.scoring);
        runtime.block_on(engine.init());
        debug!(target: "fillrank::app", backend = %engine.backend(), source = ?library_source, "context ready");

        Ok(Self {
            config,
            library,
            library_source,
            robot_mode: cli.robot,
            verbosity: cli.verbose,
            runtime,
            engine,
        })
    }

    /// Engine built from the configured backend, already initialized.
    #[must_use]
    pub const fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// A fresh, initialized engine for `backend`, independent of the shared one.
    #[must_use]
    pub fn engine_for(&self, backend: ScoringBackend) -> ScoringEngine {
        let scoring = ScoringConfig {
            backend,
            ..self.config.scoring.clone()
        };
        let engine = build_engine(&scoring);
        self.runtime.block_on(engine.init());
        engine
    }

    /// Result bound for ranking: an explicit limit wins, then the loaded
    /// library's setting, then the configured default.
    #[must_use]
    pub fn suggestion_limit(&self, explicit: Option<usize>) -> usize {
        explicit.unwrap_or(match self.library_source {
            LibrarySource::File(_) => self.library.settings.max_suggestions,
            LibrarySource::Sample => self.config.suggestions.max_suggestions,
        })
    }
}

/// Engine for a scoring configuration. The native loader runs on `init`.
#[must_use]
pub fn build_engine(scoring: &ScoringConfig) -> ScoringEngine {
    match scoring.backend {
        ScoringBackend::Native => {
            ScoringEngine::new(Arc::new(BundledLoader::new(scoring.memory_limit_bytes)))
        }
        ScoringBackend::Fallback => ScoringEngine::fallback_only(),
    }
}
