//! Native scoring module and its calling convention.
//!
//! A module owns a linear memory region. Callers reset the heap, allocate
//! space for the query and candidate bytes, copy them in and invoke `score`
//! with the two `(offset, length)` pairs. Any out-of-range access is a trap.

use async_trait::async_trait;

use crate::error::{FillError, Result};

use super::fallback::streak_score;
use super::{BackendKind, Scorer};

/// Size of one memory page.
pub const PAGE_SIZE: usize = 64 * 1024;

/// Default memory limit for the bundled module.
pub const DEFAULT_MEMORY_LIMIT: usize = 16 * PAGE_SIZE;

/// Exports a native scoring module must provide.
pub trait ScoringModule: Send {
    fn memory(&self) -> &[u8];

    fn memory_mut(&mut self) -> &mut [u8];

    /// Reserve `len` bytes and return their offset in memory.
    fn alloc(&mut self, len: usize) -> Result<usize>;

    /// Reclaim every previous allocation.
    fn reset(&mut self);

    fn score(&mut self, query_ptr: usize, query_len: usize, cand_ptr: usize, cand_len: usize) -> Result<f64>;
}

/// Produces a native module. Runs at most once per [`super::ScoringEngine`].
#[async_trait]
pub trait ModuleLoader: Send + Sync {
    fn name(&self) -> &str;

    async fn load(&self) -> Result<Box<dyn ScoringModule>>;
}

/// Bump-allocated module compiled into the crate. Decodes its UTF-8 inputs
/// and scores them per character, like the fallback.
#[derive(Debug)]
pub struct ArenaModule {
    memory: Vec<u8>,
    limit: usize,
    next: usize,
}

impl ArenaModule {
    /// `limit` is rounded up to whole pages; at least one page is reserved.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        let pages = limit.div_ceil(PAGE_SIZE).max(1);
        Self {
            memory: vec![0; PAGE_SIZE],
            limit: pages * PAGE_SIZE,
            next: 0,
        }
    }

    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Bytes handed out since the last reset.
    #[must_use]
    pub const fn used(&self) -> usize {
        self.next
    }

    fn slice(&self, ptr: usize, len: usize) -> Result<&[u8]> {
        ptr.checked_add(len)
            .and_then(|end| self.memory.get(ptr..end))
            .ok_or_else(|| {
                FillError::ModuleTrap(format!(
                    "out-of-bounds read at {ptr}+{len} (memory {} bytes)",
                    self.memory.len()
                ))
            })
    }
}

impl Default for ArenaModule {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_LIMIT)
    }
}

impl ScoringModule for ArenaModule {
    fn memory(&self) -> &[u8] {
        &self.memory
    }

    fn memory_mut(&mut self) -> &mut [u8] {
        &mut self.memory
    }

    fn alloc(&mut self, len: usize) -> Result<usize> {
        let ptr = self.next;
        let end = ptr
            .checked_add(len)
            .filter(|end| *end <= self.limit)
            .ok_or_else(|| {
                FillError::ModuleTrap(format!(
                    "allocation of {len} bytes exceeds memory limit {}",
                    self.limit
                ))
            })?;
        if end > self.memory.len() {
            let grown = end.div_ceil(PAGE_SIZE) * PAGE_SIZE;
            self.memory.resize(grown.min(self.limit), 0);
        }
        self.next = end;
        Ok(ptr)
    }

    fn reset(&mut self) {
        self.next = 0;
    }

    fn score(&mut self, query_ptr: usize, query_len: usize, cand_ptr: usize, cand_len: usize) -> Result<f64> {
        let query = self.slice(query_ptr, query_len)?;
        let candidate = self.slice(cand_ptr, cand_len)?;
        score_bytes(query, candidate)
    }
}

/// Scores two UTF-8 buffers read out of module memory. Inputs are expected
/// to be normalized already; bytes that are not valid UTF-8 trap.
pub fn score_bytes(query: &[u8], candidate: &[u8]) -> Result<f64> {
    let query = decode(query, "query")?;
    let candidate = decode(candidate, "candidate")?;
    Ok(streak_score(query, candidate))
}

fn decode<'a>(bytes: &'a [u8], what: &str) -> Result<&'a str> {
    std::str::from_utf8(bytes)
        .map_err(|err| FillError::ModuleTrap(format!("{what} is not valid UTF-8: {err}")))
}

/// Instantiates [`ArenaModule`].
#[derive(Debug, Clone)]
pub struct BundledLoader {
    memory_limit: usize,
}

impl BundledLoader {
    #[must_use]
    pub const fn new(memory_limit: usize) -> Self {
        Self { memory_limit }
    }
}

impl Default for BundledLoader {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_LIMIT)
    }
}

#[async_trait]
impl ModuleLoader for BundledLoader {
    fn name(&self) -> &str {
        "bundled"
    }

    async fn load(&self) -> Result<Box<dyn ScoringModule>> {
        if self.memory_limit == 0 {
            return Err(FillError::BackendUnavailable(
                "memory limit must be at least one byte".to_string(),
            ));
        }
        Ok(Box::new(ArenaModule::new(self.memory_limit)))
    }
}

/// Always refuses to load.
#[derive(Debug, Clone)]
pub struct BlockedLoader {
    reason: String,
}

impl BlockedLoader {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl ModuleLoader for BlockedLoader {
    fn name(&self) -> &str {
        "blocked"
    }

    async fn load(&self) -> Result<Box<dyn ScoringModule>> {
        Err(FillError::BackendUnavailable(self.reason.clone()))
    }
}

/// Drives a [`ScoringModule`] through its calling convention.
pub struct NativeScorer {
    module: Box<dyn ScoringModule>,
}

impl NativeScorer {
    #[must_use]
    pub fn new(module: Box<dyn ScoringModule>) -> Self {
        Self { module }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(usize, usize)> {
        let ptr = self.module.alloc(bytes.len())?;
        let memory_len = self.module.memory().len();
        let target = self
            .module
            .memory_mut()
            .get_mut(ptr..ptr + bytes.len())
            .ok_or_else(|| {
                FillError::ModuleTrap(format!(
                    "allocation at {ptr}+{} outside memory of {memory_len} bytes",
                    bytes.len()
                ))
            })?;
        target.copy_from_slice(bytes);
        Ok((ptr, bytes.len()))
    }
}

impl Scorer for NativeScorer {
    fn kind(&self) -> BackendKind {
        BackendKind::Native
    }

    fn score(&mut self, query: &str, candidate: &str) -> Result<f64> {
        let query = query.trim().to_lowercase();
        let candidate = candidate.trim().to_lowercase();
        self.module.reset();
        let (query_ptr, query_len) = self.write(query.as_bytes())?;
        let (cand_ptr, cand_len) = self.write(candidate.as_bytes())?;
        self.module.score(query_ptr, query_len, cand_ptr, cand_len)
    }
}
