//! File resolution cache.
//!
//! Maps logical file names (`#include` and `inherit` targets) to analyzed
//! files. A hit returns the stored analysis without touching the loader; a
//! miss loads, analyzes and stores. Loader failures are returned to the
//! caller and never cached. The resolver is shared across threads.

use crate::analysis::{AnalyzedFile, analyze};
use crate::loader::{LoadError, SourceLoader};
use dashmap::DashMap;
use mudz_common::limits::MAX_INCLUDE_DEPTH;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("cannot resolve {name}")]
    Load {
        name: String,
        #[source]
        source: LoadError,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ResolverStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

pub struct FileResolver {
    loader: Arc<dyn SourceLoader>,
    cache: DashMap<String, Arc<AnalyzedFile>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl FileResolver {
    pub fn new(loader: Arc<dyn SourceLoader>) -> FileResolver {
        FileResolver {
            loader,
            cache: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn loader(&self) -> &dyn SourceLoader {
        self.loader.as_ref()
    }

    /// Analysis of `name`, computed on first request.
    pub fn resolve(&self, name: &str) -> Result<Arc<AnalyzedFile>, ResolveError> {
        if let Some(entry) = self.cache.get(name) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(name, "resolver hit");
            return Ok(Arc::clone(entry.value()));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(name, "resolver miss");
        // Load and analyze outside any shard lock; the loader may block.
        let text = self.loader.load(name).map_err(|source| ResolveError::Load {
            name: name.to_string(),
            source,
        })?;
        let analyzed = Arc::new(analyze(name, &text));

        // A concurrent miss on the same name may have stored first; keep that one.
        let stored = self
            .cache
            .entry(name.to_string())
            .or_insert(analyzed)
            .value()
            .clone();
        Ok(stored)
    }

    /// Every file reachable from `file` through `#include` and `inherit`,
    /// breadth first. Cycles are followed once; depth is bounded. Failures
    /// are logged and skipped.
    pub fn resolve_dependencies(&self, file: &AnalyzedFile) -> Vec<Arc<AnalyzedFile>> {
        let mut seen: FxHashSet<String> = FxHashSet::default();
        seen.insert(file.file_name.to_string());

        let mut out = Vec::new();
        let mut frontier: Vec<String> = file
            .scopes
            .dependencies()
            .iter()
            .map(|dep| dep.path.clone())
            .collect();

        for depth in 0..MAX_INCLUDE_DEPTH {
            if frontier.is_empty() {
                return out;
            }
            let mut next = Vec::new();
            for name in frontier {
                if !seen.insert(name.clone()) {
                    continue;
                }
                match self.resolve(&name) {
                    Ok(resolved) => {
                        next.extend(
                            resolved
                                .scopes
                                .dependencies()
                                .iter()
                                .map(|dep| dep.path.clone()),
                        );
                        out.push(resolved);
                    }
                    Err(err) => {
                        warn!(from = %file.file_name, depth, error = %err, "skipping dependency")
                    }
                }
            }
            frontier = next;
        }
        if !frontier.is_empty() {
            warn!(from = %file.file_name, limit = MAX_INCLUDE_DEPTH, "include depth limit reached");
        }
        out
    }

    /// Drop one entry. Returns whether it was cached.
    pub fn invalidate(&self, name: &str) -> bool {
        self.cache.remove(name).is_some()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }

    pub fn is_cached(&self, name: &str) -> bool {
        self.cache.contains_key(name)
    }

    pub fn stats(&self) -> ResolverStats {
        ResolverStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.len(),
        }
    }
}
