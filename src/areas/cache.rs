//! Shared cache of built file views
//!
//! Views are immutable, so the cache hands out `Arc`s and never copies a
//! render. Failed builds are not cached. Two callers racing on the same key
//! may both build; the first insert wins and both get the same `Arc` back.

use crate::artifacts::core::config::DiffConfig;
use crate::artifacts::core::error::DiffResult;
use crate::artifacts::render::file_view::FileDiffView;
use derive_new::new;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use tracing::{debug, trace};

static GLOBAL_CACHE: LazyLock<Arc<DiffCache>> = LazyLock::new(|| Arc::new(DiffCache::default()));

/// Everything a rendered view depends on
#[derive(Debug, Clone, PartialEq, Eq, Hash, new)]
pub struct CacheKey {
    pub file: String,
    pub old_revision: String,
    pub new_revision: String,
    /// Revision of the original file, for interdiffs
    pub interdiff_revision: Option<String>,
    pub context_lines: Option<usize>,
    pub intraline: bool,
}

impl CacheKey {
    pub fn for_diff(file: &str, old_revision: &str, new_revision: &str, config: &DiffConfig) -> Self {
        Self::new(
            file.to_string(),
            old_revision.to_string(),
            new_revision.to_string(),
            None,
            config.context_lines,
            config.intraline,
        )
    }

    pub fn for_interdiff(
        file: &str,
        original_revision: &str,
        old_revision: &str,
        new_revision: &str,
        config: &DiffConfig,
    ) -> Self {
        Self {
            interdiff_revision: Some(original_revision.to_string()),
            ..Self::for_diff(file, old_revision, new_revision, config)
        }
    }

    fn mentions_revision(&self, revision: &str) -> bool {
        self.old_revision == revision
            || self.new_revision == revision
            || self.interdiff_revision.as_deref() == Some(revision)
    }
}

#[derive(Debug, Default)]
pub struct DiffCache {
    entries: RwLock<HashMap<CacheKey, Arc<FileDiffView>>>,
}

impl DiffCache {
    /// Process-wide cache
    pub fn global() -> Arc<DiffCache> {
        GLOBAL_CACHE.clone()
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<FileDiffView>> {
        self.entries.read().get(key).cloned()
    }

    /// Return the cached view for `key`, building it with `build` on a miss
    pub fn get_or_try_insert_with<F>(&self, key: CacheKey, build: F) -> DiffResult<Arc<FileDiffView>>
    where
        F: FnOnce() -> DiffResult<FileDiffView>,
    {
        if let Some(view) = self.get(&key) {
            trace!(file = %key.file, "diff cache hit");
            return Ok(view);
        }

        debug!(file = %key.file, "diff cache miss");
        let built = Arc::new(build()?);

        let mut entries = self.entries.write();
        Ok(entries.entry(key).or_insert(built).clone())
    }

    /// Drop every view of `file`, returning how many were dropped
    pub fn invalidate_file(&self, file: &str) -> usize {
        self.invalidate(|key| key.file == file)
    }

    /// Drop every view built from `revision` on any side
    pub fn invalidate_revision(&self, revision: &str) -> usize {
        self.invalidate(|key| key.mentions_revision(revision))
    }

    fn invalidate(&self, matches: impl Fn(&CacheKey) -> bool) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|key, _| !matches(key));

        let dropped = before - entries.len();
        debug!(dropped, "invalidated cached diffs");
        dropped
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
