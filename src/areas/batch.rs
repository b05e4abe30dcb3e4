//! Parallel diffing of many file pairs
//!
//! Each pair is diffed on the tokio blocking pool. Results come back in
//! input order, with one `DiffResult` per file so a single oversized file
//! does not fail the whole batch.

use crate::areas::cache::{CacheKey, DiffCache};
use crate::artifacts::core::config::DiffConfig;
use crate::artifacts::core::error::{DiffError, DiffResult};
use crate::artifacts::core::hashing::ContentHash;
use crate::artifacts::render::file_view::FileDiffView;
use derive_new::new;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// One file to diff; a missing side diffs against an empty file
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct FilePair {
    pub file: String,
    pub old_text: Option<String>,
    pub new_text: Option<String>,
    /// Set when a side could not be read; reported as this file's outcome
    #[new(default)]
    pub read_error: Option<DiffError>,
}

impl FilePair {
    pub fn unreadable(file: String, error: DiffError) -> Self {
        FilePair {
            file,
            old_text: None,
            new_text: None,
            read_error: Some(error),
        }
    }

    fn outcome(&self, config: &DiffConfig, cache: &DiffCache) -> DiffResult<Arc<FileDiffView>> {
        if let Some(error) = &self.read_error {
            return Err(error.clone());
        }

        cache.get_or_try_insert_with(self.cache_key(config), || self.build(config))
    }

    fn cache_key(&self, config: &DiffConfig) -> CacheKey {
        let revision = |text: &Option<String>| {
            text.as_deref()
                .map(|text| ContentHash::of_text(text).to_string())
                .unwrap_or_default()
        };

        CacheKey::for_diff(
            &self.file,
            &revision(&self.old_text),
            &revision(&self.new_text),
            config,
        )
    }

    fn build(&self, config: &DiffConfig) -> DiffResult<FileDiffView> {
        FileDiffView::diff(
            self.old_text.as_deref().unwrap_or_default(),
            self.new_text.as_deref().unwrap_or_default(),
            config,
        )
    }
}

#[derive(Debug)]
pub struct BatchOutcome {
    pub file: String,
    pub result: DiffResult<Arc<FileDiffView>>,
}

/// Diff every pair in parallel, sharing built views through `cache`
pub async fn diff_batch(
    pairs: Vec<FilePair>,
    config: DiffConfig,
    cache: Arc<DiffCache>,
) -> Vec<BatchOutcome> {
    let total = pairs.len();
    let files: Vec<String> = pairs.iter().map(|pair| pair.file.clone()).collect();
    let mut tasks = JoinSet::new();

    for (position, pair) in pairs.into_iter().enumerate() {
        let config = config.clone();
        let cache = cache.clone();

        tasks.spawn_blocking(move || {
            let result = pair.outcome(&config, &cache);
            (position, BatchOutcome {
                file: pair.file,
                result,
            })
        });
    }

    let mut slots: Vec<Option<BatchOutcome>> = (0..total).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((position, outcome)) => slots[position] = Some(outcome),
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => warn!(error = %e, "batch task cancelled"),
        }
    }

    debug!(files = total, "finished batch diff");
    settle(slots, files)
}

/// Outcomes in input order; a file whose task never reported is `Cancelled`
fn settle(slots: Vec<Option<BatchOutcome>>, files: Vec<String>) -> Vec<BatchOutcome> {
    slots
        .into_iter()
        .zip(files)
        .map(|(slot, file)| {
            slot.unwrap_or(BatchOutcome {
                file,
                result: Err(DiffError::Cancelled),
            })
        })
        .collect()
}
