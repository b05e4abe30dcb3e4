use crate::areas::cache::DiffCache;
use crate::artifacts::core::config::DiffConfig;
use crate::artifacts::core::error::DiffError;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::Path;
use std::sync::Arc;

/// One CLI invocation: where output goes, which config applies and which
/// cache views are shared through
pub struct Session {
    writer: RefCell<Box<dyn std::io::Write>>,
    config: DiffConfig,
    cache: Arc<DiffCache>,
}

impl Session {
    pub fn new(writer: Box<dyn std::io::Write>, config: DiffConfig) -> Self {
        Self::with_cache(writer, config, DiffCache::global())
    }

    pub fn with_cache(
        writer: Box<dyn std::io::Write>,
        config: DiffConfig,
        cache: Arc<DiffCache>,
    ) -> Self {
        Session {
            writer: RefCell::new(writer),
            config,
            cache,
        }
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    pub fn cache(&self) -> Arc<DiffCache> {
        self.cache.clone()
    }

    /// Read a file as UTF-8 text
    pub fn read_file(&self, path: &Path) -> anyhow::Result<String> {
        let bytes =
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

        String::from_utf8(bytes).map_err(|e| {
            DiffError::malformed(format!("{} is not valid UTF-8: {}", path.display(), e)).into()
        })
    }
}
