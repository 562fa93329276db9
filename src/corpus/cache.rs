// Memoized table loading.
//
// Each source is read at most once per cache lifetime. Entries are keyed by
// the full TableSource (path and column layout), so the same file read with
// two layouts is two entries. Entries stay until `clear` or `invalidate`.
// The cache is an explicit value handed to whoever needs tables; there is no
// process-wide instance.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use super::loader::{self, TableSource};
use super::models::Corpus;

#[derive(Debug, Default)]
pub struct CorpusCache {
    entries: HashMap<TableSource, Arc<Corpus>>,
}

impl CorpusCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached corpus for `source`, loading it on first use.
    ///
    /// A missing file caches the empty fallback too, matching a single
    /// report render. Parse failures are not cached.
    pub fn get_or_load(&mut self, source: &TableSource) -> Result<Arc<Corpus>> {
        self.get_or_load_with(source, loader::load_table)
    }

    /// Like `get_or_load`, with a caller-supplied loader.
    pub fn get_or_load_with<F>(&mut self, source: &TableSource, load: F) -> Result<Arc<Corpus>>
    where
        F: FnOnce(&TableSource) -> Result<Corpus>,
    {
        if let Some(corpus) = self.entries.get(source) {
            debug!(path = %source.path.display(), "Corpus cache hit");
            return Ok(Arc::clone(corpus));
        }

        debug!(path = %source.path.display(), "Corpus cache miss");
        let corpus = Arc::new(load(source)?);
        self.entries.insert(source.clone(), Arc::clone(&corpus));
        Ok(corpus)
    }

    pub fn contains(&self, source: &TableSource) -> bool {
        self.entries.contains_key(source)
    }

    /// Drop one entry so the next request reloads it.
    pub fn invalidate(&mut self, source: &TableSource) -> bool {
        self.entries.remove(source).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
