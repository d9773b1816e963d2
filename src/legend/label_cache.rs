use indexmap::IndexMap;

/// Runtime metrics of a legend label cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabelCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

/// Label texts keyed by data index, evicting the oldest entry when full.
#[derive(Debug, Default)]
pub(crate) struct LabelCache {
    entries: IndexMap<usize, String>,
    hits: u64,
    misses: u64,
}

impl LabelCache {
    const MAX_ENTRIES: usize = 4096;

    /// Returns the cached text for `index`, formatting it on a miss.
    pub(crate) fn get_or_insert_with(
        &mut self,
        index: usize,
        format: impl FnOnce() -> String,
    ) -> &str {
        if self.entries.contains_key(&index) {
            self.hits = self.hits.saturating_add(1);
        } else {
            self.misses = self.misses.saturating_add(1);
            if self.entries.len() >= Self::MAX_ENTRIES {
                self.entries.shift_remove_index(0);
            }
            self.entries.insert(index, format());
        }
        self.entries.get(&index).map_or("", String::as_str)
    }

    pub(crate) fn peek(&self, index: usize) -> Option<&str> {
        self.entries.get(&index).map(String::as_str)
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn stats(&self) -> LabelCacheStats {
        LabelCacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.entries.len(),
        }
    }
}
