//! Content-addressed memoization of rendered list blocks.
//!
//! [`RenderCache`] is created once per process, shared by reference between
//! page renders (including parallel ones) and cleared on every full rebuild.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use sha2::{Digest, Sha256};

use crate::lists::InlineStyle;

/// Everything that affects the HTML of one list block.
#[derive(Debug, Clone, Copy)]
pub struct ListKey<'a> {
    /// Block source, exactly as it appeared in the page.
    pub source: &'a str,
    /// Tab width used for indentation.
    pub tab_width: usize,
    /// Inline rendering style.
    pub inline: InlineStyle,
}

impl ListKey<'_> {
    /// SHA-256 of `"{tab_width}:{inline}:{source}"`, hex encoded.
    #[must_use]
    pub fn compute_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(format!("{}:{}:", self.tab_width, self.inline.as_str()).as_bytes());
        hasher.update(self.source.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Shared table of rendered list blocks keyed by content hash.
///
/// # Example
///
/// ```
/// use rw_renderer::{InlineStyle, ListKey, RenderCache};
///
/// let cache = RenderCache::new();
/// let key = ListKey { source: "- a", tab_width: 4, inline: InlineStyle::Plain };
///
/// let first = cache.get_or_render(&key, || "<ul><li>a</li></ul>".to_owned());
/// let second = cache.get_or_render(&key, || unreachable!());
/// assert_eq!(first, second);
/// assert_eq!(cache.hits(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RenderCache {
    entries: RwLock<HashMap<String, String>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl RenderCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached HTML for `key`, rendering and storing it on a miss.
    pub fn get_or_render(&self, key: &ListKey<'_>, render: impl FnOnce() -> String) -> String {
        let hash = key.compute_hash();

        let cached = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&hash)
            .cloned();
        if let Some(html) = cached {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return html;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let html = render();
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(hash, html.clone());
        html
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&self) {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let dropped = entries.len();
        entries.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        tracing::debug!(dropped, "Render cache cleared");
    }

    /// Number of stored blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the cache holds no blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lookups answered from the cache since the last clear.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    /// Lookups that had to render since the last clear.
    #[must_use]
    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }
}
