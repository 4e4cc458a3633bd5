//! List post-processor.
//!
//! Swaps the `<rw-list data-id="N" />` placeholders left by
//! [`ListsPreprocessor`](super::ListsPreprocessor) for rendered list HTML.

use std::collections::HashMap;

use super::preprocessor::ListBlock;
use super::render::{InlineStyle, render_forest};
use crate::cache::{ListKey, RenderCache};
use crate::processor::ContentProcessor;
use crate::util::parse_data_id;

const PLACEHOLDER_OPEN: &str = "<rw-list";
const PLACEHOLDER_CLOSE: &str = "/>";

/// Post-processor that renders list blocks into their placeholders.
///
/// When a [`RenderCache`] is attached, each block is looked up by the hash of
/// its source and render options before rendering.
pub struct ListsProcessor<'c> {
    blocks: HashMap<usize, ListBlock>,
    tab_width: usize,
    inline: InlineStyle,
    cache: Option<&'c RenderCache>,
    warnings: Vec<String>,
}

impl<'c> ListsProcessor<'c> {
    /// Create a processor for the blocks collected from one page.
    #[must_use]
    pub fn new(blocks: Vec<ListBlock>, tab_width: usize, inline: InlineStyle) -> Self {
        Self {
            blocks: blocks.into_iter().map(|b| (b.id, b)).collect(),
            tab_width,
            inline,
            cache: None,
            warnings: Vec::new(),
        }
    }

    /// Memoize rendered blocks in `cache`.
    #[must_use]
    pub fn with_cache(mut self, cache: &'c RenderCache) -> Self {
        self.cache = Some(cache);
        self
    }

    fn render_block(&self, block: &ListBlock) -> String {
        let render = || render_forest(&block.forest, self.inline);
        match self.cache {
            Some(cache) => {
                let key = ListKey {
                    source: &block.source,
                    tab_width: self.tab_width,
                    inline: self.inline,
                };
                cache.get_or_render(&key, render)
            }
            None => render(),
        }
    }
}

impl ContentProcessor for ListsProcessor<'_> {
    fn post_process(&mut self, html: &mut String) {
        let mut result = String::with_capacity(html.len());
        let mut remaining = html.as_str();

        while let Some(start) = remaining.find(PLACEHOLDER_OPEN) {
            result.push_str(&remaining[..start]);

            let Some(end) = remaining[start..]
                .find(PLACEHOLDER_CLOSE)
                .map(|i| start + i + PLACEHOLDER_CLOSE.len())
            else {
                result.push_str(&remaining[start..]);
                remaining = "";
                break;
            };

            let tag = &remaining[start..end];
            match parse_data_id(tag).and_then(|id| self.blocks.get(&id)) {
                Some(block) => result.push_str(&self.render_block(block)),
                None => {
                    self.warnings
                        .push(format!("list placeholder {tag} has no block, passing through"));
                    result.push_str(tag);
                }
            }

            remaining = &remaining[end..];
        }

        result.push_str(remaining);
        *html = result;
    }

    fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
