//! Markdown renderer with an extended list dialect.
//!
//! This crate renders Markdown pages to HTML fragments. Lists get their own
//! engine (see [`lists`]) supporting unordered, ordered, task and radio items
//! mixed at any nesting level; all other content is rendered by pulldown-cmark.
//!
//! # Architecture
//!
//! - [`lists`]: tokenizer, tree builder and renderer for list blocks, plus the
//!   preprocessor/post-processor pair that embeds them in a page
//! - [`MarkdownRenderer`]: runs the page pipeline and any registered
//!   [`ContentProcessor`] plugins
//! - [`RenderCache`]: content-addressed memoization of rendered list blocks,
//!   shared by reference between page renders
//!
//! # Example
//!
//! ```
//! use rw_renderer::{MarkdownRenderer, RenderCache};
//!
//! let cache = RenderCache::new();
//! let markdown = "1. Install\n1. Configure\n   - (x) Default profile\n   - ( ) Custom\n";
//! let result = MarkdownRenderer::new().render_markdown_cached(markdown, &cache);
//!
//! assert!(result.html.starts_with("<ol><li>Install</li><li>Configure<ul>"));
//! assert_eq!(cache.len(), 1);
//! ```

mod cache;
pub mod lists;
mod processor;
mod renderer;
mod util;

pub use cache::{ListKey, RenderCache};
pub use lists::InlineStyle;
pub use processor::ContentProcessor;
pub use renderer::{MarkdownRenderer, RenderResult};
pub use util::escape_html;
