//! Extended list dialect.
//!
//! Supports five interleaved list syntaxes with indentation-based nesting:
//!
//! ```markdown
//! - unordered
//!   1. ordered (source ordinals are renumbered)
//!   - [x] task
//!     - (x) radio option
//!     - ( ) another option
//! - item with a forced break\
//!   continued on the next line
//! - item with nested code
//!   ~~~sh
//!   make install
//!   ~~~
//! ```
//!
//! # Architecture
//!
//! Lines flow through three stages:
//!
//! 1. [`ListTokenizer`] classifies each line and computes its depth.
//! 2. [`TreeBuilder`] assembles tokens into forests of [`ListNode`]s.
//! 3. [`ListRenderer`] renders a forest to HTML.
//!
//! Inside a page the stages run in two phases, like other block extensions:
//! [`ListsPreprocessor`] replaces each list block with an `<rw-list>`
//! placeholder before pulldown-cmark runs, and [`ListsProcessor`] renders the
//! blocks into those placeholders afterwards.
//!
//! # Usage
//!
//! ```
//! use rw_renderer::lists::{InlineStyle, TreeBuilder, render_forest, tokenize};
//!
//! let lines = tokenize("1. a\n1. b\n   - [x] done", 4);
//! let forests = TreeBuilder::build(&lines);
//! let html = render_forest(&forests[0], InlineStyle::Plain);
//!
//! assert!(html.starts_with("<ol><li>a</li><li>b<ul>"));
//! assert!(html.contains(r#"<input type="checkbox" disabled checked />"#));
//! ```

mod fence;
mod preprocessor;
mod processor;
mod render;
mod tokenizer;
mod tree;

pub use preprocessor::{ListBlock, ListsPreprocessor};
pub use processor::ListsProcessor;
pub use render::{
    InlineRenderer, InlineStyle, ListRenderer, MarkdownInline, PlainInline, render_forest,
};
pub use tokenizer::{
    DEFAULT_TAB_WIDTH, ItemKind, ListToken, ListTokenizer, ScannedLine, TokenKind, tokenize,
};
pub use tree::{CodeBlock, Content, ListNode, TreeBuilder};
