//! List preprocessor.
//!
//! Replaces every list block of a Markdown page with an
//! `<rw-list data-id="N" />` placeholder that pulldown-cmark passes through
//! as a raw HTML block. The parsed forests are kept as [`ListBlock`]s for
//! [`ListsProcessor`](super::ListsProcessor).

use std::fmt::Write;

use super::fence::FenceTracker;
use super::tokenizer::{ListTokenizer, ScannedLine, TokenKind};
use super::tree::{ListNode, TreeBuilder};

/// One list block found in a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListBlock {
    /// Placeholder ID, unique within the page.
    pub id: usize,
    /// Line where the block starts (1-indexed).
    pub line: usize,
    /// Block source without trailing blank lines.
    pub source: String,
    /// Parsed items.
    pub forest: Vec<ListNode>,
}

/// Lines of the block currently being collected.
#[derive(Debug)]
struct PendingBlock {
    line: usize,
    source: String,
}

/// Preprocessor that lifts list blocks out of Markdown.
///
/// # Example
///
/// ```
/// use rw_renderer::lists::ListsPreprocessor;
///
/// let mut preprocessor = ListsPreprocessor::new(4);
/// let output = preprocessor.process("Intro\n\n- [x] one\n- ( ) two\n\nOutro\n");
///
/// assert!(output.contains(r#"<rw-list data-id="0" />"#));
/// assert!(!output.contains("- [x] one"));
///
/// let blocks = preprocessor.into_blocks();
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].forest.len(), 2);
/// ```
#[derive(Debug)]
pub struct ListsPreprocessor {
    tokenizer: ListTokenizer,
    builder: TreeBuilder,
    fence: FenceTracker,
    /// Line of a code fence opened inside a list item, while it is open.
    item_fence: Option<usize>,
    pending: Option<PendingBlock>,
    blocks: Vec<ListBlock>,
    warnings: Vec<String>,
}

impl ListsPreprocessor {
    /// Create a preprocessor expanding tabs to multiples of `tab_width`.
    #[must_use]
    pub fn new(tab_width: usize) -> Self {
        Self {
            tokenizer: ListTokenizer::with_tab_width(tab_width),
            builder: TreeBuilder::new(),
            fence: FenceTracker::new(),
            item_fence: None,
            pending: None,
            blocks: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Process a page and return the Markdown with list blocks replaced.
    #[must_use]
    pub fn process(&mut self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());

        for (idx, line) in input.lines().enumerate() {
            self.process_line(line, idx + 1, &mut output);
        }

        if let Some(forest) = self.builder.flush() {
            self.emit_block(forest, &mut output);
        }
        if let Some(line) = self.fence.open_line().or(self.item_fence) {
            self.warnings
                .push(format!("line {line}: unclosed code fence"));
        }

        if !input.ends_with('\n') && output.ends_with('\n') {
            output.pop();
        }
        output
    }

    /// Warnings generated during processing.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Consume the preprocessor and return the collected blocks.
    #[must_use]
    pub fn into_blocks(self) -> Vec<ListBlock> {
        self.blocks
    }

    fn process_line(&mut self, line: &str, line_num: usize, output: &mut String) {
        if self.fence.in_fence() {
            self.fence.update(line, line_num);
            push_line(output, line);
            return;
        }

        match self.tokenizer.scan_line(line) {
            ScannedLine::Text(text) => {
                if let Some(forest) = self.builder.flush() {
                    self.emit_block(forest, output);
                }
                self.fence.update(text, line_num);
                push_line(output, text);
            }
            ScannedLine::List(token) => {
                match token.kind {
                    TokenKind::Blank if !self.builder.is_open() => {
                        push_line(output, line);
                        return;
                    }
                    TokenKind::FenceOpen => self.item_fence = Some(line_num),
                    TokenKind::FenceClose => self.item_fence = None,
                    _ => {}
                }

                let pending = self.pending.get_or_insert_with(|| PendingBlock {
                    line: line_num,
                    source: String::new(),
                });
                push_line(&mut pending.source, line);

                if let Some(forest) = self.builder.push_token(&token) {
                    self.emit_block(forest, output);
                }
            }
        }
    }

    /// Record a finished block and write its placeholder.
    fn emit_block(&mut self, forest: Vec<ListNode>, output: &mut String) {
        let id = self.blocks.len();
        let (line, mut source) = match self.pending.take() {
            Some(pending) => (pending.line, pending.source),
            None => (0, String::new()),
        };
        source.truncate(source.trim_end().len());

        tracing::debug!(id, line, items = forest.len(), "List block collected");
        self.blocks.push(ListBlock {
            id,
            line,
            source,
            forest,
        });

        // Blank lines around the tag make it a standalone HTML block.
        if !output.is_empty() && !output.ends_with("\n\n") {
            output.push('\n');
        }
        let _ = write!(output, "<rw-list data-id=\"{id}\" />\n\n");
    }
}

impl Default for ListsPreprocessor {
    fn default() -> Self {
        Self::new(super::tokenizer::DEFAULT_TAB_WIDTH)
    }
}

fn push_line(output: &mut String, line: &str) {
    output.push_str(line);
    output.push('\n');
}
