//! List tree construction.
//!
//! [`TreeBuilder`] turns a stream of [`ScannedLine`]s into forests of
//! [`ListNode`]s. Each forest is one contiguous list block; ordinary text or
//! two consecutive blank lines close it.

use super::tokenizer::{ItemKind, ListToken, ScannedLine, TokenKind};

/// Fenced code nested in a list item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeBlock {
    /// Info string of the opening fence (`rust`, `sh title="x"`, ...).
    pub info: String,
    /// Code lines with the fence indentation removed.
    pub lines: Vec<String>,
}

/// A piece of an item's body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content {
    /// One line of inline text.
    Text(String),
    /// A fenced code block.
    Code(CodeBlock),
}

/// One item of a list tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListNode {
    /// Kind of the item.
    pub kind: ItemKind,
    /// Body in source order. Consecutive text lines were attached by
    /// continuation lines and render separated by forced breaks.
    pub content: Vec<Content>,
    /// Nested items.
    pub children: Vec<ListNode>,
}

impl ListNode {
    /// Create a childless node with a single content line.
    #[must_use]
    pub fn new(kind: ItemKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            content: vec![Content::Text(text.into())],
            children: Vec::new(),
        }
    }

    /// Text lines of the body, skipping code blocks.
    #[must_use]
    pub fn text_lines(&self) -> Vec<&str> {
        self.content
            .iter()
            .filter_map(|part| match part {
                Content::Text(text) => Some(text.as_str()),
                Content::Code(_) => None,
            })
            .collect()
    }

    /// Number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Self::count).sum::<usize>()
    }

    /// Depth of this subtree (a leaf has depth 1).
    #[must_use]
    pub fn height(&self) -> usize {
        1 + self.children.iter().map(Self::height).max().unwrap_or(0)
    }
}

/// Builds list forests from scanned lines.
///
/// The stack holds the open path from a root item to the most recent item;
/// the position in the stack is the item's depth. Closed items are attached
/// to their parent (or to the roots) as they are popped.
///
/// # Example
///
/// ```
/// use rw_renderer::lists::{ItemKind, TreeBuilder, tokenize};
///
/// let lines = tokenize("- a\n  - [x] b\n- c", 4);
/// let forests = TreeBuilder::build(&lines);
///
/// assert_eq!(forests.len(), 1);
/// assert_eq!(forests[0].len(), 2);
/// assert_eq!(forests[0][0].children[0].kind, ItemKind::Task { checked: true });
/// ```
#[derive(Debug, Default)]
pub struct TreeBuilder {
    stack: Vec<ListNode>,
    roots: Vec<ListNode>,
    blank_run: usize,
}

impl TreeBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every forest in a complete line sequence.
    #[must_use]
    pub fn build(lines: &[ScannedLine<'_>]) -> Vec<Vec<ListNode>> {
        let mut builder = Self::new();
        let mut forests: Vec<Vec<ListNode>> = lines
            .iter()
            .filter_map(|line| builder.push(line))
            .collect();
        forests.extend(builder.finish());
        forests
    }

    /// Whether any item has been seen since the last flush.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.stack.is_empty() || !self.roots.is_empty()
    }

    /// Feed one line. Returns the finished forest when the line closes it.
    pub fn push(&mut self, line: &ScannedLine<'_>) -> Option<Vec<ListNode>> {
        match line {
            ScannedLine::List(token) => self.push_token(token),
            ScannedLine::Text(_) => self.flush(),
        }
    }

    /// Feed one list token. Returns the finished forest when the token
    /// closes it (a second consecutive blank line).
    pub fn push_token(&mut self, token: &ListToken) -> Option<Vec<ListNode>> {
        match token.kind {
            TokenKind::Blank => {
                self.blank_run += 1;
                if self.blank_run >= 2 {
                    return self.flush();
                }
            }
            TokenKind::Continuation => {
                self.blank_run = 0;
                self.continue_item(token);
            }
            TokenKind::Item(kind) => {
                self.blank_run = 0;
                self.open_item(kind, token);
            }
            TokenKind::FenceOpen => {
                self.blank_run = 0;
                let code = Content::Code(CodeBlock {
                    info: token.text.clone(),
                    lines: Vec::new(),
                });
                self.append(token, code);
            }
            TokenKind::FenceLine => self.push_code_line(token),
            TokenKind::FenceClose => self.blank_run = 0,
        }
        None
    }

    /// Close everything and return the last forest, if any.
    #[must_use]
    pub fn finish(mut self) -> Option<Vec<ListNode>> {
        self.flush()
    }

    /// Close all open items and hand out the forest.
    pub fn flush(&mut self) -> Option<Vec<ListNode>> {
        self.blank_run = 0;
        self.close_to(0);
        if self.roots.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.roots))
        }
    }

    fn open_item(&mut self, kind: ItemKind, token: &ListToken) {
        // Levels on the stack are contiguous, so an over-indented item can
        // go at most one level below the current top.
        let depth = token.depth.min(self.stack.len());
        self.close_to(depth);
        self.stack.push(ListNode::new(kind, token.text.as_str()));
    }

    fn continue_item(&mut self, token: &ListToken) {
        self.append(token, Content::Text(token.text.clone()));
    }

    /// Append to the body of the item at the token's depth.
    fn append(&mut self, token: &ListToken, content: Content) {
        if self.stack.is_empty() {
            tracing::debug!(text = %token.text, "continuation without an open item");
            self.stack.push(ListNode {
                kind: ItemKind::Unordered,
                content: Vec::new(),
                children: Vec::new(),
            });
        }

        self.close_to(token.depth + 1);
        if let Some(top) = self.stack.last_mut() {
            top.content.push(content);
        }
    }

    fn push_code_line(&mut self, token: &ListToken) {
        if let Some(Content::Code(code)) = self
            .stack
            .last_mut()
            .and_then(|top| top.content.last_mut())
        {
            code.lines.push(token.text.clone());
            return;
        }
        self.continue_item(token);
    }

    /// Pop until at most `depth` items remain open.
    fn close_to(&mut self, depth: usize) {
        while self.stack.len() > depth {
            let Some(node) = self.stack.pop() else {
                break;
            };
            match self.stack.last_mut() {
                Some(parent) => parent.children.push(node),
                None => self.roots.push(node),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lists::tokenizer::{DEFAULT_TAB_WIDTH, tokenize};

    fn forests(input: &str) -> Vec<Vec<ListNode>> {
        TreeBuilder::build(&tokenize(input, DEFAULT_TAB_WIDTH))
    }

    fn single(input: &str) -> Vec<ListNode> {
        let mut forests = forests(input);
        assert_eq!(forests.len(), 1, "expected exactly one list block");
        forests.remove(0)
    }

    fn item_tokens(input: &str) -> usize {
        tokenize(input, DEFAULT_TAB_WIDTH)
            .iter()
            .filter(|line| {
                matches!(
                    line,
                    ScannedLine::List(ListToken {
                        kind: TokenKind::Item(_),
                        ..
                    })
                )
            })
            .count()
    }

    #[test]
    fn test_flat_siblings() {
        let forest = single("- a\n- b\n- c");
        assert_eq!(forest.len(), 3);
        assert!(forest.iter().all(|n| n.children.is_empty()));
        assert_eq!(forest[2].text_lines(), vec!["c"]);
    }

    #[test]
    fn test_mixed_three_level_nesting() {
        let forest = single("- root\n  - [ ] task\n    - (x) radio");
        assert_eq!(forest.len(), 1);

        let root = &forest[0];
        assert_eq!(root.kind, ItemKind::Unordered);
        assert_eq!(root.height(), 3);

        let task = &root.children[0];
        assert_eq!(task.kind, ItemKind::Task { checked: false });

        let radio = &task.children[0];
        assert_eq!(radio.kind, ItemKind::Radio { selected: true });
        assert!(radio.children.is_empty());
    }

    #[test]
    fn test_mixed_kinds_as_siblings() {
        let forest = single("1. first\n- [x] done\n- (x) pick\n- plain");
        let kinds: Vec<ItemKind> = forest.iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ItemKind::Ordered(1),
                ItemKind::Task { checked: true },
                ItemKind::Radio { selected: true },
                ItemKind::Unordered,
            ]
        );
    }

    #[test]
    fn test_dedent_returns_to_parent_level() {
        let forest = single("- a\n  - b\n    - c\n- d");
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].count(), 3);
        assert_eq!(forest[1].text_lines(), vec!["d"]);
    }

    #[test]
    fn test_over_indented_item_rounds_down() {
        let forest = single("- a\n  - b\n      - c");
        let b = &forest[0].children[0];
        assert_eq!(b.children.len(), 1);
        assert_eq!(b.children[0].text_lines(), vec!["c"]);
        assert!(b.children[0].children.is_empty());
        assert_eq!(forest[0].height(), 3);
    }

    #[test]
    fn test_first_child_far_indented_is_single_level() {
        let forest = single("- a\n        - b\n- c");
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].children.len(), 1);
        assert_eq!(forest[0].height(), 2);
    }

    #[test]
    fn test_continuation_appends_to_previous_item() {
        let forest = single("- first\\\n  more\n- second");
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].text_lines(), vec!["first", "more"]);
    }

    #[test]
    fn test_continuation_attaches_to_nested_item() {
        let forest = single("- a\n  - b  \n  still b\n- c");
        let b = &forest[0].children[0];
        assert_eq!(b.text_lines(), vec!["b", "still b"]);
        assert_eq!(forest[0].text_lines(), vec!["a"]);
    }

    #[test]
    fn test_single_blank_keeps_list_open() {
        let forest = single("- a\n\n- b");
        assert_eq!(forest.len(), 2);
    }

    #[test]
    fn test_two_blanks_split_lists() {
        let forests = forests("- a\n\n\n- b");
        assert_eq!(forests.len(), 2);
        assert_eq!(forests[0][0].text_lines(), vec!["a"]);
        assert_eq!(forests[1][0].text_lines(), vec!["b"]);
    }

    #[test]
    fn test_text_splits_lists() {
        let forests = forests("- a\nParagraph\n- b");
        assert_eq!(forests.len(), 2);
    }

    #[test]
    fn test_node_count_matches_item_tokens() {
        let input = "- a\n  1. b\\\n  more\n  1. c\n    - [ ] d\n\n    - ( ) e\n- f";
        let total: usize = forests(input)
            .iter()
            .flat_map(|forest| forest.iter().map(ListNode::count))
            .sum();
        assert_eq!(total, item_tokens(input));
        assert_eq!(total, 6);
    }

    #[test]
    fn test_orphan_continuation_degrades_to_item() {
        let mut builder = TreeBuilder::new();
        let token = ListToken {
            depth: 0,
            kind: TokenKind::Continuation,
            text: "stray".to_owned(),
            hard_break: false,
        };
        assert_eq!(builder.push_token(&token), None);
        let forest = builder.finish().unwrap();
        assert_eq!(forest, vec![ListNode::new(ItemKind::Unordered, "stray")]);
    }

    #[test]
    fn test_later_group_keeps_its_own_step() {
        let forest = single("- a\n    - b\n- c\n  - d");
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[1].text_lines(), vec!["c"]);
        assert_eq!(forest[1].children.len(), 1);
        assert_eq!(forest[1].children[0].text_lines(), vec!["d"]);
    }

    #[test]
    fn test_fenced_code_in_item() {
        let forest = single("1. Install:\n\n   ```sh\n   - run make\n   ```\n   Then check.\n1. Done");
        assert_eq!(forest.len(), 2);
        assert!(forest[0].children.is_empty());
        assert_eq!(
            forest[0].content,
            vec![
                Content::Text("Install:".to_owned()),
                Content::Code(CodeBlock {
                    info: "sh".to_owned(),
                    lines: vec!["- run make".to_owned()],
                }),
                Content::Text("Then check.".to_owned()),
            ]
        );
        assert_eq!(forest[1].text_lines(), vec!["Done"]);
    }

    #[test]
    fn test_fenced_code_in_nested_item() {
        let forest = single("- a\n  - b\n    ```\n    x\n    ```\n- c");
        let b = &forest[0].children[0];
        assert!(matches!(b.content.last(), Some(Content::Code(code)) if code.lines == ["x"]));
        assert_eq!(forest[0].text_lines(), vec!["a"]);
        assert_eq!(forest.len(), 2);
    }

    #[test]
    fn test_blank_separated_paragraph_in_item() {
        let forest = single("- a\n\n  more about a\n- b");
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].text_lines(), vec!["a", "more about a"]);
    }

    #[test]
    fn test_only_text_produces_nothing() {
        assert!(forests("Just a paragraph\n\nAnother one").is_empty());
    }

    #[test]
    fn test_is_open() {
        let mut builder = TreeBuilder::new();
        assert!(!builder.is_open());
        builder.push(&ScannedLine::List(ListToken {
            depth: 0,
            kind: TokenKind::Item(ItemKind::Unordered),
            text: "a".to_owned(),
            hard_break: false,
        }));
        assert!(builder.is_open());
        assert!(builder.push(&ScannedLine::Text("text")).is_some());
        assert!(!builder.is_open());
    }
}
