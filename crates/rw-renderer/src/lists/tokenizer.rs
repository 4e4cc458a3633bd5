//! Line classification for the extended list dialect.
//!
//! [`ListTokenizer`] looks at one line at a time and decides whether it opens
//! a list item (unordered, ordered, task or radio), continues the previous
//! item, is blank, or is ordinary text that ends the current list. Fenced
//! code indented under an item is passed through verbatim as part of that
//! item.

use super::fence::FenceTracker;

/// Default width of a tab stop when measuring indentation.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Indentation at which a line outside a list becomes an indented code block.
const CODE_INDENT: usize = 4;

/// Ordinals longer than this are not list markers (`CommonMark` limit).
const MAX_ORDINAL_DIGITS: usize = 9;

/// Kind of list item opened by a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    /// `-`, `*` or `+` bullet.
    Unordered,
    /// `N.` or `N)` item. Holds the ordinal as written in the source.
    Ordered(u32),
    /// `- [ ]` / `- [x]` checkbox item.
    Task {
        /// Whether the box is ticked.
        checked: bool,
    },
    /// `- ( )` / `- (x)` radio item.
    Radio {
        /// Whether the option is marked.
        selected: bool,
    },
}

impl ItemKind {
    /// Whether the item belongs in a numbered list.
    #[must_use]
    pub fn is_ordered(self) -> bool {
        matches!(self, Self::Ordered(_))
    }
}

/// Classification of a list line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// The line opens a new item.
    Item(ItemKind),
    /// The line extends the body of the previous item.
    Continuation,
    /// The line is empty or whitespace only.
    Blank,
    /// Opening fence of a code block nested in the item. The token text is
    /// the info string.
    FenceOpen,
    /// Line inside a nested code block, kept verbatim.
    FenceLine,
    /// Closing fence of a nested code block.
    FenceClose,
}

/// One list line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListToken {
    /// Nesting level relative to the first item of the list.
    pub depth: usize,
    /// What the line does.
    pub kind: TokenKind,
    /// Inline content with markers and the trailing forced break removed.
    pub text: String,
    /// Whether the line ended with a forced break (`\` or two spaces).
    pub hard_break: bool,
}

impl ListToken {
    fn blank(depth: usize) -> Self {
        Self {
            depth,
            kind: TokenKind::Blank,
            text: String::new(),
            hard_break: false,
        }
    }
}

/// A classified source line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScannedLine<'a> {
    /// Part of the list dialect.
    List(ListToken),
    /// Anything else, passed through untouched.
    Text(&'a str),
}

/// State of the list currently being scanned.
#[derive(Debug)]
struct ListContext {
    /// Marker column of each open level; the index is the depth.
    columns: Vec<usize>,
    /// Marker column of the most recent item.
    last_column: usize,
    /// Depth of the most recent item.
    last_depth: usize,
}

impl ListContext {
    fn new(base: usize) -> Self {
        Self {
            columns: Vec::new(),
            last_column: base,
            last_depth: 0,
        }
    }

    /// Depth of an item whose marker sits at `column`.
    ///
    /// Each level remembers the column of its items, so every sibling group
    /// keeps its own indentation step. An item deeper than the open path
    /// becomes a child of the deepest open level. An item falling between
    /// two open levels rounds down onto the shallower one.
    fn depth_of(&mut self, column: usize) -> usize {
        let mut closed = false;
        while self.columns.last().is_some_and(|&top| top > column) {
            self.columns.pop();
            closed = true;
        }

        match self.columns.last() {
            Some(&top) if top == column || closed => {}
            _ => self.columns.push(column),
        }
        self.columns.len() - 1
    }
}

/// Fenced code block open under a list item.
#[derive(Debug)]
struct NestedFence {
    tracker: FenceTracker,
    /// Indentation of the opening fence, stripped from every code line.
    column: usize,
}

/// Stateful line classifier.
///
/// Detection order per line (first match wins): line inside a nested code
/// fence, blank, thematic break, indented code outside a list, code fence
/// under the current item, task item, radio item, unordered item, ordered
/// item, continuation, text.
///
/// # Example
///
/// ```
/// use rw_renderer::lists::{ItemKind, ListTokenizer, ScannedLine, TokenKind};
///
/// let mut tokenizer = ListTokenizer::new();
/// let ScannedLine::List(token) = tokenizer.scan_line("- [x] Done") else {
///     panic!("expected a list line");
/// };
/// assert_eq!(token.kind, TokenKind::Item(ItemKind::Task { checked: true }));
/// assert_eq!(token.text, "Done");
/// ```
#[derive(Debug)]
pub struct ListTokenizer {
    tab_width: usize,
    context: Option<ListContext>,
    fence: Option<NestedFence>,
    blank_run: usize,
    pending_break: bool,
    line: usize,
}

impl ListTokenizer {
    /// Create a tokenizer with the default tab width.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tab_width(DEFAULT_TAB_WIDTH)
    }

    /// Create a tokenizer that expands tabs to multiples of `tab_width`.
    #[must_use]
    pub fn with_tab_width(tab_width: usize) -> Self {
        Self {
            tab_width: tab_width.max(1),
            context: None,
            fence: None,
            blank_run: 0,
            pending_break: false,
            line: 0,
        }
    }

    /// Whether a list is currently open.
    #[must_use]
    pub fn in_list(&self) -> bool {
        self.context.is_some()
    }

    /// Line (1-indexed, counted from the first scanned line) of a code fence
    /// opened inside a list item and not yet closed.
    #[must_use]
    pub fn open_fence_line(&self) -> Option<usize> {
        self.fence
            .as_ref()
            .and_then(|fence| fence.tracker.open_line())
    }

    /// Classify one line.
    pub fn scan_line<'a>(&mut self, line: &'a str) -> ScannedLine<'a> {
        self.line += 1;
        if self.fence.is_some() {
            return ScannedLine::List(self.fence_line(line));
        }

        if line.trim().is_empty() {
            return ScannedLine::List(self.blank());
        }

        let (column, rest) = split_indent(line, self.tab_width);
        if is_thematic_break(rest) || (self.context.is_none() && column >= CODE_INDENT) {
            self.reset();
            return ScannedLine::Text(line);
        }

        if let Some(token) = self.fence_open(column, rest) {
            return ScannedLine::List(token);
        }

        if let Some(marker) = parse_marker(rest) {
            return ScannedLine::List(self.item(column, marker));
        }

        if let Some(token) = self.continuation(column, rest) {
            return ScannedLine::List(token);
        }

        self.reset();
        ScannedLine::Text(line)
    }

    fn blank(&mut self) -> ListToken {
        self.pending_break = false;
        self.blank_run += 1;
        let depth = self.context.as_ref().map_or(0, |ctx| ctx.last_depth);
        if self.blank_run >= 2 {
            self.context = None;
        }
        ListToken::blank(depth)
    }

    fn item(&mut self, column: usize, marker: Marker<'_>) -> ListToken {
        let ctx = self
            .context
            .get_or_insert_with(|| ListContext::new(column));
        let depth = ctx.depth_of(column);
        ctx.last_column = column;
        ctx.last_depth = depth;

        let (text, hard_break) = strip_hard_break(marker.content);
        self.pending_break = hard_break;
        self.blank_run = 0;

        ListToken {
            depth,
            kind: TokenKind::Item(marker.kind),
            text: text.to_owned(),
            hard_break,
        }
    }

    fn continuation(&mut self, column: usize, rest: &str) -> Option<ListToken> {
        let ctx = self.context.as_ref()?;
        if !self.pending_break && column <= ctx.last_column {
            return None;
        }

        let (text, hard_break) = strip_hard_break(rest);
        let depth = ctx.last_depth;
        self.pending_break = hard_break;
        self.blank_run = 0;

        Some(ListToken {
            depth,
            kind: TokenKind::Continuation,
            text: text.to_owned(),
            hard_break,
        })
    }

    /// Open a code fence indented under the most recent item.
    fn fence_open(&mut self, column: usize, rest: &str) -> Option<ListToken> {
        let ctx = self.context.as_ref()?;
        if column <= ctx.last_column {
            return None;
        }

        let mut tracker = FenceTracker::new();
        if !tracker.update(rest, self.line) {
            return None;
        }
        self.fence = Some(NestedFence { tracker, column });
        self.pending_break = false;
        self.blank_run = 0;

        Some(ListToken {
            depth: ctx.last_depth,
            kind: TokenKind::FenceOpen,
            text: rest.trim_start_matches(['`', '~']).trim().to_owned(),
            hard_break: false,
        })
    }

    /// Classify a line while a nested code fence is open.
    fn fence_line(&mut self, line: &str) -> ListToken {
        let depth = self.context.as_ref().map_or(0, |ctx| ctx.last_depth);
        let Some(fence) = self.fence.as_mut() else {
            return ListToken::blank(depth);
        };

        if fence.tracker.update(line, self.line) {
            self.fence = None;
            return ListToken {
                depth,
                kind: TokenKind::FenceClose,
                text: String::new(),
                hard_break: false,
            };
        }

        let (column, rest) = split_indent(line, self.tab_width);
        let text = if rest.is_empty() {
            String::new()
        } else {
            format!("{}{rest}", " ".repeat(column.saturating_sub(fence.column)))
        };
        ListToken {
            depth,
            kind: TokenKind::FenceLine,
            text,
            hard_break: false,
        }
    }

    fn reset(&mut self) {
        self.context = None;
        self.blank_run = 0;
        self.pending_break = false;
    }
}

impl Default for ListTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify every line of `input` with a fresh tokenizer.
#[must_use]
pub fn tokenize(input: &str, tab_width: usize) -> Vec<ScannedLine<'_>> {
    let mut tokenizer = ListTokenizer::with_tab_width(tab_width);
    input.lines().map(|line| tokenizer.scan_line(line)).collect()
}

/// Item marker recognised at the start of a line.
#[derive(Debug, PartialEq, Eq)]
struct Marker<'a> {
    kind: ItemKind,
    content: &'a str,
}

/// Split a line into its indentation width (in columns) and the rest.
fn split_indent(line: &str, tab_width: usize) -> (usize, &str) {
    let mut column = 0;
    for (idx, ch) in line.char_indices() {
        match ch {
            ' ' => column += 1,
            '\t' => column += tab_width - column % tab_width,
            _ => return (column, &line[idx..]),
        }
    }
    (column, "")
}

/// `***`, `- - -`, `___` and friends.
fn is_thematic_break(rest: &str) -> bool {
    let mut chars = rest.chars().filter(|c| !c.is_whitespace());
    let Some(first) = chars.next() else {
        return false;
    };
    if !matches!(first, '-' | '*' | '_') {
        return false;
    }
    let mut count = 1;
    for ch in chars {
        if ch != first {
            return false;
        }
        count += 1;
    }
    count >= 3
}

fn parse_marker(rest: &str) -> Option<Marker<'_>> {
    parse_bullet(rest).or_else(|| parse_ordered(rest))
}

fn parse_bullet(rest: &str) -> Option<Marker<'_>> {
    if !rest.starts_with(['-', '*', '+']) {
        return None;
    }
    let after = &rest[1..];
    if !after.starts_with([' ', '\t']) {
        return None;
    }
    let body = after.trim_start();

    if let Some((checked, content)) = parse_state_box(body, b'[', b']') {
        return Some(Marker {
            kind: ItemKind::Task { checked },
            content,
        });
    }
    if let Some((selected, content)) = parse_state_box(body, b'(', b')') {
        return Some(Marker {
            kind: ItemKind::Radio { selected },
            content,
        });
    }

    Some(Marker {
        kind: ItemKind::Unordered,
        content: body,
    })
}

/// Parse `[ ]`, `[x]`, `( )`, `(x)` followed by whitespace or end of line.
fn parse_state_box(body: &str, open: u8, close: u8) -> Option<(bool, &str)> {
    let bytes = body.as_bytes();
    if bytes.len() < 3 || bytes[0] != open || bytes[2] != close {
        return None;
    }
    let state = match bytes[1] {
        b' ' => false,
        b'x' | b'X' => true,
        _ => return None,
    };
    let tail = &body[3..];
    if !tail.is_empty() && !tail.starts_with([' ', '\t']) {
        return None;
    }
    Some((state, tail.trim_start()))
}

fn parse_ordered(rest: &str) -> Option<Marker<'_>> {
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || digits > MAX_ORDINAL_DIGITS {
        return None;
    }
    let after = &rest[digits..];
    let after = after
        .strip_prefix('.')
        .or_else(|| after.strip_prefix(')'))?;
    if !after.is_empty() && !after.starts_with([' ', '\t']) {
        return None;
    }
    let ordinal = rest[..digits].parse().ok()?;
    Some(Marker {
        kind: ItemKind::Ordered(ordinal),
        content: after.trim_start(),
    })
}

/// Remove trailing whitespace and a forced-break marker.
///
/// Two or more trailing spaces, or an unescaped trailing backslash, end the
/// line with a forced break.
fn strip_hard_break(text: &str) -> (&str, bool) {
    let trailing_spaces = text.len() - text.trim_end_matches(' ').len();
    let trimmed = text.trim_end();
    if trailing_spaces >= 2 {
        return (trimmed, true);
    }

    let backslashes = trimmed.len() - trimmed.trim_end_matches('\\').len();
    if backslashes % 2 == 1 {
        return (trimmed[..trimmed.len() - 1].trim_end(), true);
    }

    (trimmed, false)
}
