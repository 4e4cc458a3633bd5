//! HTML rendering of list forests.

use std::fmt::Write;

use pulldown_cmark::{Options, Parser};

use super::tokenizer::ItemKind;
use super::tree::{CodeBlock, Content, ListNode};
use crate::util::escape_html;

/// Renders the inline content of a list item.
pub trait InlineRenderer {
    /// Append the HTML for `text` to `out`.
    fn render_inline(&self, text: &str, out: &mut String);
}

/// Escapes item text without interpreting any Markdown.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainInline;

impl InlineRenderer for PlainInline {
    fn render_inline(&self, text: &str, out: &mut String) {
        out.push_str(&escape_html(text));
    }
}

/// Renders item text as inline Markdown with `pulldown-cmark`.
///
/// Text that pulldown-cmark would turn into a block (a heading, a quote, a
/// nested list) is escaped instead, so list structure only ever comes from
/// the list engine.
#[derive(Clone, Copy, Debug)]
pub struct MarkdownInline {
    options: Options,
}

impl Default for MarkdownInline {
    fn default() -> Self {
        Self {
            options: Options::ENABLE_STRIKETHROUGH,
        }
    }
}

impl InlineRenderer for MarkdownInline {
    fn render_inline(&self, text: &str, out: &mut String) {
        let mut html = String::with_capacity(text.len() + 16);
        pulldown_cmark::html::push_html(&mut html, Parser::new_ext(text, self.options));

        // Inline-only text renders as exactly one paragraph.
        let inner = html
            .trim_end()
            .strip_prefix("<p>")
            .and_then(|rest| rest.strip_suffix("</p>"))
            .filter(|inner| !inner.contains("<p>"));
        match inner {
            Some(inner) => out.push_str(inner),
            None => out.push_str(&escape_html(text)),
        }
    }
}

/// Inline rendering style selectable from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InlineStyle {
    /// Inline Markdown (emphasis, code, links).
    #[default]
    Markdown,
    /// Escaped literal text.
    Plain,
}

impl InlineStyle {
    /// Stable name used in cache keys.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Plain => "plain",
        }
    }
}

/// Renders list forests to HTML.
///
/// - Consecutive ordered siblings share an `<ol>`; unordered, task and radio
///   siblings share a `<ul>`.
/// - Ordered items are numbered in document order across their sibling group,
///   whatever ordinals the source used.
/// - Task and radio items get a disabled checkbox or radio control. Radio
///   controls carry no `name`, so any number of selected siblings display as
///   selected.
///
/// # Example
///
/// ```
/// use rw_renderer::lists::{ItemKind, ListNode, ListRenderer, PlainInline};
///
/// let forest = vec![
///     ListNode::new(ItemKind::Ordered(1), "one"),
///     ListNode::new(ItemKind::Ordered(1), "two"),
/// ];
/// let html = ListRenderer::new(PlainInline).render(&forest);
/// assert_eq!(html, "<ol><li>one</li><li>two</li></ol>");
/// ```
#[derive(Debug, Default)]
pub struct ListRenderer<I: InlineRenderer> {
    inline: I,
}

impl<I: InlineRenderer> ListRenderer<I> {
    /// Create a renderer with the given inline renderer.
    #[must_use]
    pub fn new(inline: I) -> Self {
        Self { inline }
    }

    /// Render a forest to an HTML fragment.
    #[must_use]
    pub fn render(&self, forest: &[ListNode]) -> String {
        let mut out = String::with_capacity(forest.len() * 32);
        self.render_group(forest, &mut out);
        out
    }

    fn render_group(&self, nodes: &[ListNode], out: &mut String) {
        let mut numbered = 0;
        for run in nodes.chunk_by(|a, b| a.kind.is_ordered() == b.kind.is_ordered()) {
            let ordered = run[0].kind.is_ordered();
            if !ordered {
                out.push_str("<ul>");
            } else if numbered == 0 {
                out.push_str("<ol>");
            } else {
                let _ = write!(out, r#"<ol start="{}">"#, numbered + 1);
            }

            for node in run {
                self.render_item(node, out);
            }

            if ordered {
                numbered += run.len();
                out.push_str("</ol>");
            } else {
                out.push_str("</ul>");
            }
        }
    }

    fn render_item(&self, node: &ListNode, out: &mut String) {
        match node.kind {
            ItemKind::Task { checked } => {
                out.push_str(r#"<li class="task-list-item"><input type="checkbox" disabled"#);
                push_state(checked, out);
            }
            ItemKind::Radio { selected } => {
                out.push_str(r#"<li class="radio-list-item"><input type="radio" disabled"#);
                push_state(selected, out);
            }
            ItemKind::Unordered | ItemKind::Ordered(_) => out.push_str("<li>"),
        }

        let mut after_text = false;
        for part in &node.content {
            match part {
                Content::Text(line) => {
                    if after_text {
                        out.push_str("<br />");
                    }
                    self.inline.render_inline(line, out);
                    after_text = true;
                }
                Content::Code(code) => {
                    render_code(code, out);
                    after_text = false;
                }
            }
        }

        if !node.children.is_empty() {
            self.render_group(&node.children, out);
        }
        out.push_str("</li>");
    }
}

/// Fenced code in the same shape pulldown-cmark gives top-level fences.
fn render_code(code: &CodeBlock, out: &mut String) {
    match code.info.split_whitespace().next() {
        Some(lang) => {
            let _ = write!(out, r#"<pre><code class="language-{}">"#, escape_html(lang));
        }
        None => out.push_str("<pre><code>"),
    }
    for line in &code.lines {
        out.push_str(&escape_html(line));
        out.push('\n');
    }
    out.push_str("</code></pre>");
}

fn push_state(on: bool, out: &mut String) {
    if on {
        out.push_str(" checked");
    }
    out.push_str(" /> ");
}

/// Render a forest with the inline renderer matching `style`.
#[must_use]
pub fn render_forest(forest: &[ListNode], style: InlineStyle) -> String {
    match style {
        InlineStyle::Markdown => ListRenderer::new(MarkdownInline::default()).render(forest),
        InlineStyle::Plain => ListRenderer::new(PlainInline).render(forest),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::lists::tokenizer::{DEFAULT_TAB_WIDTH, tokenize};
    use crate::lists::tree::TreeBuilder;

    fn render(input: &str) -> String {
        render_style(input, InlineStyle::Plain)
    }

    fn render_style(input: &str, style: InlineStyle) -> String {
        TreeBuilder::build(&tokenize(input, DEFAULT_TAB_WIDTH))
            .iter()
            .map(|forest| render_forest(forest, style))
            .collect()
    }

    #[test]
    fn test_repeated_ordinals_renumber() {
        assert_eq!(
            render("1. a\n1. b\n1. c"),
            "<ol><li>a</li><li>b</li><li>c</li></ol>"
        );
    }

    #[test]
    fn test_source_ordinals_ignored() {
        assert_eq!(render("5. a\n9. b"), "<ol><li>a</li><li>b</li></ol>");
    }

    #[test]
    fn test_unordered() {
        assert_eq!(render("- a\n* b"), "<ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn test_task_items() {
        assert_eq!(
            render("- [ ] A\n- [x] B"),
            concat!(
                r#"<ul><li class="task-list-item"><input type="checkbox" disabled /> A</li>"#,
                r#"<li class="task-list-item"><input type="checkbox" disabled checked /> B</li></ul>"#
            )
        );
    }

    #[test]
    fn test_radio_items_allow_many_selected() {
        let html = render("- (x) A\n- ( ) B\n- (x) C");
        assert_eq!(html.matches(r#"type="radio" disabled checked"#).count(), 2);
        assert_eq!(html.matches(r#"class="radio-list-item""#).count(), 3);
        assert!(!html.contains("name="));
    }

    #[test]
    fn test_radio_items_with_none_selected() {
        let html = render("- ( ) A\n- ( ) B");
        assert!(!html.contains("checked"));
    }

    #[test]
    fn test_mixed_group_switches_containers() {
        assert_eq!(
            render("1. one\n1. two\n- [x] check\n1. three"),
            concat!(
                "<ol><li>one</li><li>two</li></ol>",
                r#"<ul><li class="task-list-item"><input type="checkbox" disabled checked /> check</li></ul>"#,
                r#"<ol start="3"><li>three</li></ol>"#
            )
        );
    }

    #[test]
    fn test_nested_mixed_kinds() {
        assert_eq!(
            render("- root\n  - [ ] task\n    - (x) radio"),
            concat!(
                "<ul><li>root",
                r#"<ul><li class="task-list-item"><input type="checkbox" disabled /> task"#,
                r#"<ul><li class="radio-list-item"><input type="radio" disabled checked /> radio</li></ul>"#,
                "</li></ul>",
                "</li></ul>"
            )
        );
    }

    #[test]
    fn test_nested_numbering_restarts_per_parent() {
        assert_eq!(
            render("1. a\n   1. x\n   1. y\n1. b\n   1. z"),
            concat!(
                "<ol><li>a<ol><li>x</li><li>y</li></ol></li>",
                "<li>b<ol><li>z</li></ol></li></ol>"
            )
        );
    }

    #[test]
    fn test_continuation_renders_forced_break() {
        assert_eq!(
            render("- first\\\n  second\n- next"),
            "<ul><li>first<br />second</li><li>next</li></ul>"
        );
    }

    #[test]
    fn test_malformed_task_renders_literally() {
        assert_eq!(render("- [y] odd"), "<ul><li>[y] odd</li></ul>");
    }

    #[test]
    fn test_plain_inline_escapes() {
        assert_eq!(
            render("- <b> & \"q\""),
            "<ul><li>&lt;b&gt; &amp; &quot;q&quot;</li></ul>"
        );
    }

    #[test]
    fn test_markdown_inline() {
        assert_eq!(
            render_style("- **bold** and `code`", InlineStyle::Markdown),
            "<ul><li><strong>bold</strong> and <code>code</code></li></ul>"
        );
    }

    #[test]
    fn test_markdown_inline_escapes_html_specials() {
        assert_eq!(
            render_style("- a & b", InlineStyle::Markdown),
            "<ul><li>a &amp; b</li></ul>"
        );
    }

    #[test]
    fn test_markdown_inline_keeps_block_syntax_literal() {
        let style = InlineStyle::Markdown;
        assert_eq!(
            render_style("- 3. third step", style),
            "<ul><li>3. third step</li></ul>"
        );
        assert_eq!(
            render_style("- # not heading", style),
            "<ul><li># not heading</li></ul>"
        );
        assert_eq!(render_style("- > quote", style), "<ul><li>&gt; quote</li></ul>");
        assert_eq!(
            render_style("- a\\\n  > b", style),
            "<ul><li>a<br />&gt; b</li></ul>"
        );
    }

    #[test]
    fn test_fenced_code_in_item() {
        assert_eq!(
            render("1. Install:\n\n   ```sh\n   - run <make>\n   ```\n   Then check.\n1. Done"),
            concat!(
                "<ol><li>Install:",
                r#"<pre><code class="language-sh">- run &lt;make&gt;"#,
                "\n</code></pre>Then check.</li><li>Done</li></ol>"
            )
        );
    }

    #[test]
    fn test_fenced_code_without_info() {
        assert_eq!(
            render("- a\n  ~~~\n  x\n\n  y\n  ~~~"),
            "<ul><li>a<pre><code>x\n\ny\n</code></pre></li></ul>"
        );
    }

    #[test]
    fn test_empty_forest() {
        assert_eq!(ListRenderer::new(PlainInline).render(&[]), "");
    }

    #[test]
    fn test_deterministic() {
        let input = "- a\n  1. b\n  - [x] c\n    - (x) d\n- e\\\n  f";
        assert_eq!(render(input), render(input));
        assert_eq!(
            render_style(input, InlineStyle::Markdown),
            render_style(input, InlineStyle::Markdown)
        );
    }
}
