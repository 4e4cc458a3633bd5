//! Page renderer.

use pulldown_cmark::{Options, Parser};

use crate::cache::RenderCache;
use crate::lists::{DEFAULT_TAB_WIDTH, InlineStyle, ListsPreprocessor, ListsProcessor};
use crate::processor::ContentProcessor;

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML fragment.
    pub html: String,
    /// Number of list blocks rendered.
    pub lists: usize,
    /// Warnings generated during conversion.
    pub warnings: Vec<String>,
}

/// Markdown renderer with the extended list dialect.
///
/// List blocks are handled by the list engine; everything else is rendered
/// by pulldown-cmark. Registered [`ContentProcessor`]s run after the lists
/// have been rendered, in registration order.
///
/// # Example
///
/// ```
/// use rw_renderer::MarkdownRenderer;
///
/// let result = MarkdownRenderer::new().render_markdown("# Plan\n\n- [x] Draft\n- [ ] Review\n");
///
/// assert!(result.html.contains("<h1>Plan</h1>"));
/// assert!(result.html.contains(r#"<input type="checkbox" disabled checked /> Draft"#));
/// ```
pub struct MarkdownRenderer<'p> {
    tab_width: usize,
    inline: InlineStyle,
    gfm: bool,
    processors: Vec<Box<dyn ContentProcessor + 'p>>,
}

impl<'p> MarkdownRenderer<'p> {
    /// Create a renderer with GFM enabled and inline Markdown in list items.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            inline: InlineStyle::Markdown,
            gfm: true,
            processors: Vec::new(),
        }
    }

    /// Set the tab stop width used to measure list indentation.
    #[must_use]
    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width.max(1);
        self
    }

    /// Choose how list item text is rendered.
    #[must_use]
    pub fn with_inline_style(mut self, inline: InlineStyle) -> Self {
        self.inline = inline;
        self
    }

    /// Enable or disable GitHub Flavored Markdown for non-list content.
    ///
    /// GFM is enabled by default (tables, strikethrough, alerts).
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Register a post-processor.
    #[must_use]
    pub fn with_processor<P: ContentProcessor + 'p>(mut self, processor: P) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Parser options for non-list content.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Render markdown without memoization.
    pub fn render_markdown(&mut self, markdown: &str) -> RenderResult {
        self.render(markdown, None)
    }

    /// Render markdown, reusing list blocks stored in `cache`.
    pub fn render_markdown_cached(&mut self, markdown: &str, cache: &RenderCache) -> RenderResult {
        self.render(markdown, Some(cache))
    }

    fn render(&mut self, markdown: &str, cache: Option<&RenderCache>) -> RenderResult {
        let mut preprocessor = ListsPreprocessor::new(self.tab_width);
        let processed = preprocessor.process(markdown);
        let mut warnings = preprocessor.warnings().to_vec();
        let blocks = preprocessor.into_blocks();
        let lists = blocks.len();

        let mut html = String::with_capacity(markdown.len() * 3 / 2);
        let parser = Parser::new_ext(&processed, self.parser_options());
        pulldown_cmark::html::push_html(&mut html, parser);

        let mut lists_processor = ListsProcessor::new(blocks, self.tab_width, self.inline);
        if let Some(cache) = cache {
            lists_processor = lists_processor.with_cache(cache);
        }
        lists_processor.post_process(&mut html);
        warnings.extend_from_slice(lists_processor.warnings());

        for processor in &mut self.processors {
            processor.post_process(&mut html);
            warnings.extend_from_slice(processor.warnings());
        }

        tracing::debug!(lists, warnings = warnings.len(), "Markdown rendered");
        RenderResult {
            html,
            lists,
            warnings,
        }
    }
}

impl Default for MarkdownRenderer<'_> {
    fn default() -> Self {
        Self::new()
    }
}
