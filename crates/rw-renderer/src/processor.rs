//! Post-processing plugin seam.
//!
//! Plugins that rewrite rendered HTML (list placeholders, diagram tags,
//! includes) implement [`ContentProcessor`] and are registered with
//! [`MarkdownRenderer::with_processor`](crate::MarkdownRenderer::with_processor).

/// A plugin that rewrites the HTML of a rendered page.
pub trait ContentProcessor {
    /// Rewrite the rendered HTML in place.
    fn post_process(&mut self, html: &mut String);

    /// Warnings collected while processing.
    fn warnings(&self) -> &[String] {
        &[]
    }
}
