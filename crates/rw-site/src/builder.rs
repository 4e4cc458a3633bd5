//! Static site builder.
//!
//! Renders every page of a source tree into a mirrored tree of HTML files.
//! Pages are rendered in parallel and share one [`RenderCache`], so a list
//! block repeated across pages (or across builds) is rendered once.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use rw_renderer::{InlineStyle, MarkdownRenderer, RenderCache};

use crate::scanner::scan_pages;
use crate::template::render_page;

/// Milliseconds elapsed since `start`.
fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Error returned by the site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The configured source directory does not exist.
    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    /// Reading or writing a file failed.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BuildError {
    fn io(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Settings for a site build.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Directory scanned for Markdown pages.
    pub source_dir: PathBuf,
    /// Directory receiving the rendered HTML.
    pub output_dir: PathBuf,
    /// Tab stop width for list indentation.
    pub tab_width: usize,
    /// Inline rendering of list item text.
    pub inline: InlineStyle,
}

/// A warning raised while rendering one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWarning {
    /// Page path relative to the source directory.
    pub page: PathBuf,
    /// Warning message.
    pub message: String,
}

/// Summary of a finished build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Number of HTML files written.
    pub pages: usize,
    /// List blocks served from the render cache during this build.
    pub cache_hits: usize,
    /// Warnings from all pages, in page order.
    pub warnings: Vec<PageWarning>,
}

/// Builds a static HTML site from a directory of Markdown pages.
///
/// # Example
///
/// ```no_run
/// use rw_renderer::InlineStyle;
/// use rw_site::{SiteBuilder, SiteConfig};
///
/// let builder = SiteBuilder::new(SiteConfig {
///     source_dir: "docs".into(),
///     output_dir: "site".into(),
///     tab_width: 4,
///     inline: InlineStyle::Markdown,
/// });
/// let report = builder.build()?;
/// println!("{} pages", report.pages);
/// # Ok::<(), rw_site::BuildError>(())
/// ```
pub struct SiteBuilder {
    config: SiteConfig,
    cache: RenderCache,
}

impl SiteBuilder {
    /// Create a builder with an empty render cache.
    #[must_use]
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config,
            cache: RenderCache::new(),
        }
    }

    /// Build configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// The render cache shared by all pages of this builder.
    #[must_use]
    pub fn cache(&self) -> &RenderCache {
        &self.cache
    }

    /// Clear the render cache, then build every page.
    pub fn rebuild(&self) -> Result<BuildReport, BuildError> {
        self.cache.clear();
        self.build()
    }

    /// Render every page, reusing list blocks already in the cache.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let source_dir = &self.config.source_dir;
        if !source_dir.is_dir() {
            return Err(BuildError::SourceNotFound(source_dir.clone()));
        }

        let start = Instant::now();
        let pages = scan_pages(source_dir).map_err(BuildError::io(source_dir))?;
        let hits_before = self.cache.hits();

        let warnings = pages
            .par_iter()
            .map(|page| self.build_page(page))
            .collect::<Result<Vec<_>, _>>()?;

        let report = BuildReport {
            pages: pages.len(),
            cache_hits: self.cache.hits().saturating_sub(hits_before),
            warnings: warnings.into_iter().flatten().collect(),
        };

        tracing::info!(
            pages = report.pages,
            cache_hits = report.cache_hits,
            warnings = report.warnings.len(),
            elapsed_ms = elapsed_ms(start),
            "Site built"
        );
        Ok(report)
    }

    fn build_page(&self, page: &Path) -> Result<Vec<PageWarning>, BuildError> {
        let source_path = self.config.source_dir.join(page);
        let markdown = fs::read_to_string(&source_path).map_err(BuildError::io(&source_path))?;

        let result = MarkdownRenderer::new()
            .with_tab_width(self.config.tab_width)
            .with_inline_style(self.config.inline)
            .render_markdown_cached(&markdown, &self.cache);

        let title = page
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let html = render_page(&title, &result.html);

        let output_path = self.config.output_dir.join(page).with_extension("html");
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(BuildError::io(parent))?;
        }
        fs::write(&output_path, html).map_err(BuildError::io(&output_path))?;

        tracing::debug!(page = %page.display(), lists = result.lists, "Page written");
        for message in &result.warnings {
            tracing::warn!(page = %page.display(), "{message}");
        }

        Ok(result
            .warnings
            .into_iter()
            .map(|message| PageWarning {
                page: page.to_path_buf(),
                message,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn builder(root: &Path) -> SiteBuilder {
        SiteBuilder::new(SiteConfig {
            source_dir: root.join("docs"),
            output_dir: root.join("site"),
            tab_width: 4,
            inline: InlineStyle::Markdown,
        })
    }

    fn write_page(root: &Path, relative: &str, content: &str) {
        let path = root.join("docs").join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_build_writes_mirrored_tree() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write_page(root, "index.md", "# Home\n\n- [x] done\n");
        write_page(root, "guide/setup.md", "1. one\n1. two\n");

        let report = builder(root).build().unwrap();

        assert_eq!(report.pages, 2);
        assert!(report.warnings.is_empty());

        let index = fs::read_to_string(root.join("site/index.html")).unwrap();
        assert!(index.contains("<title>index</title>"));
        assert!(index.contains(r#"<input type="checkbox" disabled checked /> done"#));

        let setup = fs::read_to_string(root.join("site/guide/setup.html")).unwrap();
        assert!(setup.contains("<title>setup</title>"));
        assert!(setup.contains("<ol><li>one</li><li>two</li></ol>"));
    }

    #[test]
    fn test_build_skips_hidden_pages() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write_page(root, "visible.md", "text\n");
        write_page(root, ".hidden.md", "text\n");

        let report = builder(root).build().unwrap();

        assert_eq!(report.pages, 1);
        assert!(!root.join("site/.hidden.html").exists());
    }

    #[test]
    fn test_build_missing_source_dir() {
        let temp_dir = tempfile::tempdir().unwrap();

        let err = builder(temp_dir.path()).build().unwrap_err();

        assert!(matches!(err, BuildError::SourceNotFound(_)));
        assert!(err.to_string().contains("Source directory not found"));
    }

    #[test]
    fn test_second_build_hits_cache() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write_page(root, "a.md", "- alpha\n");
        write_page(root, "b.md", "- ( ) beta\n- (x) gamma\n");
        let builder = builder(root);

        let first = builder.build().unwrap();
        let second = builder.build().unwrap();

        assert_eq!(first.cache_hits, 0);
        assert_eq!(second.cache_hits, 2);
        assert_eq!(builder.cache().len(), 2);
    }

    #[test]
    fn test_rebuild_clears_cache() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write_page(root, "a.md", "- alpha\n");
        let builder = builder(root);

        builder.build().unwrap();
        let report = builder.rebuild().unwrap();

        assert_eq!(report.cache_hits, 0);
        assert_eq!(builder.cache().misses(), 1);
    }

    #[test]
    fn test_build_collects_page_warnings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write_page(root, "broken.md", "```\n- a\n");

        let report = builder(root).build().unwrap();

        assert_eq!(
            report.warnings,
            vec![PageWarning {
                page: PathBuf::from("broken.md"),
                message: "line 1: unclosed code fence".to_owned(),
            }]
        );
    }

    #[test]
    fn test_build_respects_plain_inline() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write_page(root, "page.md", "- **raw**\n");
        let mut config = builder(root).config().clone();
        config.inline = InlineStyle::Plain;

        SiteBuilder::new(config).build().unwrap();

        let html = fs::read_to_string(root.join("site/page.html")).unwrap();
        assert!(html.contains("<li>**raw**</li>"));
    }
}
