//! `rw render` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use rw_config::Config;
use rw_renderer::{InlineStyle, MarkdownRenderer};

use super::inline_style;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render.
    file: PathBuf,

    /// Path to configuration file (default: auto-discover rw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Render list item text literally instead of as inline Markdown.
    #[arg(long)]
    plain: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or stdout cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let result = self.render()?;

        for warning in &result.warnings {
            output.page_warning(&self.file, warning);
        }

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(result.html.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    fn render(&self) -> Result<rw_renderer::RenderResult, CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        let markdown = std::fs::read_to_string(&self.file).map_err(|source| CliError::Read {
            path: self.file.clone(),
            source,
        })?;

        let inline = if self.plain {
            InlineStyle::Plain
        } else {
            inline_style(config.lists.inline)
        };

        tracing::info!(file = %self.file.display(), ?inline, "Rendering page");
        Ok(MarkdownRenderer::new()
            .with_tab_width(config.lists.tab_width)
            .with_inline_style(inline)
            .render_markdown(&markdown))
    }
}
