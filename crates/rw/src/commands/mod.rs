//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod render;

pub(crate) use build::BuildArgs;
pub(crate) use render::RenderArgs;

use rw_config::InlineMode;
use rw_renderer::InlineStyle;

/// Map the configured inline mode onto the renderer's style.
pub(crate) fn inline_style(mode: InlineMode) -> InlineStyle {
    match mode {
        InlineMode::Markdown => InlineStyle::Markdown,
        InlineMode::Plain => InlineStyle::Plain,
    }
}
