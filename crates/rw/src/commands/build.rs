//! `rw build` command implementation.

use std::path::PathBuf;

use clap::Args;
use rw_config::{CliSettings, Config};
use rw_site::{SiteBuilder, SiteConfig};

use super::inline_style;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover rw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for rendered HTML (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Enable verbose output (show per-page logs and timing).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any page cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(config_path = ?config.config_path, "Configuration loaded");

        output.path("Source directory", &config.docs_resolved.source_dir);
        output.path("Output directory", &config.docs_resolved.output_dir);

        let builder = SiteBuilder::new(site_config(&config));
        let report = builder.rebuild()?;

        for warning in &report.warnings {
            output.page_warning(&warning.page, &warning.message);
        }
        output.success(&format!(
            "Built {} page(s), {} list block(s) served from cache",
            report.pages, report.cache_hits
        ));

        Ok(())
    }
}

fn site_config(config: &Config) -> SiteConfig {
    SiteConfig {
        source_dir: config.docs_resolved.source_dir.clone(),
        output_dir: config.docs_resolved.output_dir.clone(),
        tab_width: config.lists.tab_width,
        inline: inline_style(config.lists.inline),
    }
}
