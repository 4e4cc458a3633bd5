//! Static site generation for RW.
//!
//! Discovers Markdown pages under a source directory and renders them into
//! HTML documents under an output directory. See [`SiteBuilder`].

mod builder;
mod scanner;
mod template;

pub use builder::{BuildError, BuildReport, PageWarning, SiteBuilder, SiteConfig};
