//! Colored terminal output on stderr.

use std::path::Path;

use console::{Style, Term};

/// Terminal output formatter.
///
/// Everything goes to stderr so `rw render` can keep stdout for HTML.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    dim: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            dim: Style::new().dim(),
        }
    }

    /// Print a labelled path, e.g. `Source directory: docs`.
    pub(crate) fn path(&self, label: &str, path: &Path) {
        let _ = self.term.write_line(&format!(
            "{} {}",
            self.dim.apply_to(format!("{label}:")),
            path.display()
        ));
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning about one page (yellow).
    pub(crate) fn page_warning(&self, page: &Path, msg: &str) {
        let _ = self.term.write_line(
            &self
                .yellow
                .apply_to(format!("warning: {}: {msg}", page.display()))
                .to_string(),
        );
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }
}
