//! HTML document wrapper for rendered pages.

use std::fmt::Write;

use rw_renderer::escape_html;

/// Wrap a rendered fragment in a standalone HTML document.
pub(crate) fn render_page(title: &str, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + 256);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(title));
    html.push_str("</head>\n<body>\n<article>\n");
    html.push_str(body);
    if !body.is_empty() && !body.ends_with('\n') {
        html.push('\n');
    }
    html.push_str("</article>\n</body>\n</html>\n");

    html
}
