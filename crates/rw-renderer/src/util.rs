//! Shared helpers for HTML output.

/// Escape text for use in HTML content and attribute values.
///
/// # Examples
///
/// ```
/// use rw_renderer::escape_html;
///
/// assert_eq!(escape_html("a < b && c"), "a &lt; b &amp;&amp; c");
/// ```
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Parse the numeric `data-id` attribute of an opening tag.
pub(crate) fn parse_data_id(tag: &str) -> Option<usize> {
    let value_start = tag.find("data-id=\"")? + "data-id=\"".len();
    let value_end = tag[value_start..].find('"')? + value_start;
    tag[value_start..value_end].parse().ok()
}
