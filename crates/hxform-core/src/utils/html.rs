//! HTML escaping.

/// Escapes a string for safe inclusion in HTML text or attribute values.
///
/// Converts `&`, `<`, `>`, `"`, and `'` to their HTML entity equivalents.
///
/// # Examples
///
/// ```
/// use hxform_core::utils::html::escape_html;
///
/// assert_eq!(escape_html("<b>Tom & Jerry</b>"), "&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;");
/// assert_eq!(escape_html("it's"), "it&#x27;s");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
