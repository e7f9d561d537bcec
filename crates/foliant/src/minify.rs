//! Final document minification.

use html_minifier::HTMLMinifier;

/// Minify an assembled page.
///
/// Whitespace inside `pre`, `code` and `textarea` elements survives, so
/// highlighted blocks come through intact.
pub fn minify_page(html: &str) -> Result<Vec<u8>, html_minifier::HTMLMinifierError> {
    let mut minifier = HTMLMinifier::new();
    minifier.digest(html)?;
    Ok(minifier.get_html().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_between_tags() {
        let out = minify_page("<html>  <head>\n  </head>  </html>").unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.len() < "<html>  <head>\n  </head>  </html>".len());
        assert!(out.contains("<head>"));
    }

    #[test]
    fn preserves_pre_content() {
        let html = "<html><body><pre>line one\n    indented</pre></body></html>";
        let out = minify_page(html).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("line one\n    indented"));
    }
}
