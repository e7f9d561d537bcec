//! Page assembly.
//!
//! Produces a single self-contained document: all styles are inlined into
//! the head and the rendered Markdown sits in an
//! `<article class="markdown-body">` shell.

use html_escape::{encode_style, encode_text};

/// Default stylesheet for the markdown body.
pub const MARKDOWN_CSS: &str = include_str!("resources/markdown.css");

/// Default palette for highlighted code spans.
pub const HIGHLIGHT_CSS: &str = include_str!("resources/highlight.css");

/// Everything the page shell needs besides the rendered Markdown.
#[derive(Debug, Default)]
pub struct PageOptions<'a> {
    /// Document title, escaped on the way in.
    pub title: &'a str,
    /// Replacement for the default markdown stylesheet.
    pub page_css: Option<&'a str>,
    /// Replacement for the default highlight palette.
    pub highlight_css: Option<&'a str>,
    /// Font rules produced by the webfont gate, if any family verified.
    pub font_css: Option<&'a str>,
    /// Whether code blocks will be highlighted at all. When false the
    /// palette is never embedded.
    pub highlight: bool,
}

/// Whether the rendered Markdown contains fenced code blocks.
pub fn has_code_blocks(markdown_html: &str) -> bool {
    markdown_html.contains("</code></pre>")
}

/// Assemble the full document around a rendered Markdown fragment.
///
/// User-supplied stylesheets are style-escaped; the embedded defaults are
/// trusted as-is. The highlight palette is only included when the fragment
/// actually contains code blocks.
pub fn build_page(markdown_html: &str, options: &PageOptions) -> String {
    let mut page = String::with_capacity(markdown_html.len() + MARKDOWN_CSS.len() + 1024);

    page.push_str("<!DOCTYPE html>");
    page.push_str("<html>");
    page.push_str("<head>");
    page.push_str("<meta charset=\"UTF-8\">");
    page.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1, shrink-to-fit=no\">",
    );
    page.push_str(concat!(
        "<meta name=\"generator\" content=\"foliant ",
        env!("CARGO_PKG_VERSION"),
        "\">"
    ));

    page.push_str("<title>");
    page.push_str(&encode_text(options.title));
    page.push_str("</title>");

    page.push_str("<style>");
    match options.page_css {
        Some(css) => page.push_str(&encode_style(css)),
        None => page.push_str(MARKDOWN_CSS),
    }
    page.push_str("</style>");

    if let Some(font_css) = options.font_css {
        page.push_str("<style>");
        page.push_str(font_css);
        page.push_str("</style>");
    }

    if options.highlight && has_code_blocks(markdown_html) {
        page.push_str("<style>");
        match options.highlight_css {
            Some(css) => page.push_str(&encode_style(css)),
            None => page.push_str(HIGHLIGHT_CSS),
        }
        page.push_str("</style>");
    }

    page.push_str("</head>");
    page.push_str("<body>");
    page.push_str("<article class=\"markdown-body\">");
    page.push_str(markdown_html);
    page.push_str("</article>");
    page.push_str("</body>");
    page.push_str("</html>");

    page
}
