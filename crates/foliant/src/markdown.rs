//! Markdown rendering.

use comrak::{Options, markdown_to_html};

/// Render Markdown to an HTML fragment with the GitHub-flavored extension
/// set.
///
/// Raw HTML and dangerous URLs are omitted unless `allow_raw_html` is set;
/// comrak replaces them with placeholder comments.
pub fn render(markdown: &str, allow_raw_html: bool) -> String {
    let mut options = Options::default();

    options.extension.autolink = true;
    options.extension.description_lists = true;
    options.extension.footnotes = true;
    options.extension.strikethrough = true;
    options.extension.superscript = true;
    options.extension.table = true;
    options.extension.tagfilter = true;
    options.extension.tasklist = true;
    options.render.hardbreaks = true;

    if allow_raw_html {
        options.render.unsafe_ = true;
    }

    markdown_to_html(markdown, &options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_code_keeps_its_language_class() {
        let html = render("```python\nprint(1)\n```\n", false);
        assert!(html.contains("language-python"), "html: {html}");
    }

    #[test]
    fn tables_are_enabled() {
        let html = render("| a | b |\n|---|---|\n| 1 | 2 |\n", false);
        assert!(html.contains("<table>"));
    }

    #[test]
    fn raw_html_is_omitted_by_default() {
        let html = render("before <script>alert(1)</script> after", false);
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn raw_html_passes_with_opt_in() {
        let html = render("<div>x</div>", true);
        assert!(html.contains("<div>x</div>"));
    }

    #[test]
    fn hard_breaks_are_enabled() {
        let html = render("line one\nline two\n", false);
        assert!(html.contains("<br"));
    }
}
