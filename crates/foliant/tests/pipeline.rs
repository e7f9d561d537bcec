//! End-to-end pipeline tests over a scripted engine.

use std::fs;

use foliant::{ConvertOptions, convert_file};
use foliant_highlight::{HighlightEngine, HighlightError, html_escape};

/// Engine that marks everything it highlights so output is easy to assert.
struct MarkerEngine {
    languages: Vec<&'static str>,
}

impl HighlightEngine for MarkerEngine {
    fn highlight(&mut self, language: &str, source: &str) -> Result<String, HighlightError> {
        if !self.languages.contains(&language) {
            return Err(HighlightError::UnsupportedLanguage(language.to_string()));
        }
        Ok(format!(
            "<span class=\"hl-keyword\">{}</span>",
            html_escape(source)
        ))
    }

    fn supports(&self, language: &str) -> bool {
        self.languages.contains(&language)
    }
}

#[test]
fn markdown_with_code_becomes_a_highlighted_page() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("guide.md");
    fs::write(
        &input,
        "# Guide & Notes\n\nSome *text*.\n\n```python\nif a < b:\n    pass\n```\n",
    )
    .unwrap();

    let mut engine = MarkerEngine {
        languages: vec!["python"],
    };
    let report = convert_file(&input, &ConvertOptions::default(), &mut engine).unwrap();

    assert_eq!(report.summary.blocks_highlighted, 1);
    assert_eq!(report.summary.blocks_skipped, 0);

    let html = fs::read_to_string(dir.path().join("guide.html")).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>guide</title>"));
    // The class marker is stripped, the content highlighted and re-escaped.
    assert!(!html.contains("language-python"), "html: {html}");
    assert!(html.contains("hl-keyword"));
    assert!(html.contains("a &lt; b"));
    // Code on the page pulls in the palette.
    assert!(html.contains(".hl-keyword"));
}

#[test]
fn pages_without_code_skip_the_palette_and_the_engine() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("plain.md");
    fs::write(&input, "Just a paragraph.\n").unwrap();

    let mut engine = MarkerEngine { languages: vec![] };
    let report = convert_file(&input, &ConvertOptions::default(), &mut engine).unwrap();

    assert_eq!(report.summary.blocks_highlighted, 0);
    assert_eq!(report.summary.blocks_skipped, 0);

    let html = fs::read_to_string(dir.path().join("plain.html")).unwrap();
    assert!(!html.contains("hl-keyword"));
    assert!(html.contains("Just a paragraph."));
}

#[test]
fn highlighting_can_be_disabled_entirely() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("doc.md");
    fs::write(&input, "```python\nx = 1\n```\n").unwrap();

    let options = ConvertOptions {
        highlight: false,
        ..ConvertOptions::default()
    };
    let mut engine = MarkerEngine {
        languages: vec!["python"],
    };
    let report = convert_file(&input, &options, &mut engine).unwrap();
    assert_eq!(report.summary.blocks_highlighted, 0);

    let html = fs::read_to_string(dir.path().join("doc.html")).unwrap();
    // Markers are left alone when the adapter never runs.
    assert!(html.contains("language-python"));
    assert!(!html.contains("hl-keyword"));
}

#[test]
fn custom_page_css_replaces_the_default() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("styled.md");
    fs::write(&input, "hello\n").unwrap();
    let css = dir.path().join("site.css");
    fs::write(&css, ".markdown-body{color:teal}").unwrap();

    let options = ConvertOptions {
        page_css: Some(css),
        ..ConvertOptions::default()
    };
    let mut engine = MarkerEngine { languages: vec![] };
    convert_file(&input, &options, &mut engine).unwrap();

    let html = fs::read_to_string(dir.path().join("styled.html")).unwrap();
    assert!(html.contains(".markdown-body{color:teal}"));
    assert!(!html.contains("980px"));
}
