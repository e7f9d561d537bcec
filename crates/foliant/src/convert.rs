//! Single-file conversion.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use foliant_highlight::HighlightEngine;
use foliant_webfont::{
    self as webfont, FamilyRequest, FileFontLoader, FontConfigError, FontStyles,
};

use crate::markdown;
use crate::minify::minify_page;
use crate::page::{self, PageOptions};
use crate::rewrite::{RewriteError, RewriteSummary, rewrite_code_blocks};

/// Options for converting one Markdown file.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Document title; defaults to the input file stem.
    pub title: Option<String>,
    /// Output path; defaults to the input path with an `.html` extension.
    pub output: Option<PathBuf>,
    /// Overwrite an existing output file.
    pub force: bool,
    /// Allow raw HTML and dangerous URLs through the Markdown renderer.
    pub allow_raw_html: bool,
    /// Highlight fenced code blocks.
    pub highlight: bool,
    /// Verify and embed the CJK font families.
    pub fonts: bool,
    /// Directory holding the font files, one per family variant.
    pub font_dir: Option<PathBuf>,
    /// Replacement for the default markdown stylesheet.
    pub page_css: Option<PathBuf>,
    /// Replacement for the default highlight palette.
    pub highlight_css: Option<PathBuf>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            title: None,
            output: None,
            force: false,
            allow_raw_html: false,
            highlight: true,
            fonts: true,
            font_dir: None,
            page_css: None,
            highlight_css: None,
        }
    }
}

/// What one conversion produced.
#[derive(Debug)]
pub struct ConvertReport {
    /// Where the page was written.
    pub output: PathBuf,
    /// Code block rewrite outcome.
    pub summary: RewriteSummary,
    /// Notifications raised by the webfont gate.
    pub notices: Vec<String>,
    /// Markdown bytes read.
    pub bytes_input: u64,
    /// HTML bytes written.
    pub bytes_output: u64,
}

/// Whether a path looks like a Markdown file.
pub(crate) fn is_markdown_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
}

/// Convert one Markdown file to a self-contained HTML page.
pub fn convert_file<E: HighlightEngine>(
    path: &Path,
    options: &ConvertOptions,
    engine: &mut E,
) -> Result<ConvertReport, ConvertError> {
    if !is_markdown_path(path) {
        return Err(ConvertError::NotMarkdown(path.to_path_buf()));
    }

    let file_stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let output = match &options.output {
        Some(output) => output.clone(),
        None => path.with_extension("html"),
    };
    if let Ok(metadata) = output.metadata()
        && (metadata.is_dir() || !options.force)
    {
        return Err(ConvertError::OutputExists(output));
    }

    let title = options.title.clone().unwrap_or(file_stem);
    let source = fs::read_to_string(path)?;
    let markdown_html = markdown::render(&source, options.allow_raw_html);

    let mut font_css = None;
    let mut notices = Vec::new();
    if options.fonts && let Some(dir) = &options.font_dir {
        let body = FamilyRequest::parse(webfont::BODY_FAMILY)?;
        let mono = FamilyRequest::parse(webfont::MONO_FAMILY)?;

        let mut loader = FileFontLoader::new(dir);
        let mut styles = FontStyles::new();
        webfont::activate(&mut loader, &mut styles, &body, &mono);

        // Embed the faces of every family the page now depends on.
        let applied: Vec<String> = styles
            .applied_families()
            .iter()
            .map(|(_, family)| family.clone())
            .collect();
        for family in applied {
            if family == body.family {
                for &variation in &body.variants {
                    if let Some(file) = loader.variant_path(&family, variation) {
                        let data = fs::read(&file)?;
                        styles.push_font_face(&family, variation, &data);
                    }
                }
            }
        }

        notices = styles.notices().to_vec();
        font_css = styles.to_css();
    }

    let page_css = match &options.page_css {
        Some(path) => Some(fs::read_to_string(path)?),
        None => None,
    };
    let highlight_css = match &options.highlight_css {
        Some(path) => Some(fs::read_to_string(path)?),
        None => None,
    };

    let page = page::build_page(
        &markdown_html,
        &PageOptions {
            title: &title,
            page_css: page_css.as_deref(),
            highlight_css: highlight_css.as_deref(),
            font_css: font_css.as_deref(),
            highlight: options.highlight,
        },
    );

    let (page, summary) = if options.highlight {
        rewrite_code_blocks(&page, engine)?
    } else {
        (page, RewriteSummary::default())
    };

    let minified = minify_page(&page)?;
    fs::write(&output, &minified)?;

    Ok(ConvertReport {
        output,
        summary,
        notices,
        bytes_input: source.len() as u64,
        bytes_output: minified.len() as u64,
    })
}

/// Errors that can occur while converting a file.
#[derive(Debug)]
pub enum ConvertError {
    /// IO error.
    Io(std::io::Error),
    /// Input does not have a Markdown extension.
    NotMarkdown(PathBuf),
    /// Output already exists and overwriting was not requested.
    OutputExists(PathBuf),
    /// Invalid font request configuration.
    FontConfig(FontConfigError),
    /// Code block rewriting failed.
    Rewrite(RewriteError),
    /// Minification failed.
    Minify(html_minifier::HTMLMinifierError),
}

impl From<std::io::Error> for ConvertError {
    fn from(e: std::io::Error) -> Self {
        ConvertError::Io(e)
    }
}

impl From<FontConfigError> for ConvertError {
    fn from(e: FontConfigError) -> Self {
        ConvertError::FontConfig(e)
    }
}

impl From<RewriteError> for ConvertError {
    fn from(e: RewriteError) -> Self {
        ConvertError::Rewrite(e)
    }
}

impl From<html_minifier::HTMLMinifierError> for ConvertError {
    fn from(e: html_minifier::HTMLMinifierError) -> Self {
        ConvertError::Minify(e)
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Io(e) => write!(f, "IO error: {}", e),
            ConvertError::NotMarkdown(path) => {
                write!(f, "`{}` is not a Markdown file", path.display())
            }
            ConvertError::OutputExists(path) => {
                write!(f, "`{}` already exists", path.display())
            }
            ConvertError::FontConfig(e) => write!(f, "font configuration error: {}", e),
            ConvertError::Rewrite(e) => write!(f, "rewrite error: {}", e),
            ConvertError::Minify(e) => write!(f, "minify error: {}", e),
        }
    }
}

impl std::error::Error for ConvertError {}
