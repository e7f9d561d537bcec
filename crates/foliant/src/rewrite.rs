//! Code block rewriting.
//!
//! Streams a document through `lol_html` looking for `<code>` elements whose
//! class attribute begins with `language-`. Each match has every
//! `language-` marker removed from its class string and its text content
//! handed to the highlighting engine; the engine's markup replaces the
//! original content. Documents without any marker are passed through
//! untouched, without parsing.

use std::cell::RefCell;
use std::fmt;

use lol_html::html_content::ContentType;
use lol_html::{RewriteStrSettings, element, rewrite_str, text};

use foliant_highlight::HighlightEngine;

/// Class-attribute marker identifying highlightable code elements.
const LANGUAGE_MARKER: &str = "language-";

/// Selector for code elements tagged with a language.
const CODE_SELECTOR: &str = r#"code[class^="language-"]"#;

/// Outcome of rewriting one document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RewriteSummary {
    /// Code blocks whose content was replaced with highlighted markup.
    pub blocks_highlighted: usize,
    /// Code blocks left as-is (unrecognized language or engine failure).
    pub blocks_skipped: usize,
    /// Languages no grammar was available for, deduplicated.
    pub unsupported_languages: Vec<String>,
}

impl RewriteSummary {
    fn note_unsupported(&mut self, language: String) {
        if !self.unsupported_languages.contains(&language) {
            self.unsupported_languages.push(language);
        }
    }

    /// Fold another summary into this one.
    pub fn merge(&mut self, other: RewriteSummary) {
        self.blocks_highlighted += other.blocks_highlighted;
        self.blocks_skipped += other.blocks_skipped;
        for language in other.unsupported_languages {
            self.note_unsupported(language);
        }
    }
}

/// Remove every occurrence of the `language-` marker from a class string.
///
/// All other characters keep their relative order, so
/// `language-foo language-bar` becomes `foo bar`.
pub fn strip_language_markers(class: &str) -> String {
    class.replace(LANGUAGE_MARKER, "")
}

/// The language named by the first `language-*` token of a class string.
fn block_language(class: &str) -> Option<String> {
    class.split_whitespace().find_map(|token| {
        token
            .strip_prefix(LANGUAGE_MARKER)
            .filter(|rest| !rest.is_empty())
            .map(str::to_string)
    })
}

/// Rewrite every tagged code block in `html`, delegating content to
/// `engine`.
///
/// Class markers are stripped from every matching element, whether or not
/// its language is supported; only supported blocks have their content
/// replaced. A document without any `language-` substring is returned
/// unchanged and the engine is never called.
pub fn rewrite_code_blocks<E: HighlightEngine>(
    html: &str,
    engine: &mut E,
) -> Result<(String, RewriteSummary), RewriteError> {
    if !html.contains(LANGUAGE_MARKER) {
        return Ok((html.to_string(), RewriteSummary::default()));
    }

    // Text content of the block currently being captured, if its language
    // is supported.
    struct PendingBlock {
        language: String,
        buffer: String,
    }

    let engine = RefCell::new(engine);
    let summary = RefCell::new(RewriteSummary::default());
    let pending: RefCell<Option<PendingBlock>> = RefCell::new(None);

    let output = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!(CODE_SELECTOR, |el| {
                    let class = el.get_attribute("class").unwrap_or_default();
                    el.set_attribute("class", &strip_language_markers(&class))?;

                    let language = block_language(&class);
                    let supported = language
                        .as_deref()
                        .is_some_and(|l| engine.borrow().supports(l));

                    *pending.borrow_mut() = if supported {
                        Some(PendingBlock {
                            language: language.unwrap_or_default(),
                            buffer: String::new(),
                        })
                    } else {
                        let mut summary = summary.borrow_mut();
                        summary.blocks_skipped += 1;
                        if let Some(language) = language {
                            summary.note_unsupported(language);
                        }
                        None
                    };

                    Ok(())
                }),
                text!(CODE_SELECTOR, |chunk| {
                    let mut slot = pending.borrow_mut();
                    let Some(block) = slot.as_mut() else {
                        return Ok(());
                    };

                    block.buffer.push_str(chunk.as_str());
                    if !chunk.last_in_text_node() {
                        chunk.remove();
                        return Ok(());
                    }

                    // The buffer holds the markup-escaped source; the engine
                    // wants the source itself.
                    let source = html_escape::decode_html_entities(&block.buffer);
                    match engine.borrow_mut().highlight(&block.language, &source) {
                        Ok(markup) => {
                            chunk.replace(&markup, ContentType::Html);
                            summary.borrow_mut().blocks_highlighted += 1;
                        }
                        Err(_) => {
                            chunk.replace(
                                &foliant_highlight::html_escape(&source),
                                ContentType::Html,
                            );
                            summary.borrow_mut().blocks_skipped += 1;
                        }
                    }
                    *slot = None;

                    Ok(())
                }),
            ],
            ..RewriteStrSettings::default()
        },
    )?;

    Ok((output, summary.into_inner()))
}

/// Errors from the streaming rewriter.
#[derive(Debug)]
pub enum RewriteError {
    /// The document could not be rewritten.
    Rewriting(lol_html::errors::RewritingError),
}

impl From<lol_html::errors::RewritingError> for RewriteError {
    fn from(e: lol_html::errors::RewritingError) -> Self {
        RewriteError::Rewriting(e)
    }
}

impl fmt::Display for RewriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteError::Rewriting(e) => write!(f, "HTML rewrite error: {}", e),
        }
    }
}

impl std::error::Error for RewriteError {}
