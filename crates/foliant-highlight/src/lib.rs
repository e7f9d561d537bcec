//! Syntax highlighting engine for foliant code blocks.
//!
//! This crate defines the seam between the page pipeline and whatever engine
//! actually renders code: the [`HighlightEngine`] trait. The pipeline only
//! ever talks to the trait, so the transform logic can be tested with a mock
//! engine and the real engine can be swapped without touching the pipeline.
//!
//! The production implementation is [`TreeSitterEngine`], built on
//! `tree-sitter-highlight` with grammars compiled in via `lang-*` feature
//! flags:
//!
//! ```toml
//! [dependencies]
//! foliant-highlight = { version = "0.1", features = ["lang-rust", "lang-python"] }
//! ```
//!
//! Or enable everything:
//!
//! ```toml
//! [dependencies]
//! foliant-highlight = { version = "0.1", features = ["all-languages"] }
//! ```
//!
//! # Output format
//!
//! Highlighted code is rendered as class-based spans (`<span class="hl-keyword">`,
//! `<span class="hl-string">`, ...) so a plain CSS palette can style it. The
//! class vocabulary is fixed; see [`CAPTURE_NAMES`] and [`CLASSES`].

mod classes;
mod escape;

#[cfg(feature = "tree-sitter")]
mod engine;

pub use classes::{CAPTURE_NAMES, CLASSES, class_for};
pub use escape::html_escape;

#[cfg(feature = "tree-sitter")]
pub use engine::TreeSitterEngine;

use std::fmt;

/// A syntax highlighting engine.
///
/// Given a language name and source text, produces HTML markup for the
/// source. Engines own whatever parser state they need; `highlight` takes
/// `&mut self` so that state can be reused across calls.
pub trait HighlightEngine {
    /// Highlight `source` as `language` and return HTML markup.
    ///
    /// The markup contains only escaped text and span elements; it is safe
    /// to splice into an existing document.
    fn highlight(&mut self, language: &str, source: &str) -> Result<String, HighlightError>;

    /// Whether the engine recognizes `language` (after alias normalization).
    fn supports(&self, language: &str) -> bool;
}

/// Errors produced by a highlighting engine.
#[derive(Debug)]
pub enum HighlightError {
    /// No grammar is available for the requested language.
    UnsupportedLanguage(String),
    /// The grammar failed while parsing the source.
    Parse { language: String, message: String },
}

impl fmt::Display for HighlightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighlightError::UnsupportedLanguage(language) => {
                write!(f, "unsupported language: {}", language)
            }
            HighlightError::Parse { language, message } => {
                write!(f, "failed to parse {} source: {}", language, message)
            }
        }
    }
}

impl std::error::Error for HighlightError {}

/// Normalize a language name to its canonical form.
///
/// Fenced code blocks carry whatever tag the author typed; this maps the
/// common aliases onto the grammar names the engine registers.
pub fn canonical_language(name: &str) -> &str {
    match name {
        "js" | "jsx" | "mjs" | "cjs" | "node" => "javascript",
        "py" | "py3" | "python3" => "python",
        "rs" => "rust",
        "sh" | "shell" | "zsh" => "bash",
        "htm" => "html",
        "h" => "c",
        "golang" => "go",
        "jsonc" => "json",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_normalize() {
        assert_eq!(canonical_language("py"), "python");
        assert_eq!(canonical_language("js"), "javascript");
        assert_eq!(canonical_language("rs"), "rust");
        assert_eq!(canonical_language("shell"), "bash");
        assert_eq!(canonical_language("h"), "c");
    }

    #[test]
    fn canonical_names_pass_through() {
        assert_eq!(canonical_language("rust"), "rust");
        assert_eq!(canonical_language("python"), "python");
    }

    #[test]
    fn unknown_names_pass_through() {
        assert_eq!(canonical_language("brainfuck"), "brainfuck");
    }
}
