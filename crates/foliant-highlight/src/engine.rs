//! Tree-sitter backed implementation of [`HighlightEngine`].
//!
//! Grammars are compiled in via `lang-*` feature flags and registered once at
//! construction. The engine owns a single parse context which is reused for
//! every call, so constructing an engine per thread and keeping it alive for
//! a batch of documents is the cheap way to use this.

use std::collections::HashMap;

use tree_sitter_highlight::{HighlightConfiguration, HighlightEvent, Highlighter};

use crate::{
    CAPTURE_NAMES, HighlightEngine, HighlightError, canonical_language, class_for, html_escape,
};

/// Syntax highlighter over statically linked tree-sitter grammars.
pub struct TreeSitterEngine {
    highlighter: Highlighter,
    grammars: HashMap<&'static str, HighlightConfiguration>,
}

impl Default for TreeSitterEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeSitterEngine {
    /// Create an engine with every enabled grammar registered.
    pub fn new() -> Self {
        let mut grammars = HashMap::new();
        register_grammars(&mut grammars);
        Self {
            highlighter: Highlighter::new(),
            grammars,
        }
    }

    /// Names of the registered grammars, in no particular order.
    pub fn languages(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.grammars.keys().copied()
    }

    fn highlight_impl(&mut self, language: &str, source: &str) -> Result<String, HighlightError> {
        let name = canonical_language(language);
        let grammars = &self.grammars;
        let highlighter = &mut self.highlighter;

        let Some(grammar) = grammars.get(name) else {
            return Err(HighlightError::UnsupportedLanguage(language.to_string()));
        };

        let events = highlighter
            .highlight(grammar, source.as_bytes(), None, |injected| {
                grammars.get(canonical_language(injected))
            })
            .map_err(|e| HighlightError::Parse {
                language: name.to_string(),
                message: e.to_string(),
            })?;

        let mut markup = String::with_capacity(source.len() * 2);
        // Tracks, per open highlight, whether a span tag was actually emitted.
        let mut open_spans: Vec<bool> = Vec::new();

        for event in events {
            let event = event.map_err(|e| HighlightError::Parse {
                language: name.to_string(),
                message: e.to_string(),
            })?;

            match event {
                HighlightEvent::Source { start, end } => {
                    markup.push_str(&html_escape(&source[start..end]));
                }
                HighlightEvent::HighlightStart(highlight) => match class_for(highlight.0) {
                    Some(class) => {
                        markup.push_str("<span class=\"");
                        markup.push_str(class);
                        markup.push_str("\">");
                        open_spans.push(true);
                    }
                    None => open_spans.push(false),
                },
                HighlightEvent::HighlightEnd => {
                    if open_spans.pop().unwrap_or(false) {
                        markup.push_str("</span>");
                    }
                }
            }
        }

        Ok(markup)
    }
}

impl HighlightEngine for TreeSitterEngine {
    fn highlight(&mut self, language: &str, source: &str) -> Result<String, HighlightError> {
        self.highlight_impl(language, source)
    }

    fn supports(&self, language: &str) -> bool {
        self.grammars.contains_key(canonical_language(language))
    }
}

/// Build a `HighlightConfiguration` per enabled grammar.
#[allow(unused_variables)]
fn register_grammars(grammars: &mut HashMap<&'static str, HighlightConfiguration>) {
    macro_rules! grammar {
        ($feature:literal, $name:literal, $language:expr, $highlights:expr, $injections:expr, $locals:expr) => {
            #[cfg(feature = $feature)]
            {
                if let Ok(mut config) =
                    HighlightConfiguration::new($language, $name, $highlights, $injections, $locals)
                {
                    config.configure(CAPTURE_NAMES);
                    grammars.insert($name, config);
                }
            }
        };
    }

    grammar!(
        "lang-bash",
        "bash",
        tree_sitter_bash::LANGUAGE.into(),
        tree_sitter_bash::HIGHLIGHT_QUERY,
        "",
        ""
    );
    grammar!(
        "lang-c",
        "c",
        tree_sitter_c::LANGUAGE.into(),
        tree_sitter_c::HIGHLIGHT_QUERY,
        "",
        ""
    );
    grammar!(
        "lang-css",
        "css",
        tree_sitter_css::LANGUAGE.into(),
        tree_sitter_css::HIGHLIGHTS_QUERY,
        "",
        ""
    );
    grammar!(
        "lang-go",
        "go",
        tree_sitter_go::LANGUAGE.into(),
        tree_sitter_go::HIGHLIGHTS_QUERY,
        "",
        ""
    );
    grammar!(
        "lang-html",
        "html",
        tree_sitter_html::LANGUAGE.into(),
        tree_sitter_html::HIGHLIGHTS_QUERY,
        tree_sitter_html::INJECTIONS_QUERY,
        ""
    );
    grammar!(
        "lang-javascript",
        "javascript",
        tree_sitter_javascript::LANGUAGE.into(),
        tree_sitter_javascript::HIGHLIGHT_QUERY,
        tree_sitter_javascript::INJECTIONS_QUERY,
        tree_sitter_javascript::LOCALS_QUERY
    );
    grammar!(
        "lang-json",
        "json",
        tree_sitter_json::LANGUAGE.into(),
        tree_sitter_json::HIGHLIGHTS_QUERY,
        "",
        ""
    );
    grammar!(
        "lang-python",
        "python",
        tree_sitter_python::LANGUAGE.into(),
        tree_sitter_python::HIGHLIGHTS_QUERY,
        "",
        ""
    );
    grammar!(
        "lang-rust",
        "rust",
        tree_sitter_rust::LANGUAGE.into(),
        tree_sitter_rust::HIGHLIGHTS_QUERY,
        tree_sitter_rust::INJECTIONS_QUERY,
        ""
    );
}
