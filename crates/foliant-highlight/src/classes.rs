//! Capture name to CSS class mapping.
//!
//! Highlight queries use a broad vocabulary of capture names
//! (`@function.builtin`, `@punctuation.delimiter`, ...). We recognize a fixed
//! subset; `tree-sitter-highlight` prefix-matches anything more specific onto
//! the nearest recognized name (`keyword.conditional` ends up in the
//! `keyword` bucket). Each recognized name has a stable CSS class so the
//! embedded palette can style it.

/// Capture names recognized for syntax highlighting, in a fixed order.
///
/// The index of a name in this slice is the highlight index reported by the
/// engine, and indexes [`CLASSES`].
pub const CAPTURE_NAMES: &[&str] = &[
    "attribute",
    "comment",
    "constant",
    "constant.builtin",
    "constructor",
    "embedded",
    "function",
    "function.builtin",
    "keyword",
    "label",
    "number",
    "operator",
    "property",
    "punctuation",
    "punctuation.bracket",
    "punctuation.delimiter",
    "punctuation.special",
    "string",
    "string.escape",
    "string.special",
    "tag",
    "type",
    "type.builtin",
    "variable",
    "variable.builtin",
    "variable.parameter",
];

/// CSS classes, parallel to [`CAPTURE_NAMES`]: the capture name with dots
/// flattened to dashes, behind an `hl-` prefix.
pub const CLASSES: &[&str] = &[
    "hl-attribute",
    "hl-comment",
    "hl-constant",
    "hl-constant-builtin",
    "hl-constructor",
    "hl-embedded",
    "hl-function",
    "hl-function-builtin",
    "hl-keyword",
    "hl-label",
    "hl-number",
    "hl-operator",
    "hl-property",
    "hl-punctuation",
    "hl-punctuation-bracket",
    "hl-punctuation-delimiter",
    "hl-punctuation-special",
    "hl-string",
    "hl-string-escape",
    "hl-string-special",
    "hl-tag",
    "hl-type",
    "hl-type-builtin",
    "hl-variable",
    "hl-variable-builtin",
    "hl-variable-parameter",
];

/// Look up the CSS class for a highlight index.
pub fn class_for(index: usize) -> Option<&'static str> {
    CLASSES.get(index).copied()
}
