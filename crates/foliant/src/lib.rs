//! Convert Markdown files to self-contained HTML pages.
//!
//! A page goes through this pipeline:
//!
//! 1. **Markdown rendering** ([`markdown`]): comrak with the GitHub-flavored
//!    extension set.
//! 2. **Webfont verification** ([`foliant_webfont`]): the CJK body and
//!    monospace families are confirmed variant by variant; only families
//!    whose variants all activate are committed to the page's CSS.
//! 3. **Page assembly** ([`page`]): embedded stylesheets, escaped title, and
//!    the `<article class="markdown-body">` content shell.
//! 4. **Code block rewrite** ([`rewrite`]): `language-*` code elements have
//!    their class markers stripped and their content replaced with
//!    engine-highlighted markup, streaming through `lol_html`.
//! 5. **Minification** ([`minify`]): the final document is minified before
//!    it is written out.
//!
//! [`convert_file`] runs the pipeline for one file; [`Processor`] runs it
//! over a directory tree in parallel.

pub mod convert;
pub mod markdown;
pub mod minify;
pub mod page;
pub mod processor;
pub mod rewrite;

pub use convert::{ConvertError, ConvertOptions, ConvertReport, convert_file};
pub use processor::{ProcessOptions, Processor, ProcessorStats};
pub use rewrite::{RewriteError, RewriteSummary, rewrite_code_blocks, strip_language_markers};
