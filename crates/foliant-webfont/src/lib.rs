//! Webfont activation gate for foliant pages.
//!
//! Pages set their body text in a custom CJK family and their code in a CJK
//! monospace family, but must not commit to a family that is not actually
//! usable. This crate verifies the families at build time: each family is
//! requested as two variants (regular `n4` and bold `n7`), a loader confirms
//! variants one activation callback at a time, and a per-family counter
//! releases the family's one-time side effect only once every requested
//! variant has confirmed:
//!
//! - the body family ready → `font-family` applied to the `.markdown-body`
//!   selector;
//! - the monospace family ready → a user-visible notification.
//!
//! The two family pipelines are fully independent. There is no timeout,
//! retry or error channel anywhere: a variant that never confirms leaves its
//! family short of ready forever, and the page simply keeps its fallback
//! fonts.
//!
//! # Example
//!
//! ```rust,ignore
//! use foliant_webfont::{self as webfont, FamilyRequest, FileFontLoader, FontStyles};
//!
//! let body = FamilyRequest::parse(webfont::BODY_FAMILY).unwrap();
//! let mono = FamilyRequest::parse(webfont::MONO_FAMILY).unwrap();
//!
//! let mut loader = FileFontLoader::new("fonts/");
//! let mut styles = FontStyles::new();
//! webfont::activate(&mut loader, &mut styles, &body, &mono);
//!
//! if let Some(css) = styles.to_css() {
//!     // splice into the page's <style> block
//! }
//! ```

mod family;
mod gate;
mod loader;
mod surface;
mod variation;

pub use family::FamilyRequest;
pub use gate::ActivationGate;
pub use loader::{Activation, FileFontLoader, FontLoader};
pub use surface::{FontStyles, PageSurface, font_face_rule};
pub use variation::{FontStyle, Variation};

use thiserror::Error;

/// The body text family request.
pub const BODY_FAMILY: &str = "CJK:n4,n7";

/// The monospace family request.
pub const MONO_FAMILY: &str = "CJK Mono:n4,n7";

/// Selector the body family is applied to once ready.
pub const MARKDOWN_BODY_SELECTOR: &str = ".markdown-body";

/// Notification text raised when the monospace family is ready.
pub const MONO_READY_NOTICE: &str = "123";

/// Glyph coverage probe: ASCII letters, digits and punctuation plus
/// Traditional/Simplified Chinese, Hangul and Kana. A variant only counts
/// as active if it maps a glyph for every one of these characters.
pub const GLYPH_TEST_STRING: &str = "123abcABC,./繁體简体한글にっぽんご";

/// Errors in font request configuration.
#[derive(Debug, Error)]
pub enum FontConfigError {
    #[error("invalid font variation description: {0:?}")]
    InvalidVariation(String),
    #[error("invalid font family request: {0:?}")]
    InvalidFamily(String),
}

/// Run both family pipelines against `loader`, landing side effects on
/// `surface`.
///
/// Each family gets its own load request and its own activation counter;
/// neither family can affect the other. The body family applies itself to
/// [`MARKDOWN_BODY_SELECTOR`] when ready, the monospace family raises
/// [`MONO_READY_NOTICE`]. Both effects fire at most once, however many
/// callbacks the loader delivers.
pub fn activate<L: FontLoader, S: PageSurface>(
    loader: &mut L,
    surface: &mut S,
    body: &FamilyRequest,
    mono: &FamilyRequest,
) {
    let mut body_gate = ActivationGate::new(body.activation_threshold());
    loader.load(body, GLYPH_TEST_STRING, &mut |_| {
        if body_gate.record() {
            surface.apply_font_family(MARKDOWN_BODY_SELECTOR, &body.family);
        }
    });

    let mut mono_gate = ActivationGate::new(mono.activation_threshold());
    loader.load(mono, GLYPH_TEST_STRING, &mut |_| {
        if mono_gate.record() {
            surface.notify(MONO_READY_NOTICE);
        }
    });
}
