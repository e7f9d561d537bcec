//! Font loading collaborators.
//!
//! The gate itself never touches font data; it only consumes activation
//! callbacks. [`FontLoader`] is the seam to whatever confirms that a variant
//! is usable. The production implementation reads font files from a
//! directory and validates them with `ttf-parser`; tests drive the gate with
//! scripted loaders.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{FamilyRequest, FontStyle, Variation};

/// Notification that one requested variant of a family is confirmed active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub family: String,
    pub variation: Variation,
}

/// Confirms font variants as active.
///
/// `load` receives one family request plus the glyph test string and invokes
/// the callback once per variant it can confirm. Variants that cannot be
/// confirmed are silently skipped: there is no error channel, no retry and
/// no timeout, so a family whose variants never confirm simply never
/// becomes ready.
pub trait FontLoader {
    fn load(
        &mut self,
        request: &FamilyRequest,
        test_string: &str,
        on_active: &mut dyn FnMut(Activation),
    );
}

/// Loads fonts from files in a directory.
///
/// Files are resolved by convention: the family name with spaces removed,
/// a dash, and the variation's face name, as `.ttf` or `.otf` (for example
/// `CJK Mono` at `n7` resolves to `CJKMono-Bold.ttf`). A variant is
/// confirmed active when its file parses as a font face, declares the
/// requested weight and style, and maps a glyph for every character of the
/// test string.
pub struct FileFontLoader {
    dir: PathBuf,
}

impl FileFontLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The candidate path for a variant, if any exists on disk.
    pub fn variant_path(&self, family: &str, variation: Variation) -> Option<PathBuf> {
        let stem: String = family.chars().filter(|c| !c.is_whitespace()).collect();
        ["ttf", "otf"].iter().find_map(|ext| {
            let path = self
                .dir
                .join(format!("{}-{}.{}", stem, variation.face_name(), ext));
            path.is_file().then_some(path)
        })
    }

    fn variant_is_active(path: &Path, variation: Variation, test_string: &str) -> bool {
        let Ok(data) = fs::read(path) else {
            return false;
        };
        let Ok(face) = ttf_parser::Face::parse(&data, 0) else {
            return false;
        };

        if face.weight().to_number() != variation.weight {
            return false;
        }
        let style_matches = match variation.style {
            FontStyle::Normal => !face.is_italic() && !face.is_oblique(),
            FontStyle::Italic => face.is_italic(),
            FontStyle::Oblique => face.is_oblique(),
        };
        if !style_matches {
            return false;
        }

        test_string.chars().all(|c| face.glyph_index(c).is_some())
    }
}

impl FontLoader for FileFontLoader {
    fn load(
        &mut self,
        request: &FamilyRequest,
        test_string: &str,
        on_active: &mut dyn FnMut(Activation),
    ) {
        for &variation in &request.variants {
            let Some(path) = self.variant_path(&request.family, variation) else {
                continue;
            };
            if Self::variant_is_active(&path, variation, test_string) {
                on_active(Activation {
                    family: request.family.clone(),
                    variation,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GLYPH_TEST_STRING;

    fn request() -> FamilyRequest {
        FamilyRequest::parse("CJK:n4,n7").unwrap()
    }

    #[test]
    fn missing_files_never_activate() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = FileFontLoader::new(dir.path());

        let mut activations = Vec::new();
        loader.load(&request(), GLYPH_TEST_STRING, &mut |a| activations.push(a));
        assert!(activations.is_empty());
    }

    #[test]
    fn invalid_font_data_never_activates() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("CJK-Regular.ttf"), b"not a font").unwrap();
        fs::write(dir.path().join("CJK-Bold.ttf"), b"still not a font").unwrap();

        let mut loader = FileFontLoader::new(dir.path());
        let mut activations = Vec::new();
        loader.load(&request(), GLYPH_TEST_STRING, &mut |a| activations.push(a));
        assert!(activations.is_empty());
    }

    #[test]
    fn variant_paths_drop_family_spaces() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("CJKMono-Bold.otf"), b"").unwrap();

        let loader = FileFontLoader::new(dir.path());
        let path = loader.variant_path("CJK Mono", Variation::BOLD).unwrap();
        assert!(path.ends_with("CJKMono-Bold.otf"));
        assert!(loader.variant_path("CJK Mono", Variation::NORMAL).is_none());
    }
}
