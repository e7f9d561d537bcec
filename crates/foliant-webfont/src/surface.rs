//! Side-effect surfaces for ready families.
//!
//! When a family becomes ready the gate performs exactly one of two effects:
//! apply the family to a selector, or raise a notification. [`PageSurface`]
//! abstracts the rendering surface those effects land on, so the gate logic
//! is testable without any real page; [`FontStyles`] is the production
//! surface, which renders the effects as CSS text plus a list of notices for
//! the caller to display.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::{FontStyle, Variation};

/// Where the gate's side effects land.
pub trait PageSurface {
    /// Set `font-family: <family>` on everything matching `selector`.
    fn apply_font_family(&mut self, selector: &str, family: &str);

    /// Raise a user-visible notification.
    fn notify(&mut self, message: &str);
}

/// CSS-producing [`PageSurface`].
///
/// `apply_font_family` becomes a CSS rule; `notify` queues the message for
/// the caller. `@font-face` rules for the applied families are added
/// separately via [`push_font_face`](FontStyles::push_font_face), since only
/// the caller knows the font bytes.
#[derive(Debug, Default)]
pub struct FontStyles {
    face_rules: Vec<String>,
    family_rules: Vec<String>,
    applied: Vec<(String, String)>,
    notices: Vec<String>,
}

impl FontStyles {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(selector, family)` pairs applied so far.
    pub fn applied_families(&self) -> &[(String, String)] {
        &self.applied
    }

    /// Notifications raised so far.
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Add an `@font-face` rule embedding `data` as a base64 data URL.
    pub fn push_font_face(&mut self, family: &str, variation: Variation, data: &[u8]) {
        self.face_rules.push(font_face_rule(family, variation, data));
    }

    /// Render the collected rules as a stylesheet, faces first.
    ///
    /// Returns `None` when nothing was applied.
    pub fn to_css(&self) -> Option<String> {
        if self.face_rules.is_empty() && self.family_rules.is_empty() {
            return None;
        }
        let mut css = String::new();
        for rule in self.face_rules.iter().chain(&self.family_rules) {
            css.push_str(rule);
            css.push('\n');
        }
        Some(css)
    }
}

impl PageSurface for FontStyles {
    fn apply_font_family(&mut self, selector: &str, family: &str) {
        self.family_rules
            .push(format!("{}{{font-family:\"{}\"}}", selector, family));
        self.applied.push((selector.to_string(), family.to_string()));
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

/// Build an `@font-face` rule with the font data embedded as a data URL.
pub fn font_face_rule(family: &str, variation: Variation, data: &[u8]) -> String {
    let style = match variation.style {
        FontStyle::Normal => "normal",
        FontStyle::Italic => "italic",
        FontStyle::Oblique => "oblique",
    };
    format!(
        "@font-face{{font-family:\"{}\";font-style:{};font-weight:{};src:url(data:font/ttf;base64,{})format(\"truetype\")}}",
        family,
        style,
        variation.weight,
        STANDARD.encode(data),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applied_families_become_rules() {
        let mut styles = FontStyles::new();
        styles.apply_font_family(".markdown-body", "CJK");
        let css = styles.to_css().unwrap();
        assert!(css.contains(".markdown-body{font-family:\"CJK\"}"));
        assert_eq!(
            styles.applied_families(),
            &[(".markdown-body".to_string(), "CJK".to_string())]
        );
    }

    #[test]
    fn empty_surface_renders_no_css() {
        assert_eq!(FontStyles::new().to_css(), None);
    }

    #[test]
    fn font_face_rules_embed_data() {
        let rule = font_face_rule("CJK", Variation::BOLD, b"abc");
        assert!(rule.contains("font-weight:700"));
        assert!(rule.contains("font-style:normal"));
        assert!(rule.contains("base64,YWJj"));
    }

    #[test]
    fn faces_precede_family_rules() {
        let mut styles = FontStyles::new();
        styles.apply_font_family(".markdown-body", "CJK");
        styles.push_font_face("CJK", Variation::NORMAL, b"x");
        let css = styles.to_css().unwrap();
        let face = css.find("@font-face").unwrap();
        let family = css.find(".markdown-body").unwrap();
        assert!(face < family);
    }

    #[test]
    fn notices_are_recorded_in_order() {
        let mut styles = FontStyles::new();
        styles.notify("123");
        styles.notify("456");
        assert_eq!(styles.notices(), ["123", "456"]);
    }
}
