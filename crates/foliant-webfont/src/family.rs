//! Font family requests.

use std::fmt;

use crate::{FontConfigError, Variation};

/// A font family together with the variants requested for it, written
/// `FamilyName:variant1,variant2` (for example `CJK:n4,n7`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyRequest {
    pub family: String,
    pub variants: Vec<Variation>,
}

impl FamilyRequest {
    /// Parse a `FamilyName:variant,variant` request string.
    pub fn parse(text: &str) -> Result<Self, FontConfigError> {
        let invalid = || FontConfigError::InvalidFamily(text.to_string());

        let (family, variants) = text.split_once(':').ok_or_else(invalid)?;
        let family = family.trim();
        if family.is_empty() {
            return Err(invalid());
        }

        let variants = variants
            .split(',')
            .map(|v| Variation::parse(v.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        if variants.is_empty() {
            return Err(invalid());
        }

        Ok(FamilyRequest {
            family: family.to_string(),
            variants,
        })
    }

    /// Number of variant activations required before the family counts as
    /// ready.
    pub fn activation_threshold(&self) -> u32 {
        self.variants.len() as u32
    }
}

impl fmt::Display for FamilyRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.family)?;
        for (i, variant) in self.variants.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", variant)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_family_with_variants() {
        let request = FamilyRequest::parse("CJK:n4,n7").unwrap();
        assert_eq!(request.family, "CJK");
        assert_eq!(request.variants, vec![Variation::NORMAL, Variation::BOLD]);
        assert_eq!(request.activation_threshold(), 2);
    }

    #[test]
    fn family_names_may_contain_spaces() {
        let request = FamilyRequest::parse("CJK Mono:n4,n7").unwrap();
        assert_eq!(request.family, "CJK Mono");
    }

    #[test]
    fn rejects_missing_parts() {
        assert!(FamilyRequest::parse("CJK").is_err());
        assert!(FamilyRequest::parse(":n4").is_err());
        assert!(FamilyRequest::parse("CJK:").is_err());
        assert!(FamilyRequest::parse("CJK:n4,nope").is_err());
    }

    #[test]
    fn round_trips_through_display() {
        let text = "CJK Mono:n4,n7";
        assert_eq!(FamilyRequest::parse(text).unwrap().to_string(), text);
    }
}
