// src/services/classifiers.rs

//! Keyword classifiers producing categorical judgments about a listing.

use regex::{Regex, RegexBuilder};

use crate::error::{AppError, Result};
use crate::models::{ExtractionConfig, LicenseStatus, SellerType, StudioMention};
use crate::utils::truncate_chars;

const DIRECT_OWNER_PHRASE: &str = "direct from owner";
const AGENCY_KEYWORDS: [&str; 2] = ["agency", "real estate"];

/// Keyword sets and patterns for the license and studio judgments.
pub struct Classifiers {
    license_keywords: Vec<String>,
    studio_keywords: Vec<String>,
    studio_name: Regex,
    evidence_limit: usize,
    evidence_max_chars: usize,
}

impl Classifiers {
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        if config.studio_suffixes.is_empty() {
            return Err(AppError::config("extraction.studio_suffixes is empty"));
        }
        let suffixes = config
            .studio_suffixes
            .iter()
            .map(|s| regex::escape(s))
            .collect::<Vec<_>>()
            .join("|");
        let studio_name = Regex::new(&format!(r"\b([A-Z][a-z]+\s(?:{suffixes}))\b"))?;

        Ok(Self {
            license_keywords: lowercase_all(&config.license_keywords),
            studio_keywords: lowercase_all(&config.studio_keywords),
            studio_name,
            evidence_limit: config.evidence_limit,
            evidence_max_chars: config.evidence_max_chars,
        })
    }

    /// Whether the page mentions a building license, with supporting sentences.
    pub fn classify_license(&self, text: &str) -> LicenseStatus {
        let found = matched_keywords(text, &self.license_keywords);
        if found.is_empty() {
            return LicenseStatus::No;
        }

        let snippets = self.evidence_sentences(text, &found);
        if snippets.is_empty() {
            LicenseStatus::Yes
        } else {
            LicenseStatus::YesWithEvidence(snippets)
        }
    }

    /// Whether the page credits an architecture studio, by name if possible.
    pub fn classify_studio(&self, text: &str) -> StudioMention {
        if matched_keywords(text, &self.studio_keywords).is_empty() {
            return StudioMention::None;
        }

        match self.studio_name.captures(text) {
            Some(caps) => StudioMention::Named(caps[1].to_string()),
            None => StudioMention::Mentioned,
        }
    }

    /// Sentences (ending in `.`, `!` or `?`) containing any of `keywords`.
    fn evidence_sentences(&self, text: &str, keywords: &[&str]) -> Vec<String> {
        if self.evidence_limit == 0 {
            return Vec::new();
        }

        let alternatives = keywords
            .iter()
            .map(|kw| regex::escape(kw))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(r"[^.!?]*?(?:{alternatives})[^.!?]*[.!?]");
        let Ok(sentence) = RegexBuilder::new(&pattern).case_insensitive(true).build() else {
            log::debug!("Could not build evidence pattern for {keywords:?}");
            return Vec::new();
        };

        sentence
            .find_iter(text)
            .map(|m| truncate_chars(m.as_str().trim(), self.evidence_max_chars).to_string())
            .filter(|s| !s.is_empty())
            .take(self.evidence_limit)
            .collect()
    }
}

impl Default for Classifiers {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default()).expect("default keyword sets are valid")
    }
}

/// Who is selling: a direct owner phrase wins over agency keywords.
pub fn classify_seller(text: &str) -> SellerType {
    let lower = text.to_lowercase();
    if lower.contains(DIRECT_OWNER_PHRASE) {
        SellerType::DirectOwner
    } else if AGENCY_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        SellerType::Agency
    } else {
        SellerType::UnknownOwnerOrStudio
    }
}

/// Keywords (already lowercase) that occur in the text, case-insensitively.
fn matched_keywords<'a>(text: &str, keywords: &'a [String]) -> Vec<&'a str> {
    let lower = text.to_lowercase();
    keywords
        .iter()
        .map(String::as_str)
        .filter(|kw| !kw.is_empty() && lower.contains(kw))
        .collect()
}

fn lowercase_all(words: &[String]) -> Vec<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_license_without_sentence_boundary() {
        let classifiers = Classifiers::default();
        assert_eq!(
            classifiers.classify_license("licencia concedida for construction"),
            LicenseStatus::Yes
        );
    }

    #[test]
    fn test_license_with_evidence() {
        let classifiers = Classifiers::default();
        let status = classifiers.classify_license(
            "Sea views. The plot has licencia concedida for construction. Great location.",
        );
        assert_eq!(
            status,
            LicenseStatus::YesWithEvidence(vec![
                "The plot has licencia concedida for construction.".to_string()
            ])
        );
    }

    #[test]
    fn test_license_evidence_capped_at_two() {
        let classifiers = Classifiers::default();
        let text = "Permit granted! Project approved by the town hall. \
                    Ready to build today? Licencia in hand.";
        let LicenseStatus::YesWithEvidence(snippets) = classifiers.classify_license(text) else {
            panic!("expected evidence");
        };
        assert_eq!(
            snippets,
            vec![
                "Permit granted!".to_string(),
                "Project approved by the town hall.".to_string()
            ]
        );
    }

    #[test]
    fn test_license_case_insensitive() {
        let classifiers = Classifiers::default();
        assert!(classifiers.classify_license("BUILDING PERMIT").is_positive());
    }

    #[test]
    fn test_license_absent() {
        let classifiers = Classifiers::default();
        assert_eq!(
            classifiers.classify_license("Rustic land with olive trees."),
            LicenseStatus::No
        );
    }

    #[test]
    fn test_license_evidence_bounded_length() {
        let mut config = ExtractionConfig::default();
        config.evidence_max_chars = 10;
        let classifiers = Classifiers::new(&config).unwrap();
        assert_eq!(
            classifiers.classify_license("Licencia concedida in 2024."),
            LicenseStatus::YesWithEvidence(vec!["Licencia c".to_string()])
        );
    }

    #[test]
    fn test_studio_named() {
        let classifiers = Classifiers::default();
        assert_eq!(
            classifiers.classify_studio("Villa project drawn by Nordic Architects in 2022"),
            StudioMention::Named("Nordic Architects".to_string())
        );
    }

    #[test]
    fn test_studio_mentioned_without_name() {
        let classifiers = Classifiers::default();
        assert_eq!(
            classifiers.classify_studio("Modern design with open spaces"),
            StudioMention::Mentioned
        );
    }

    #[test]
    fn test_studio_none() {
        let classifiers = Classifiers::default();
        assert_eq!(
            classifiers.classify_studio("Plot with sea views"),
            StudioMention::None
        );
    }

    #[test]
    fn test_studio_name_requires_keyword() {
        // "Group" alone is a suffix, not a keyword
        let classifiers = Classifiers::default();
        assert_eq!(
            classifiers.classify_studio("Offered by Costa Group"),
            StudioMention::None
        );
    }

    #[test]
    fn test_seller_direct_owner_precedence() {
        assert_eq!(
            classify_seller("Direct from owner, no agency fees"),
            SellerType::DirectOwner
        );
    }

    #[test]
    fn test_seller_agency() {
        assert_eq!(classify_seller("Contact our agency"), SellerType::Agency);
        assert_eq!(classify_seller("Marbella Real Estate"), SellerType::Agency);
    }

    #[test]
    fn test_seller_unknown() {
        assert_eq!(
            classify_seller("Plot with views"),
            SellerType::UnknownOwnerOrStudio
        );
    }

    #[test]
    fn test_empty_suffixes_rejected() {
        let mut config = ExtractionConfig::default();
        config.studio_suffixes.clear();
        assert!(Classifiers::new(&config).is_err());
    }
}
