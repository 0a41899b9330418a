// src/services/extractors.rs

//! Field extractors.
//!
//! Each extractor maps the flattened page text to one typed field. They are
//! total: a missing or malformed signal yields [`Extracted::Unknown`], never
//! an error.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::error::Result;
use crate::models::{ExtractionConfig, Extracted, LocationMatch};
use crate::utils::truncate_chars;

/// Digits with optional thousand groups, then a euro marker: `€`, a
/// standalone `e`, or a word starting with `eur` ("eur", "euro", "euros").
static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,3}(?:[.,]\d{2,3})*)\s*(?:€|(?i:eur)|e\b)").expect("valid price pattern")
});

/// Four or more digits followed by square metres.
static LAND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4,})\s*m²").expect("valid land pattern"));

static AGENCY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)agency\s*[:\-]?\s*([\w\s]+)").expect("valid agency pattern")
});

/// Price in euros, separators stripped.
///
/// A candidate glued to a preceding digit or separator is the tail of a
/// longer number and is skipped.
pub fn extract_price(text: &str) -> Extracted<u64> {
    PRICE_RE
        .captures_iter(text)
        .find(|caps| caps.get(1).is_some_and(|m| starts_number(text, m.start())))
        .and_then(|caps| {
            let digits: String = caps[1].chars().filter(char::is_ascii_digit).collect();
            digits.parse::<u64>().ok()
        })
        .into()
}

fn starts_number(text: &str, at: usize) -> bool {
    !text[..at]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_digit() || c == '.' || c == ',')
}

/// Plot size in square metres.
pub fn extract_land_area(text: &str) -> Extracted<u64> {
    LAND_RE
        .captures(text)
        .and_then(|caps| caps[1].parse::<u64>().ok())
        .into()
}

/// Agency name following the word "agency".
pub fn extract_agency_contact(text: &str) -> Extracted<String> {
    AGENCY_RE
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|name| !name.is_empty())
        .into()
}

/// Leading excerpt of the page text.
pub fn extract_description(text: &str, max_chars: usize) -> String {
    truncate_chars(text, max_chars).trim_end().to_string()
}

/// Matches page text against the configured place names.
pub struct LocationMatcher {
    places: Vec<(String, Regex)>,
}

impl LocationMatcher {
    pub fn new(places: &[String], mode: LocationMatch) -> Result<Self> {
        let places = places
            .iter()
            .map(|place| -> Result<(String, Regex)> {
                let escaped = regex::escape(place);
                let pattern = match mode {
                    LocationMatch::Substring => escaped,
                    LocationMatch::Word => format!(r"\b{escaped}\b"),
                };
                let re = RegexBuilder::new(&pattern).case_insensitive(true).build()?;
                Ok((place.clone(), re))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { places })
    }

    /// First place, in configured order, that occurs in the text.
    pub fn extract(&self, text: &str) -> Extracted<String> {
        self.places
            .iter()
            .find(|(_, re)| re.is_match(text))
            .map(|(place, _)| place.clone())
            .into()
    }
}

impl Default for LocationMatcher {
    fn default() -> Self {
        let config = ExtractionConfig::default();
        Self::new(&config.locations, config.location_match).expect("default places are valid")
    }
}
