//! Listing record and the typed values of its fields.

use std::fmt;

use serde::Serialize;

/// Display string used for any field without a positive signal.
pub const UNKNOWN: &str = "Unknown";

/// Column headers, in export order.
pub const FIELD_HEADERS: [&str; 11] = [
    "Listing URL",
    "Portal",
    "Title",
    "Price",
    "Land m2",
    "Location",
    "Full Description",
    "Agency Contact",
    "License Mention",
    "Architecture Studio",
    "Seller Type",
];

/// Turn a column header into an XML element name.
pub fn field_tag(header: &str) -> String {
    header.replace(' ', "_").to_lowercase()
}

/// A field value that is either extracted from the page or explicitly unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Extracted<T> {
    Found(T),
    Unknown,
}

impl<T> From<Option<T>> for Extracted<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unknown, Self::Found)
    }
}

impl<T: fmt::Display> fmt::Display for Extracted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(value) => value.fmt(f),
            Self::Unknown => f.write_str(UNKNOWN),
        }
    }
}

/// Whether the page mentions a building license.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseStatus {
    No,
    Yes,
    /// Sentences from the page that mention the license
    YesWithEvidence(Vec<String>),
}

impl LicenseStatus {
    pub fn is_positive(&self) -> bool {
        !matches!(self, Self::No)
    }
}

impl fmt::Display for LicenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::No => f.write_str("No"),
            Self::Yes => f.write_str("Yes"),
            Self::YesWithEvidence(snippets) => write!(f, "Yes - {}", snippets.join("; ")),
        }
    }
}

/// Whether the page credits an architecture studio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StudioMention {
    None,
    Mentioned,
    Named(String),
}

impl fmt::Display for StudioMention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Mentioned => f.write_str("Mentioned"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Who is selling the property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SellerType {
    DirectOwner,
    Agency,
    UnknownOwnerOrStudio,
}

impl fmt::Display for SellerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DirectOwner => "Direct owner",
            Self::Agency => "Agency",
            Self::UnknownOwnerOrStudio => "Unknown Owner/Studio",
        })
    }
}

/// One fully extracted listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub listing_url: String,
    pub portal: String,
    /// Page title, empty when the page has no title element
    pub title: String,
    pub price: Extracted<u64>,
    pub land_m2: Extracted<u64>,
    pub location: Extracted<String>,
    /// Leading excerpt of the page's visible text
    pub description: String,
    pub agency_contact: Extracted<String>,
    pub license: LicenseStatus,
    pub studio: StudioMention,
    pub seller_type: SellerType,
}

impl Record {
    /// Display values, aligned with [`FIELD_HEADERS`].
    pub fn values(&self) -> [String; 11] {
        [
            self.listing_url.clone(),
            self.portal.clone(),
            self.title.clone(),
            self.price.to_string(),
            self.land_m2.to_string(),
            self.location.to_string(),
            self.description.clone(),
            self.agency_contact.to_string(),
            self.license.to_string(),
            self.studio.to_string(),
            self.seller_type.to_string(),
        ]
    }

    /// Header/value pairs in export order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, String)> {
        FIELD_HEADERS.into_iter().zip(self.values())
    }

    /// Short single-line form for logs.
    pub fn summary(&self) -> String {
        format!(
            "{} | {} | {} EUR | {} m2",
            self.title, self.location, self.price, self.land_m2
        )
    }
}


#[cfg(test)]
pub(crate) use tests::sample_record;
