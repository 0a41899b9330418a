//! Source portal definition.

use serde::{Deserialize, Serialize};

/// A listing portal to harvest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PortalConfig {
    /// Display name, also written into every record
    pub name: String,

    /// URL of the listing index page
    pub index_url: String,

    /// CSS selector matching one container per listing card
    pub link_selector: String,

    /// Prefix joined to relative detail-page links
    pub base_url: String,
}

impl PortalConfig {
    /// File-name friendly label (e.g. "Costa Homes" -> "costa_homes").
    pub fn label(&self) -> String {
        self.name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .to_lowercase()
    }

    /// File name of the raw index page dump.
    pub fn debug_file_name(&self) -> String {
        format!("debug_{}.html", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn portal(name: &str) -> PortalConfig {
        PortalConfig {
            name: name.to_string(),
            index_url: "https://example.com/search".to_string(),
            link_selector: "div.card".to_string(),
            base_url: "https://example.com".to_string(),
        }
    }

    #[test]
    fn test_label() {
        assert_eq!(portal("Properstar").label(), "properstar");
        assert_eq!(portal("Costa  Homes").label(), "costa_homes");
    }

    #[test]
    fn test_debug_file_name() {
        assert_eq!(portal("Properstar").debug_file_name(), "debug_properstar.html");
    }
}
