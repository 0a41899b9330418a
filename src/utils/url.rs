// src/utils/url.rs

//! URL manipulation utilities.

/// Whether an href is already an absolute http(s) URL.
pub fn is_absolute(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}

/// Join a relative href onto a base URL by concatenation.
///
/// Exactly one slash is kept at the seam; absolute hrefs are returned as is.
///
/// # Examples
/// ```
/// use harvester::utils::url::join;
///
/// assert_eq!(
///     join("https://www.properstar.es/", "/listing/42"),
///     "https://www.properstar.es/listing/42"
/// );
/// ```
pub fn join(base: &str, href: &str) -> String {
    if is_absolute(href) {
        return href.to_string();
    }

    match (base.ends_with('/'), href.starts_with('/')) {
        (true, true) => format!("{}{}", base.trim_end_matches('/'), href),
        (false, false) if !href.is_empty() => format!("{base}/{href}"),
        _ => format!("{base}{href}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_absolute_path() {
        assert_eq!(
            join("https://example.com", "/listing/1"),
            "https://example.com/listing/1"
        );
    }

    #[test]
    fn test_join_collapses_double_slash() {
        assert_eq!(
            join("https://example.com/", "/listing/1"),
            "https://example.com/listing/1"
        );
    }

    #[test]
    fn test_join_relative_path() {
        assert_eq!(
            join("https://example.com", "listing/1"),
            "https://example.com/listing/1"
        );
    }

    #[test]
    fn test_join_keeps_absolute_href() {
        assert_eq!(
            join("https://example.com", "https://other.com/listing/1"),
            "https://other.com/listing/1"
        );
    }
}
