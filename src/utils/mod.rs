//! Utility functions and helpers.

pub mod html;
pub mod http;

use url::Url;

use crate::error::Result;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Set a query parameter on a URL, replacing any existing value for the key.
pub fn with_query_param(url: &str, key: &str, value: &str) -> Result<String> {
    let mut parsed = Url::parse(url)?;
    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(k, _)| k != key)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    parsed
        .query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair(key, value);
    Ok(parsed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://www.kth.se/student/kurser/sokkurs").unwrap();
        assert_eq!(
            resolve_url(&base, "/student/kurser/kurs/SF1624"),
            "https://www.kth.se/student/kurser/kurs/SF1624"
        );
        assert_eq!(
            resolve_url(&base, "https://other.com/x"),
            "https://other.com/x"
        );
    }

    #[test]
    fn test_with_query_param_appends() {
        assert_eq!(
            with_query_param("https://www.kth.se/kurs/SF1624", "l", "en").unwrap(),
            "https://www.kth.se/kurs/SF1624?l=en"
        );
    }

    #[test]
    fn test_with_query_param_replaces_existing() {
        assert_eq!(
            with_query_param("https://www.kth.se/kurs/SF1624?l=en&startterm=20221", "startterm", "20232")
                .unwrap(),
            "https://www.kth.se/kurs/SF1624?l=en&startterm=20232"
        );
    }
}
