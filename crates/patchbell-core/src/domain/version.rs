//! Version string helpers.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v?(\d+\.\d+\.\d+)").expect("version pattern is valid"));

/// Compare two dotted numeric versions.
///
/// A leading `v` is ignored and the shorter version is padded with zeros, so
/// `1.2` equals `1.2.0`. If either side has a non-numeric component the
/// versions are treated as equal.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let (Some(mut left), Some(mut right)) = (numeric_parts(a), numeric_parts(b)) else {
        return Ordering::Equal;
    };

    let width = left.len().max(right.len());
    left.resize(width, 0);
    right.resize(width, 0);
    left.cmp(&right)
}

fn numeric_parts(version: &str) -> Option<Vec<u64>> {
    let trimmed = version.trim();
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
    trimmed
        .split('.')
        .map(|part| part.parse::<u64>().ok())
        .collect()
}

/// Find the first `X.Y.Z` version (optionally `v`-prefixed) in free text.
pub fn extract_version(text: &str) -> Option<String> {
    VERSION_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_versions_orders_numerically() {
        assert_eq!(compare_versions("1.0.0", "1.0.1"), Ordering::Less);
        assert_eq!(compare_versions("1.0.0", "1.1.0"), Ordering::Less);
        assert_eq!(compare_versions("1.0.0", "2.0.0"), Ordering::Less);
        assert_eq!(compare_versions("1.10.0", "1.9.0"), Ordering::Greater);
        assert_eq!(compare_versions("1.1.0", "1.1.0"), Ordering::Equal);
    }

    #[test]
    fn test_compare_versions_pads_missing_components() {
        assert_eq!(compare_versions("1.2", "1.2.0"), Ordering::Equal);
        assert_eq!(compare_versions("1.2", "1.2.1"), Ordering::Less);
    }

    #[test]
    fn test_compare_versions_ignores_v_prefix() {
        assert_eq!(compare_versions("v2.0.0", "2.0.0"), Ordering::Equal);
    }

    #[test]
    fn test_non_numeric_versions_compare_equal() {
        assert_eq!(compare_versions("1.0.0-beta", "2.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("", "1.0.0"), Ordering::Equal);
    }

    #[test]
    fn test_extract_version() {
        assert_eq!(
            extract_version("Release v1.4.2 brings fixes"),
            Some("1.4.2".to_string())
        );
        assert_eq!(extract_version("version 10.0.3"), Some("10.0.3".to_string()));
        assert_eq!(extract_version("no version here"), None);
    }
}
