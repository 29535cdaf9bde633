//! Version listing, retention and deletion
//!
//! Published versions are decimal integers assigned in increasing order, so
//! "newest" means "largest number". The `$LATEST` qualifier is never part of
//! any version set handled here.

pub mod deleter;
pub mod lister;

pub use deleter::{delete_versions, validate_identifier, DeleteReport};
pub use lister::list_sorted_versions;

use crate::platform::LATEST_QUALIFIER;

/// Number of versions kept when nothing else is configured
pub const DEFAULT_KEEP: usize = 5;

/// How many of the newest versions survive a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub keep: usize,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self { keep: DEFAULT_KEEP }
    }
}

impl RetentionPolicy {
    pub fn new(keep: usize) -> Self {
        Self { keep }
    }

    /// Versions to delete from a newest-first list: everything after the first
    /// `keep` entries.
    pub fn expired<'a>(&self, newest_first: &'a [String]) -> &'a [String] {
        newest_first.get(self.keep..).unwrap_or_default()
    }
}

/// Numeric value of a published version identifier.
///
/// Returns `None` for `$LATEST`, blanks and anything else that is not made of
/// ASCII digits only. Signs are rejected even though `u64::from_str` takes `+`.
pub fn version_number(identifier: &str) -> Option<u64> {
    if identifier == LATEST_QUALIFIER
        || identifier.is_empty()
        || !identifier.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    identifier.parse().ok()
}

/// Drop non-numeric identifiers and sort the rest newest first.
pub fn sort_newest_first<I>(identifiers: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut numbered: Vec<(u64, String)> = identifiers
        .into_iter()
        .filter_map(|id| version_number(&id).map(|n| (n, id)))
        .collect();
    numbered.sort_by(|a, b| b.0.cmp(&a.0));
    numbered.into_iter().map(|(_, id)| id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sort_is_numeric_not_lexicographic() {
        let sorted = sort_newest_first(strings(&["3", "10", "1", "2"]));
        assert_eq!(sorted, strings(&["10", "3", "2", "1"]));
    }

    #[test]
    fn test_sort_excludes_latest_and_garbage() {
        let sorted = sort_newest_first(strings(&["$LATEST", "2", "", "live", "-1", "7"]));
        assert_eq!(sorted, strings(&["7", "2"]));
    }

    #[test]
    fn test_expired_keeps_newest() {
        let sorted = sort_newest_first(strings(&["9", "8", "7", "6", "5", "4", "3", "2", "1"]));
        let policy = RetentionPolicy::default();

        assert_eq!(policy.expired(&sorted), strings(&["4", "3", "2", "1"]).as_slice());
        assert_eq!(&sorted[..policy.keep], strings(&["9", "8", "7", "6", "5"]).as_slice());
    }

    #[test]
    fn test_expired_is_empty_within_retention() {
        let policy = RetentionPolicy::new(5);
        assert!(policy.expired(&strings(&["3", "2", "1"])).is_empty());
        assert!(policy.expired(&strings(&["5", "4", "3", "2", "1"])).is_empty());
        assert!(policy.expired(&[]).is_empty());
    }

    #[test]
    fn test_version_number() {
        assert_eq!(version_number("42"), Some(42));
        assert_eq!(version_number("$LATEST"), None);
        assert_eq!(version_number(" 4"), None);
        assert_eq!(version_number("+7"), None);
        assert_eq!(version_number(""), None);
    }

    #[test]
    fn test_signed_identifiers_are_never_expired() {
        let listing = strings(&["1", "2", "3", "4", "5", "6", "+0", "+7"]);
        let sorted = sort_newest_first(listing);
        assert_eq!(sorted, strings(&["6", "5", "4", "3", "2", "1"]));
        assert_eq!(RetentionPolicy::default().expired(&sorted), strings(&["1"]).as_slice());
    }
}
