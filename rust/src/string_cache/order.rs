//! Orderings for the lookup index.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::config::ConfigError;

/// Total order used to keep the lookup index sorted.
///
/// Both variants compare equal only for identical strings, so two distinct
/// values never tie inside the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyOrder {
    /// Plain byte-wise comparison.
    #[default]
    Lexical,
    /// Shorter strings first, then bytes compared from the end.
    ///
    /// Paths out of one build tree share long directory prefixes but
    /// usually differ in the file name, so this settles most comparisons
    /// within the last few bytes.
    ReversePath,
}

impl KeyOrder {
    #[inline]
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            Self::Lexical => a.cmp(b),
            Self::ReversePath => a
                .len()
                .cmp(&b.len())
                .then_with(|| a.bytes().rev().cmp(b.bytes().rev())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lexical => "lexical",
            Self::ReversePath => "reverse_path",
        }
    }
}

impl FromStr for KeyOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lexical" => Ok(Self::Lexical),
            "reverse_path" => Ok(Self::ReversePath),
            other => Err(ConfigError::UnknownOrder(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexical_compare() {
        let order = KeyOrder::Lexical;
        assert_eq!(order.compare("/a/b", "/a/c"), Ordering::Less);
        assert_eq!(order.compare("/a/bb", "/a/b"), Ordering::Greater);
        assert_eq!(order.compare("/a/b", "/a/b"), Ordering::Equal);
    }

    #[test]
    fn test_reverse_path_compares_length_first() {
        let order = KeyOrder::ReversePath;
        // Lexically greater but shorter
        assert_eq!(order.compare("/z", "/a/b"), Ordering::Less);
    }

    #[test]
    fn test_reverse_path_compares_from_the_end() {
        let order = KeyOrder::ReversePath;
        // Same length, differ in the first byte and the last byte
        assert_eq!(order.compare("/x/file.c", "/a/file.h"), Ordering::Less);
        assert_eq!(order.compare("/a/file.h", "/x/file.c"), Ordering::Greater);
        assert_eq!(order.compare("/a/file.h", "/a/file.h"), Ordering::Equal);
    }

    #[test]
    fn test_round_trip_names() {
        for order in [KeyOrder::Lexical, KeyOrder::ReversePath] {
            assert_eq!(order.as_str().parse::<KeyOrder>(), Ok(order));
        }
    }
}
