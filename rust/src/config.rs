//! Configuration types for the string cache.

use pyo3::prelude::*;
use thiserror::Error;

use crate::string_cache::{KeyOrder, DEFAULT_CAPACITY};

/// Errors raised while interpreting a [`StringCacheConfig`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown key order: {0} (expected \"lexical\" or \"reverse_path\")")]
    UnknownOrder(String),
}

/// Configuration for a string cache instance.
#[pyclass]
#[derive(Clone, Debug)]
pub struct StringCacheConfig {
    /// Number of entries the table and the lookup index reserve up front
    #[pyo3(get, set)]
    pub initial_capacity: usize,
    /// Lookup index ordering: "lexical" or "reverse_path"
    #[pyo3(get, set)]
    pub order: String,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for StringCacheConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            order: KeyOrder::Lexical.as_str().to_string(),
            verbosity: 0,
        }
    }
}

impl StringCacheConfig {
    /// Parse the configured ordering.
    pub fn key_order(&self) -> Result<KeyOrder, ConfigError> {
        self.order.parse()
    }
}

#[pymethods]
impl StringCacheConfig {
    #[new]
    #[pyo3(signature = (initial_capacity=None, order=None, verbosity=None))]
    fn new(initial_capacity: Option<usize>, order: Option<String>, verbosity: Option<u8>) -> Self {
        let defaults = Self::default();
        Self {
            initial_capacity: initial_capacity.unwrap_or(defaults.initial_capacity),
            order: order.unwrap_or(defaults.order),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "StringCacheConfig(initial_capacity={}, order={:?}, verbosity={})",
            self.initial_capacity, self.order, self.verbosity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = StringCacheConfig::default();
        assert_eq!(config.initial_capacity, 1024);
        assert_eq!(config.verbosity, 0);
        assert_eq!(config.key_order(), Ok(KeyOrder::Lexical));
    }

    #[test]
    fn test_reverse_path_order() {
        let config = StringCacheConfig {
            order: "reverse_path".to_string(),
            ..Default::default()
        };
        assert_eq!(config.key_order(), Ok(KeyOrder::ReversePath));
    }

    #[test]
    fn test_unknown_order_error() {
        let config = StringCacheConfig {
            order: "by_mtime".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.key_order(),
            Err(ConfigError::UnknownOrder(ref s)) if s == "by_mtime"
        ));
    }
}
