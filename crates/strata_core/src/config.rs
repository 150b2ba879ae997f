//! # Store Configuration
//!
//! Capacity is a per-component-array bound on simultaneously stored
//! components. It can be built in code or loaded from TOML:
//!
//! ```toml
//! capacity = 4096
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 65_536;

/// Configuration for a [`Store`](crate::Store).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Maximum number of components per component array.
    pub capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl StoreConfig {
    /// Config with the given per-array capacity.
    #[must_use]
    pub const fn with_capacity(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Small stores for tools and tests.
    #[must_use]
    pub const fn small() -> Self {
        Self { capacity: 1_024 }
    }

    /// Parses and validates a TOML document.
    ///
    /// Missing keys fall back to [`StoreConfig::default`].
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] on malformed TOML or unknown keys,
    /// [`ConfigError::InvalidCapacity`] if the capacity is zero.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(source).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration is usable.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidCapacity`] if the capacity is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        assert_eq!(StoreConfig::default().capacity, DEFAULT_CAPACITY);
        assert!(StoreConfig::default().validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let config = StoreConfig::from_toml_str("capacity = 256").unwrap();
        assert_eq!(config, StoreConfig::with_capacity(256));

        let config = StoreConfig::from_toml_str("").unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(
            StoreConfig::from_toml_str("capacity = 0"),
            Err(ConfigError::InvalidCapacity(0))
        );
        assert!(matches!(
            StoreConfig::from_toml_str("capacity = \"lots\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            StoreConfig::from_toml_str("capacityy = 3"),
            Err(ConfigError::Parse(_))
        ));
    }
}
