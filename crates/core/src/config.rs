//! ListMap configuration
//!
//! Settings can be built in code with the `with_*` builders or loaded from a
//! TOML document:
//!
//! ```toml
//! # Entries to pre-allocate (default: 0)
//! initial_capacity = 64
//!
//! # Hard cap on the number of entries (default: unlimited)
//! max_len = 4096
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Construction parameters for a ListMap
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListMapConfig {
    /// Entries to pre-allocate in the backing sequence (default: 0)
    #[serde(default)]
    pub initial_capacity: usize,

    /// Maximum number of entries (default: unlimited)
    ///
    /// Insertion beyond this limit fails with `CapacityExceeded`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_len: Option<usize>,
}

impl ListMapConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set initial capacity (builder pattern).
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set the entry limit (builder pattern).
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if let Some(max_len) = self.max_len {
            if max_len == 0 {
                return Err(Error::InvalidConfig(
                    "max_len must be at least 1".to_string(),
                ));
            }
            if self.initial_capacity > max_len {
                return Err(Error::InvalidConfig(format!(
                    "initial_capacity {} exceeds max_len {}",
                    self.initial_capacity, max_len
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: ListMapConfig =
            toml::from_str(source).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render as a TOML document.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::InvalidConfig(e.to_string()))
    }
}
