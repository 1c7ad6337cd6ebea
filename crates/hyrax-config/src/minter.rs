//! Identifier minting configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_prefix() -> String {
    "hx".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MinterConfig {
    /// Namespace prepended to every minted id (`{prefix}-{hex}`).
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for MinterConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

impl MinterConfig {
    /// Reject prefixes that would make minted ids ambiguous.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the prefix is empty or contains
    /// characters other than ASCII alphanumerics.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prefix.is_empty() || !self.prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::InvalidValue {
                field: "minter.prefix".into(),
                reason: format!("'{}' must be non-empty ASCII alphanumeric", self.prefix),
            });
        }
        Ok(())
    }
}
