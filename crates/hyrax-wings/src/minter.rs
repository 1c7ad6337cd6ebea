//! Random prefixed identifiers, e.g. `"hx-a3f8b2c1"`.

use hyrax_core::{IdMinter, PersistError};

/// Mints `{prefix}-{8 hex}` identifiers from OS randomness.
#[derive(Debug, Clone)]
pub struct PrefixMinter {
    prefix: String,
}

impl PrefixMinter {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl IdMinter for PrefixMinter {
    fn mint(&self) -> Result<String, PersistError> {
        let mut bytes = [0u8; 4];
        getrandom::fill(&mut bytes)
            .map_err(|e| PersistError::Backend(format!("failed to mint id: {e}")))?;
        let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        Ok(format!("{}-{hex}", self.prefix))
    }
}
