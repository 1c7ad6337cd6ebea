//! Transaction pipeline configuration.

use serde::{Deserialize, Serialize};

fn default_admin_set_id() -> String {
    "admin_set/default".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransactionsConfig {
    /// Admin set assigned by `set_default_admin_set` when a work has none.
    #[serde(default = "default_admin_set_id")]
    pub default_admin_set_id: String,
}

impl Default for TransactionsConfig {
    fn default() -> Self {
        Self {
            default_admin_set_id: default_admin_set_id(),
        }
    }
}
