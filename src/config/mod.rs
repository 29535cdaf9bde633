//! Function configuration
//!
//! Reads the `functions` section of a Serverless-style YAML document. Only the
//! deployed `name` of each entry is used; every other field is ignored.

pub mod loader;

pub use loader::{load_functions, parse_functions};

use tracing::warn;

/// Top-level key holding the function definitions
pub const FUNCTIONS_KEY: &str = "functions";

/// A single entry of the `functions` mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDefinition {
    /// Logical name, the key of the entry in the config file
    pub key: String,
    /// Name of the deployed function, used for every platform call
    pub name: String,
}

impl FunctionDefinition {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }

    /// Deployed name, or `None` if it is blank
    pub fn deployed_name(&self) -> Option<&str> {
        let name = self.name.trim();
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

/// Keep only the definitions whose logical key is listed in `keys`.
///
/// An empty `keys` slice selects everything. Keys without a matching entry are
/// reported as warnings. Document order is preserved.
pub fn select_functions(
    definitions: Vec<FunctionDefinition>,
    keys: &[String],
) -> Vec<FunctionDefinition> {
    if keys.is_empty() {
        return definitions;
    }

    for key in keys {
        if !definitions.iter().any(|d| &d.key == key) {
            warn!("Function '{}' is not defined in the configuration", key);
        }
    }

    definitions
        .into_iter()
        .filter(|d| keys.contains(&d.key))
        .collect()
}
