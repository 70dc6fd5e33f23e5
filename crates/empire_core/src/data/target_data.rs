//! Battle target definitions.

use serde::{Deserialize, Serialize};

/// A conquest target whose defense scales with the current age.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetData {
    /// Display name, also used to pick the target.
    pub name: String,

    /// Flavour text.
    #[serde(default)]
    pub description: String,

    /// Defense in the Dark Age; multiplied by the age ordinal.
    pub base_defense: u64,
}

/// Top-level shape of a target data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetList {
    /// Targets in display order.
    pub targets: Vec<TargetData>,
}
