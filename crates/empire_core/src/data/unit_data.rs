//! Unit data structures for data-driven unit definitions.

use serde::{Deserialize, Serialize};

use crate::resources::Cost;
use crate::units::UnitKind;

/// Data-driven unit definition.
///
/// # Example RON
///
/// ```ron
/// (
///     kind: Knight,
///     description: "Armoured cavalry, the pride of the court.",
///     power: 35,
///     cost: (gold: 300, wood: 150),
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitData {
    /// Which unit this row describes.
    pub kind: UnitKind,

    /// Flavour text.
    #[serde(default)]
    pub description: String,

    /// Combat power contributed by each unit.
    pub power: u32,

    /// Price of one unit.
    pub cost: Cost,

    /// Units present when a new empire is founded.
    #[serde(default)]
    pub starting_count: u32,
}

/// Top-level shape of a roster data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterData {
    /// One row per unit kind.
    pub units: Vec<UnitData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_fields_missing() {
        let unit: UnitData = ron::from_str("(kind: Infantry, power: 5, cost: (gold: 60))")
            .expect("row should parse");
        assert_eq!(unit.starting_count, 0);
        assert_eq!(unit.cost.wood, 0);
        assert!(unit.description.is_empty());
    }
}
