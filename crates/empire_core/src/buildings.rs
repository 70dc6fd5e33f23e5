//! Settlement buildings.

use serde::{Deserialize, Serialize};

/// Broad purpose of a building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingType {
    /// Barracks, walls.
    Military,
    /// Town center, markets.
    Economy,
    /// Libraries, workshops.
    Tech,
}

/// A building in the settlement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Building {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Upgrade level, starting at 1.
    pub level: u32,
    /// Purpose.
    pub building_type: BuildingType,
    /// Flavour text.
    pub description: String,
}

impl Building {
    /// The Town Center every empire is founded with.
    #[must_use]
    pub fn town_center() -> Self {
        Self {
            id: "th".to_string(),
            name: "Town Center".to_string(),
            level: 1,
            building_type: BuildingType::Economy,
            description: "The heart of your empire.".to_string(),
        }
    }
}
