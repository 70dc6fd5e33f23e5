//! Resource stockpiles.
//!
//! Three independent counters: gold, wood and stone. The production ticker
//! adds to them, training subtracts from them after a pre-check.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::Amount;

/// Starting gold for a new empire.
pub const STARTING_GOLD: i64 = 1000;
/// Starting wood for a new empire.
pub const STARTING_WOOD: i64 = 1000;
/// Starting stone for a new empire.
pub const STARTING_STONE: i64 = 500;

/// One of the three stockpiled resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Coin, produced by coiners and the age bonus.
    Gold,
    /// Timber, produced by woodcutters.
    Wood,
    /// Quarried stone, produced by miners.
    Stone,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Gold => "gold",
            Self::Wood => "wood",
            Self::Stone => "stone",
        };
        f.write_str(name)
    }
}

/// Purchase price in whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cost {
    /// Gold price.
    pub gold: u32,
    /// Wood price.
    #[serde(default)]
    pub wood: u32,
}

impl Cost {
    /// Create a new cost.
    #[must_use]
    pub const fn new(gold: u32, wood: u32) -> Self {
        Self { gold, wood }
    }
}

/// A shortfall found while checking a [`Cost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall {
    /// Resource that fell short.
    pub resource: ResourceKind,
    /// Whole units required.
    pub required: i64,
    /// Whole units available (floored).
    pub available: i64,
}

/// Current resource totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resources {
    /// Gold stockpile.
    pub gold: Amount,
    /// Wood stockpile.
    pub wood: Amount,
    /// Stone stockpile.
    pub stone: Amount,
}

impl Default for Resources {
    fn default() -> Self {
        Self::new(STARTING_GOLD, STARTING_WOOD, STARTING_STONE)
    }
}

impl Resources {
    /// Create stockpiles from whole amounts.
    #[must_use]
    pub const fn new(gold: i64, wood: i64, stone: i64) -> Self {
        Self {
            gold: Amount::whole(gold),
            wood: Amount::whole(wood),
            stone: Amount::whole(stone),
        }
    }

    /// Get one stockpile.
    #[must_use]
    pub const fn get(&self, kind: ResourceKind) -> Amount {
        match kind {
            ResourceKind::Gold => self.gold,
            ResourceKind::Wood => self.wood,
            ResourceKind::Stone => self.stone,
        }
    }

    /// Check whether a cost is affordable.
    ///
    /// Gold is checked before wood; the first shortfall is reported.
    pub fn check(&self, cost: Cost) -> std::result::Result<(), Shortfall> {
        for (resource, price) in [
            (ResourceKind::Gold, cost.gold),
            (ResourceKind::Wood, cost.wood),
        ] {
            let required = Amount::whole(i64::from(price));
            let available = self.get(resource);
            if available < required {
                return Err(Shortfall {
                    resource,
                    required: required.floor(),
                    available: available.floor(),
                });
            }
        }
        Ok(())
    }

    /// Spend a cost if affordable. Leaves the stockpiles untouched otherwise.
    pub fn spend(&mut self, cost: Cost) -> std::result::Result<(), Shortfall> {
        self.check(cost)?;
        self.gold -= Amount::whole(i64::from(cost.gold));
        self.wood -= Amount::whole(i64::from(cost.wood));
        Ok(())
    }

    /// Add gold (plunder, treasury grants).
    pub fn add_gold(&mut self, amount: Amount) {
        self.gold += amount;
    }

    /// Add a whole production cycle.
    pub fn credit(&mut self, yield_: &Resources) {
        self.gold += yield_.gold;
        self.wood += yield_.wood;
        self.stone += yield_.stone;
    }
}
