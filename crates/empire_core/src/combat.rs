//! Army power and battle resolution.
//!
//! Combat is a single comparison: the army's total power against a
//! target's defense. There is no partial damage, no unit loss and no
//! retreat cost.
//!
//! - Total power = floor(raw × alignment bonus × (1 + battles × 0.05))
//! - Victory iff total power ≥ defense
//! - Plunder = floor(defense × 0.8)

use serde::{Deserialize, Serialize};

use crate::age::{Age, Alignment};
use crate::data::TargetData;
use crate::math::Ratio;

/// Veterancy bonus per battle won, as `num / den` (5%).
pub const VETERANCY_PER_BATTLE: Ratio = Ratio::new(1, 20);

/// Share of a target's defense taken as gold on victory (80%).
pub const PLUNDER_SHARE: Ratio = Ratio::new(4, 5);

/// Veterancy multiplier for a number of past victories.
#[must_use]
pub fn veterancy_multiplier(battles: u32) -> Ratio {
    let den = VETERANCY_PER_BATTLE.den;
    Ratio::new(
        den + u64::from(battles) * VETERANCY_PER_BATTLE.num,
        den,
    )
}

/// Total army power.
///
/// # Example
///
/// ```
/// use empire_core::age::Alignment;
/// use empire_core::combat::total_power;
///
/// // 10 infantry (50 raw), Conqueror, 2 victories: 50 * 1.2 * 1.1 = 66
/// assert_eq!(total_power(50, Alignment::Conqueror, 2), 66);
/// ```
#[must_use]
pub fn total_power(raw_power: u64, alignment: Alignment, battles: u32) -> u64 {
    alignment
        .combat_multiplier()
        .compose(veterancy_multiplier(battles))
        .mul_floor(raw_power)
}

/// Gold taken from a defeated target.
#[must_use]
pub fn plunder(defense: u64) -> u64 {
    PLUNDER_SHARE.mul_floor(defense)
}

/// A target as it stands in the current age.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    /// Display name.
    pub name: String,
    /// Flavour text.
    pub description: String,
    /// Defense to beat.
    pub defense: u64,
}

impl Target {
    /// Scale a target's base defense to an age.
    #[must_use]
    pub fn at_age(data: &TargetData, age: Age) -> Self {
        Self {
            name: data.name.clone(),
            description: data.description.clone(),
            defense: data.base_defense.saturating_mul(u64::from(age.ordinal())),
        }
    }
}

/// Result of comparing power with defense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum BattleOutcome {
    /// The army prevailed.
    Victory {
        /// Gold taken.
        plunder: u64,
    },
    /// The army retreated; nothing changes.
    Defeat {
        /// Power missing to win.
        shortfall: u64,
    },
}

impl BattleOutcome {
    /// Check if this outcome is a victory.
    #[must_use]
    pub const fn is_victory(&self) -> bool {
        matches!(self, Self::Victory { .. })
    }
}

/// Resolve a battle.
#[must_use]
pub fn resolve_battle(power: u64, defense: u64) -> BattleOutcome {
    if power >= defense {
        BattleOutcome::Victory {
            plunder: plunder(defense),
        }
    } else {
        BattleOutcome::Defeat {
            shortfall: defense - power,
        }
    }
}
