//! Villager assignment and per-cycle production.
//!
//! Villagers are split across three jobs plus an idle pool. Each job feeds
//! one stockpile; gold also receives a flat bonus that grows with the age.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::age::{Age, Alignment};
use crate::math::{Amount, Ratio};
use crate::resources::Resources;

/// Wood gathered per woodcutter per cycle.
pub const WOOD_PER_WORKER: i64 = 3;
/// Stone quarried per miner per cycle.
pub const STONE_PER_WORKER: i64 = 2;
/// Gold minted per coiner per cycle.
pub const GOLD_PER_WORKER: u64 = 2;
/// Flat gold per cycle for each age ordinal.
pub const GOLD_PER_AGE: u64 = 5;

/// A label in the villager partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Job {
    /// Woodcutters.
    Wood,
    /// Miners.
    Stone,
    /// Coiners.
    Gold,
    /// Idle villagers.
    Unassigned,
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Wood => "wood",
            Self::Stone => "stone",
            Self::Gold => "gold",
            Self::Unassigned => "unassigned",
        };
        f.write_str(name)
    }
}

/// How the villager population is split across jobs.
///
/// The parts are expected to add up to the number of Villager units in the
/// roster, but nothing enforces that: see [`is_consistent`](Self::is_consistent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VillagerAssignment {
    /// Woodcutters.
    pub wood: u32,
    /// Miners.
    pub stone: u32,
    /// Coiners.
    pub gold: u32,
    /// Idle villagers.
    pub unassigned: u32,
}

impl Default for VillagerAssignment {
    fn default() -> Self {
        Self {
            wood: 5,
            stone: 0,
            gold: 0,
            unassigned: 5,
        }
    }
}

impl VillagerAssignment {
    /// Sum of all parts.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.wood + self.stone + self.gold + self.unassigned
    }

    /// Check whether the parts add up to `villagers`.
    #[must_use]
    pub const fn is_consistent(&self, villagers: u32) -> bool {
        self.total() == villagers
    }

    /// Count for one job.
    #[must_use]
    pub const fn get(&self, job: Job) -> u32 {
        match job {
            Job::Wood => self.wood,
            Job::Stone => self.stone,
            Job::Gold => self.gold,
            Job::Unassigned => self.unassigned,
        }
    }

    fn slot(&mut self, job: Job) -> &mut u32 {
        match job {
            Job::Wood => &mut self.wood,
            Job::Stone => &mut self.stone,
            Job::Gold => &mut self.gold,
            Job::Unassigned => &mut self.unassigned,
        }
    }

    /// Add a freshly trained villager to the idle pool.
    pub fn enlist(&mut self) {
        self.unassigned = self.unassigned.saturating_add(1);
    }

    /// Move one villager between jobs.
    ///
    /// Returns false and changes nothing if `from` is empty.
    pub fn reassign(&mut self, from: Job, to: Job) -> bool {
        if self.get(from) == 0 {
            return false;
        }
        if from != to {
            *self.slot(from) -= 1;
            *self.slot(to) += 1;
        }
        true
    }

    /// Yield of one production cycle.
    ///
    /// - gold = (coiners × 2 + age × 5) × alignment bonus
    /// - wood = woodcutters × 3
    /// - stone = miners × 2
    #[must_use]
    pub fn production(&self, age: Age, alignment: Alignment) -> Resources {
        let base_gold =
            u64::from(self.gold) * GOLD_PER_WORKER + u64::from(age.ordinal()) * GOLD_PER_AGE;
        // Tenths keep the 1.2 bonus exact.
        let gold_tenths = alignment
            .production_multiplier()
            .compose(Ratio::new(10, 1))
            .mul_floor(base_gold);

        Resources {
            gold: Amount::from_tenths(i64::try_from(gold_tenths).unwrap_or(i64::MAX)),
            wood: Amount::whole(i64::from(self.wood) * WOOD_PER_WORKER),
            stone: Amount::whole(i64::from(self.stone) * STONE_PER_WORKER),
        }
    }
}
