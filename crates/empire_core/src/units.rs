//! Unit kinds and the empire's roster.
//!
//! The roster is a fixed table of five unit kinds. Counts only ever go up:
//! there is no unit loss in battle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::UnitData;
use crate::error::{GameError, Result};
use crate::resources::Cost;

/// One of the five trainable unit kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitKind {
    /// Worker; no combat power.
    Villager,
    /// Basic foot soldier.
    Infantry,
    /// Ranged foot soldier.
    Archer,
    /// Heavy cavalry.
    Knight,
    /// Siege engine.
    Siege,
}

impl UnitKind {
    /// All unit kinds in roster order.
    pub const ALL: [UnitKind; 5] = [
        UnitKind::Villager,
        UnitKind::Infantry,
        UnitKind::Archer,
        UnitKind::Knight,
        UnitKind::Siege,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            UnitKind::Villager => "Villager",
            UnitKind::Infantry => "Infantry",
            UnitKind::Archer => "Archer",
            UnitKind::Knight => "Knight",
            UnitKind::Siege => "Siege",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UnitKind {
    type Err = String;

    /// Case-insensitive lookup by name.
    ///
    /// ```
    /// use empire_core::units::UnitKind;
    ///
    /// assert_eq!("knight".parse::<UnitKind>(), Ok(UnitKind::Knight));
    /// assert!("dragon".parse::<UnitKind>().is_err());
    /// ```
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        UnitKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown unit kind '{s}'"))
    }
}

/// A roster row: static stats plus the current count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitEntry {
    /// Unit kind.
    pub kind: UnitKind,
    /// Units currently enlisted.
    pub count: u32,
    /// Combat power per unit.
    pub power_per_unit: u32,
    /// Price of one more unit.
    pub cost: Cost,
}

impl UnitEntry {
    /// Power contributed by this row.
    #[must_use]
    pub const fn power(&self) -> u64 {
        self.count as u64 * self.power_per_unit as u64
    }
}

/// The empire's unit roster.
///
/// Always holds exactly one row per [`UnitKind`], in [`UnitKind::ALL`] order.
/// Only [`from_data`](Self::from_data) builds one, which is why there is no
/// `Deserialize` impl.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct UnitRoster {
    entries: Vec<UnitEntry>,
}

impl UnitRoster {
    /// Build a roster from validated unit data.
    pub fn from_data(data: &[UnitData]) -> Result<Self> {
        let entries = UnitKind::ALL
            .into_iter()
            .map(|kind| {
                data.iter()
                    .find(|u| u.kind == kind)
                    .map(|u| UnitEntry {
                        kind,
                        count: u.starting_count,
                        power_per_unit: u.power,
                        cost: u.cost,
                    })
                    .ok_or_else(|| GameError::InvalidData {
                        path: "roster".to_string(),
                        message: format!("no data for {kind}"),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { entries })
    }

    /// All rows in roster order.
    #[must_use]
    pub fn entries(&self) -> &[UnitEntry] {
        &self.entries
    }

    /// Look up a row.
    #[must_use]
    pub fn get(&self, kind: UnitKind) -> &UnitEntry {
        // Construction guarantees one row per kind in ALL order.
        &self.entries[kind as usize]
    }

    /// Current count for a kind.
    #[must_use]
    pub fn count(&self, kind: UnitKind) -> u32 {
        self.get(kind).count
    }

    /// Price of one unit of a kind.
    #[must_use]
    pub fn cost(&self, kind: UnitKind) -> Cost {
        self.get(kind).cost
    }

    /// Raw army power before any multiplier.
    #[must_use]
    pub fn raw_power(&self) -> u64 {
        self.entries.iter().map(UnitEntry::power).sum()
    }

    /// Increment a count by one. Returns the new count.
    pub fn enlist(&mut self, kind: UnitKind) -> u32 {
        let entry = &mut self.entries[kind as usize];
        entry.count = entry.count.saturating_add(1);
        entry.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::default_roster;

    fn roster() -> UnitRoster {
        UnitRoster::from_data(&default_roster().expect("roster")).expect("valid roster")
    }

    #[test]
    fn test_roster_order_matches_kind_index() {
        let r = roster();
        for (i, kind) in UnitKind::ALL.into_iter().enumerate() {
            assert_eq!(r.entries()[i].kind, kind);
            assert_eq!(kind as usize, i);
        }
    }

    #[test]
    fn test_starting_roster_has_no_power() {
        let r = roster();
        assert_eq!(r.count(UnitKind::Villager), 10);
        assert_eq!(r.raw_power(), 0);
    }

    #[test]
    fn test_enlist_increments_single_row() {
        let mut r = roster();
        assert_eq!(r.enlist(UnitKind::Knight), 1);
        assert_eq!(r.enlist(UnitKind::Knight), 2);
        assert_eq!(r.count(UnitKind::Infantry), 0);
        assert_eq!(r.raw_power(), 70);
    }

    #[test]
    fn test_parse_kind_names() {
        assert_eq!(" Siege ".parse::<UnitKind>(), Ok(UnitKind::Siege));
        assert_eq!("VILLAGER".parse::<UnitKind>(), Ok(UnitKind::Villager));
    }
}
