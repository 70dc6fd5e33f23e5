//! Ages and alignment.
//!
//! The age is an ordered progression of four stages; the alignment is the
//! empire's chosen path. Both feed the production and combat formulas.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::Ratio;

/// Ordinal progression stage of the empire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Age {
    /// Age 1.
    #[default]
    Dark,
    /// Age 2.
    Feudal,
    /// Age 3.
    Castle,
    /// Age 4, the last one.
    Imperial,
}

impl Age {
    /// All ages in order.
    pub const ALL: [Age; 4] = [Age::Dark, Age::Feudal, Age::Castle, Age::Imperial];

    /// Ordinal from 1 to 4.
    ///
    /// # Example
    ///
    /// ```
    /// use empire_core::age::Age;
    ///
    /// assert_eq!(Age::Dark.ordinal(), 1);
    /// assert_eq!(Age::Imperial.ordinal(), 4);
    /// ```
    #[must_use]
    pub const fn ordinal(self) -> u32 {
        match self {
            Age::Dark => 1,
            Age::Feudal => 2,
            Age::Castle => 3,
            Age::Imperial => 4,
        }
    }

    /// Look up an age by ordinal.
    #[must_use]
    pub const fn from_ordinal(ordinal: u32) -> Option<Self> {
        match ordinal {
            1 => Some(Age::Dark),
            2 => Some(Age::Feudal),
            3 => Some(Age::Castle),
            4 => Some(Age::Imperial),
            _ => None,
        }
    }

    /// The following age, or `None` from the Imperial Age.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        Self::from_ordinal(self.ordinal() + 1)
    }

    /// Display name ("Dark Age", "Feudal Age", ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Age::Dark => "Dark Age",
            Age::Feudal => "Feudal Age",
            Age::Castle => "Castle Age",
            Age::Imperial => "Imperial Age",
        }
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The empire's chosen path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Alignment {
    /// Domestic harmony: +20% production.
    #[default]
    Benevolent,
    /// Global dominance: +20% combat power.
    Conqueror,
}

impl Alignment {
    /// Multiplier on gold production.
    #[must_use]
    pub const fn production_multiplier(self) -> Ratio {
        match self {
            Alignment::Benevolent => Ratio::new(6, 5),
            Alignment::Conqueror => Ratio::ONE,
        }
    }

    /// Multiplier on army power.
    #[must_use]
    pub const fn combat_multiplier(self) -> Ratio {
        match self {
            Alignment::Benevolent => Ratio::ONE,
            Alignment::Conqueror => Ratio::new(6, 5),
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Alignment::Benevolent => "Benevolent",
            Alignment::Conqueror => "Conqueror",
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_progression() {
        assert_eq!(Age::Dark.next(), Some(Age::Feudal));
        assert_eq!(Age::Feudal.next(), Some(Age::Castle));
        assert_eq!(Age::Castle.next(), Some(Age::Imperial));
        assert_eq!(Age::Imperial.next(), None);
    }

    #[test]
    fn test_ordinals_round_trip() {
        for age in Age::ALL {
            assert_eq!(Age::from_ordinal(age.ordinal()), Some(age));
        }
        assert_eq!(Age::from_ordinal(0), None);
        assert_eq!(Age::from_ordinal(5), None);
    }

    #[test]
    fn test_alignment_bonuses_are_exclusive() {
        assert_eq!(Alignment::Benevolent.production_multiplier().mul_floor(10), 12);
        assert_eq!(Alignment::Benevolent.combat_multiplier().mul_floor(10), 10);
        assert_eq!(Alignment::Conqueror.production_multiplier().mul_floor(10), 10);
        assert_eq!(Alignment::Conqueror.combat_multiplier().mul_floor(10), 12);
    }
}
