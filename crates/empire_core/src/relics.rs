//! Artifacts and world events.
//!
//! Both are produced by the advisor as structured JSON. They are recorded
//! on the empire but do not feed the production or combat formulas.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Lowest bonus an artifact can carry.
pub const MIN_BONUS: u32 = 5;
/// Highest bonus an artifact can carry.
pub const MAX_BONUS: u32 = 50;

/// Artifact rarity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    /// Found often.
    Common,
    /// Found seldom.
    Rare,
    /// Found once in a reign.
    Legendary,
}

/// What an artifact's bonus applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusType {
    /// Economy.
    Income,
    /// Army.
    Power,
    /// Fortifications.
    Defense,
}

/// A discovered artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// Name.
    pub name: String,
    /// Flavour text.
    pub description: String,
    /// Rarity tier.
    pub rarity: Rarity,
    /// Bonus category.
    pub bonus_type: BonusType,
    /// Bonus size, clamped to 5..=50.
    #[serde(deserialize_with = "deserialize_bonus")]
    pub bonus_value: u32,
}

impl Artifact {
    /// Clamp the bonus into the allowed range.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.bonus_value = self.bonus_value.clamp(MIN_BONUS, MAX_BONUS);
        self
    }
}

/// Accept any JSON number, floored and clamped into the bonus range.
fn deserialize_bonus<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() {
        return Err(serde::de::Error::custom("bonus value must be finite"));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let bonus = raw.floor().clamp(f64::from(MIN_BONUS), f64::from(MAX_BONUS)) as u32;
    Ok(bonus)
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:?}, +{} {:?})",
            self.name, self.rarity, self.bonus_value, self.bonus_type
        )
    }
}

/// A world-wide happening.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldEvent {
    /// Short name.
    pub name: String,
    /// Description of the effect.
    pub effect: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_parses_camel_case_json() {
        let json = r#"{"name":"Crown of Ash","description":"Warm to the touch.",
            "rarity":"Legendary","bonusType":"Income","bonusValue":40}"#;
        let a: Artifact = serde_json::from_str(json).expect("artifact json");
        assert_eq!(a.rarity, Rarity::Legendary);
        assert_eq!(a.bonus_type, BonusType::Income);
        assert_eq!(a.bonus_value, 40);
    }

    #[test]
    fn test_normalized_clamps_bonus() {
        let a = Artifact {
            name: "Pebble".to_string(),
            description: String::new(),
            rarity: Rarity::Common,
            bonus_type: BonusType::Power,
            bonus_value: 900,
        };
        assert_eq!(a.clone().normalized().bonus_value, 50);
        let low = Artifact { bonus_value: 0, ..a };
        assert_eq!(low.normalized().bonus_value, 5);
    }

    #[test]
    fn test_fractional_and_out_of_range_bonus_parse() {
        let json = r#"{"name":"Sunspear","description":"Bright.",
            "rarity":"Rare","bonusType":"Power","bonusValue":12.5}"#;
        let a: Artifact = serde_json::from_str(json).expect("fractional bonus");
        assert_eq!(a.name, "Sunspear");
        assert_eq!(a.bonus_value, 12);

        let json = r#"{"name":"Shard","description":"","rarity":"Common",
            "bonusType":"Defense","bonusValue":-3}"#;
        let a: Artifact = serde_json::from_str(json).expect("negative bonus");
        assert_eq!(a.bonus_value, MIN_BONUS);
    }
}
