//! Data-driven unit and target tables.
//!
//! The default tables are RON files embedded at compile time, so this
//! module performs no IO. Callers that want different balance numbers can
//! hand their own RON text to [`parse_roster`] and [`parse_targets`].

mod target_data;
mod unit_data;

pub use target_data::{TargetData, TargetList};
pub use unit_data::{RosterData, UnitData};

use crate::error::{GameError, Result};
use crate::units::UnitKind;

/// Name used in errors for the embedded roster.
pub const DEFAULT_ROSTER_NAME: &str = "units.ron";
/// Name used in errors for the embedded target list.
pub const DEFAULT_TARGETS_NAME: &str = "targets.ron";

const DEFAULT_ROSTER_RON: &str = include_str!("../../assets/units.ron");
const DEFAULT_TARGETS_RON: &str = include_str!("../../assets/targets.ron");

/// Parse and validate a roster file.
///
/// Every [`UnitKind`] must appear exactly once.
pub fn parse_roster(source: &str, path: &str) -> Result<Vec<UnitData>> {
    let data: RosterData = ron::from_str(source).map_err(|e| GameError::DataParseError {
        path: path.to_string(),
        message: e.to_string(),
    })?;

    for kind in UnitKind::ALL {
        let rows = data.units.iter().filter(|u| u.kind == kind).count();
        if rows != 1 {
            return Err(GameError::InvalidData {
                path: path.to_string(),
                message: format!("expected exactly one row for {kind}, found {rows}"),
            });
        }
    }

    Ok(data.units)
}

/// Parse and validate a target file.
///
/// Target names must be unique and defenses positive.
pub fn parse_targets(source: &str, path: &str) -> Result<Vec<TargetData>> {
    let data: TargetList = ron::from_str(source).map_err(|e| GameError::DataParseError {
        path: path.to_string(),
        message: e.to_string(),
    })?;

    for (i, target) in data.targets.iter().enumerate() {
        if target.base_defense == 0 {
            return Err(GameError::InvalidData {
                path: path.to_string(),
                message: format!("target '{}' has zero defense", target.name),
            });
        }
        if data.targets[..i].iter().any(|t| t.name == target.name) {
            return Err(GameError::InvalidData {
                path: path.to_string(),
                message: format!("duplicate target '{}'", target.name),
            });
        }
    }

    Ok(data.targets)
}

/// The built-in roster.
pub fn default_roster() -> Result<Vec<UnitData>> {
    parse_roster(DEFAULT_ROSTER_RON, DEFAULT_ROSTER_NAME)
}

/// The built-in target list.
pub fn default_targets() -> Result<Vec<TargetData>> {
    parse_targets(DEFAULT_TARGETS_RON, DEFAULT_TARGETS_NAME)
}
