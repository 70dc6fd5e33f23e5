//! # Empire Core
//!
//! Deterministic state and rules for Empire Sovereign, an idle empire game.
//!
//! This crate contains **only** deterministic logic:
//! - No IO, no clocks, no network
//! - No floating-point math (stockpiles are integer tenths, multipliers are
//!   exact ratios)
//!
//! Time passes only when the caller invokes [`GameState::tick`]; narrative
//! text from the advisor is passed in as plain strings.
//!
//! ## Crate Structure
//!
//! - [`state`] - The [`GameState`] store and every player action
//! - [`resources`], [`villagers`] - Stockpiles and the production formula
//! - [`units`], [`combat`] - The army and battle resolution
//! - [`age`], [`chronicle`] - Ages, alignment and the append-only chronicle
//! - [`data`] - RON unit and target tables
//! - [`math`] - Tenths and ratios

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod age;
pub mod buildings;
pub mod chat;
pub mod chronicle;
pub mod combat;
pub mod data;
pub mod error;
pub mod math;
pub mod relics;
pub mod resources;
pub mod state;
pub mod units;
pub mod villagers;

pub use state::GameState;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::age::{Age, Alignment};
    pub use crate::chat::{Message, Role};
    pub use crate::chronicle::Chapter;
    pub use crate::combat::{BattleOutcome, Target};
    pub use crate::error::{GameError, Result};
    pub use crate::math::{Amount, Ratio};
    pub use crate::relics::{Artifact, BonusType, Rarity, WorldEvent};
    pub use crate::resources::{Cost, ResourceKind, Resources};
    pub use crate::state::{
        AgeAdvance, BattleReport, ChatRequest, GameEvent, GameState, SagaRequest,
    };
    pub use crate::units::UnitKind;
    pub use crate::villagers::{Job, VillagerAssignment};
}
