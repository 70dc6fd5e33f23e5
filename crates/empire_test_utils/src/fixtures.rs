//! Test fixtures and helpers.
//!
//! Pre-built empires for consistent testing. All fixtures panic on bad
//! embedded data, which only happens when the asset files are broken.

use empire_core::age::Alignment;
use empire_core::resources::Resources;
use empire_core::state::GameState;
use empire_core::units::UnitKind;
use empire_core::villagers::Job;

/// A freshly founded empire.
///
/// # Panics
///
/// Panics if the embedded unit or target tables fail to parse.
#[must_use]
pub fn new_empire() -> GameState {
    GameState::new().expect("embedded data tables must parse")
}

/// A fresh empire with the given stockpiles.
#[must_use]
pub fn funded_empire(gold: i64, wood: i64, stone: i64) -> GameState {
    let mut state = new_empire();
    state.set_resources(Resources::new(gold, wood, stone));
    state
}

/// A fresh empire that has trained `count` units of `kind`.
///
/// Stockpiles are topped up first so training never fails; they are reset
/// to the starting values afterwards.
///
/// # Panics
///
/// Panics if a unit cannot be trained with the topped-up stockpiles.
#[must_use]
pub fn empire_with_army(kind: UnitKind, count: u32) -> GameState {
    let mut state = funded_empire(1_000_000, 1_000_000, 0);
    for _ in 0..count {
        state.train_unit(kind).expect("topped-up stockpiles");
    }
    state.set_resources(Resources::default());
    state
}

/// A Conqueror empire with every idle villager mining gold.
///
/// # Panics
///
/// Panics if the starting villager split has fewer idle villagers than
/// expected.
#[must_use]
pub fn gold_rush_empire() -> GameState {
    let mut state = new_empire();
    state.choose_alignment(Alignment::Conqueror);
    while state.villagers().unassigned > 0 {
        state
            .assign_villager(Job::Unassigned, Job::Gold)
            .expect("idle villagers remain");
    }
    state
}

/// A fresh empire advanced to the given age ordinal (1..=4).
///
/// # Panics
///
/// Panics if `ordinal` is out of range.
#[must_use]
pub fn empire_in_age(ordinal: u32) -> GameState {
    let mut state = new_empire();
    for _ in 1..ordinal {
        state
            .advance_age("A new era begins.")
            .expect("ordinal within range");
    }
    state
}
