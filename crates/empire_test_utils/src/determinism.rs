//! Determinism testing utilities.
//!
//! Provides a harness for verifying that the empire state layer produces
//! identical results given identical inputs.
//!
//! # Testing Strategy
//!
//! The core must be fully deterministic so that scripted runs can be
//! replayed and compared. Sources of non-determinism include:
//!
//! - **Floating-point math**: stockpiles are integer tenths and every
//!   multiplier is an exact ratio, see [`empire_core::math`].
//!
//! - **Clocks**: the core never reads time; the caller ticks it.
//!
//! - **Narrative text**: advisor output is passed in, so tests feed fixed
//!   strings.

use empire_core::age::Alignment;
use empire_core::state::GameState;
use empire_core::units::UnitKind;
use empire_core::villagers::Job;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
    /// Number of steps applied per run.
    pub steps: u64,
}

impl DeterminismResult {
    /// Get all unique hashes (should be 1 for a deterministic run).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that the runs were deterministic, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Empire state is non-deterministic!\n\
                 Runs: {}\n\
                 Steps: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                self.steps,
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Run a scenario multiple times and verify determinism.
///
/// # Arguments
///
/// * `runs` - Number of times to run the scenario
/// * `steps` - Number of steps to apply per run
/// * `setup` - Function to create initial state
/// * `step` - Function to advance the state by one step
/// * `hash` - Function to compute state hash
pub fn verify_determinism<S, Setup, Step, HashFn>(
    runs: usize,
    steps: u64,
    setup: Setup,
    step: Step,
    hash: HashFn,
) -> DeterminismResult
where
    Setup: Fn() -> S,
    Step: Fn(&mut S, u64),
    HashFn: Fn(&S) -> u64,
{
    let mut hashes = Vec::with_capacity(runs);

    for _ in 0..runs {
        let mut state = setup();

        for i in 0..steps {
            step(&mut state, i);
        }

        hashes.push(hash(&state));
    }

    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);

    DeterminismResult {
        is_deterministic,
        hashes,
        steps,
    }
}

/// Replay the same action script on two empires and return the index of
/// the first action after which their hashes differ.
pub fn find_first_divergence<F>(setup_fn: F, actions: &[Action]) -> Option<usize>
where
    F: Fn() -> GameState,
{
    let mut a = setup_fn();
    let mut b = setup_fn();

    for (i, action) in actions.iter().enumerate() {
        action.apply(&mut a);
        action.apply(&mut b);
        if a.state_hash() != b.state_hash() {
            return Some(i);
        }
    }

    None
}

/// A player action with no advisor involvement, for scripted tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// One production cycle.
    Tick,
    /// Train one unit.
    Train(UnitKind),
    /// Attack the named target.
    Attack(String),
    /// Advance the age with fixed lore.
    AdvanceAge,
    /// Pick an alignment.
    Align(Alignment),
    /// Move a villager.
    Assign(Job, Job),
    /// Treasury grant.
    Grant,
}

impl Action {
    /// Apply the action, ignoring rejections.
    pub fn apply(&self, state: &mut GameState) {
        // Rejections leave the state untouched.
        match self {
            Action::Tick => {
                state.tick();
            }
            Action::Train(kind) => {
                let _ = state.train_unit(*kind);
            }
            Action::Attack(name) => {
                let _ = state.attack(name);
            }
            Action::AdvanceAge => {
                let _ = state.advance_age("The chroniclers record a new era.");
            }
            Action::Align(alignment) => {
                state.choose_alignment(*alignment);
            }
            Action::Assign(from, to) => {
                let _ = state.assign_villager(*from, *to);
            }
            Action::Grant => {
                state.grant_gold();
            }
        }
    }
}

/// Proptest strategies for empire actions.
pub mod strategies {
    use super::Action;
    use empire_core::age::Alignment;
    use empire_core::units::UnitKind;
    use empire_core::villagers::Job;
    use proptest::prelude::*;

    /// Any unit kind.
    pub fn arb_unit_kind() -> impl Strategy<Value = UnitKind> {
        prop::sample::select(UnitKind::ALL.to_vec())
    }

    /// Any villager job.
    pub fn arb_job() -> impl Strategy<Value = Job> {
        prop::sample::select(vec![Job::Wood, Job::Stone, Job::Gold, Job::Unassigned])
    }

    /// Either alignment.
    pub fn arb_alignment() -> impl Strategy<Value = Alignment> {
        prop_oneof![Just(Alignment::Benevolent), Just(Alignment::Conqueror)]
    }

    /// One of the built-in targets, or a name that does not exist.
    pub fn arb_target_name() -> impl Strategy<Value = String> {
        prop::sample::select(vec![
            "Barbarian Camp",
            "Rival Kingdom",
            "Ancient Grove",
            "Nowhere",
        ])
        .prop_map(str::to_string)
    }

    /// Any single action.
    pub fn arb_action() -> impl Strategy<Value = Action> {
        prop_oneof![
            4 => Just(Action::Tick),
            3 => arb_unit_kind().prop_map(Action::Train),
            2 => arb_target_name().prop_map(Action::Attack),
            1 => Just(Action::AdvanceAge),
            1 => arb_alignment().prop_map(Action::Align),
            2 => (arb_job(), arb_job()).prop_map(|(from, to)| Action::Assign(from, to)),
            1 => Just(Action::Grant),
        ]
    }

    /// A sequence of actions.
    pub fn arb_action_sequence(max_len: usize) -> impl Strategy<Value = Vec<Action>> {
        proptest::collection::vec(arb_action(), 0..max_len)
    }
}
