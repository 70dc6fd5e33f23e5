//! End-to-end progression scenarios for the empire state layer.

use empire_core::prelude::*;
use empire_test_utils::determinism::strategies::arb_action_sequence;
use empire_test_utils::fixtures::{
    empire_in_age, empire_with_army, funded_empire, gold_rush_empire, new_empire,
};
use empire_test_utils::proptest::prelude::*;

#[test]
fn founding_economy_over_ten_cycles() {
    let mut state = new_empire();
    for _ in 0..10 {
        state.tick();
    }
    // 10 cycles of 6 gold and 15 wood, no stone workers
    assert_eq!(state.resources().gold.floor(), 1060);
    assert_eq!(state.resources().wood.floor(), 1150);
    assert_eq!(state.resources().stone.floor(), 500);
}

#[test]
fn benevolent_fractional_gold_accumulates() {
    let mut state = new_empire();
    state
        .assign_villager(Job::Unassigned, Job::Gold)
        .expect("idle villager");
    // (1 * 2 + 5) * 1.2 = 8.4 per cycle
    for _ in 0..5 {
        state.tick();
    }
    assert_eq!(state.resources().gold, Amount::from_tenths(10_420));
    assert_eq!(state.resources().gold.to_string(), "1042");
}

#[test]
fn conqueror_gold_rush_in_castle_age() {
    let mut state = gold_rush_empire();
    state.advance_age("a").expect("dark to feudal");
    state.advance_age("b").expect("feudal to castle");
    // 5 * 2 + 3 * 5 = 25, no bonus
    assert_eq!(state.production().gold, Amount::whole(25));
}

#[test]
fn knights_take_the_barbarian_camp_then_feel_veterancy() {
    let mut state = empire_with_army(UnitKind::Knight, 9);
    assert_eq!(state.total_power(), 315);

    let GameEvent::Battle(report) = state.attack("barbarian camp").expect("known target") else {
        panic!("expected battle");
    };
    assert!(report.outcome.is_victory());
    // 315 * 1.05 = 330.75
    assert_eq!(state.total_power(), 330);
}

#[test]
fn siege_needs_eight_hundred_gold() {
    let mut state = funded_empire(799, 500, 0);
    let err = state.train_unit(UnitKind::Siege).unwrap_err();
    assert!(matches!(
        err,
        GameError::InsufficientResources {
            resource: ResourceKind::Gold,
            ..
        }
    ));
    assert_eq!(state.roster().count(UnitKind::Siege), 0);
}

#[test]
fn imperial_targets_are_quadrupled() {
    let state = empire_in_age(4);
    let defenses: Vec<u64> = state.targets().iter().map(|t| t.defense).collect();
    assert_eq!(defenses, [1200, 4000, 600]);
}

#[test]
fn hero_title_and_relics_are_recorded() {
    let mut state = new_empire();
    state.set_hero_title("The Ember-Crowned");
    state.store_artifact(Artifact {
        name: "Ancient Relic".to_string(),
        description: "Unknown origin.".to_string(),
        rarity: Rarity::Common,
        bonus_type: BonusType::Power,
        bonus_value: 5,
    });
    state.begin_world_event(WorldEvent {
        name: "Quiet Peace".to_string(),
        effect: "No active modifiers.".to_string(),
    });
    assert_eq!(state.hero_title(), "The Ember-Crowned");
    assert_eq!(state.artifacts().len(), 1);
    assert_eq!(state.world_event().map(|e| e.name.as_str()), Some("Quiet Peace"));
}

#[test]
fn state_serializes_to_json() {
    let state = new_empire();
    let json = serde_json::to_value(&state).expect("serializable");
    assert_eq!(json["age"], "Dark");
    assert_eq!(json["hero_title"], "The Humble Warden");
}

proptest! {
    #[test]
    fn rejected_or_not_stockpiles_never_go_negative(actions in arb_action_sequence(80)) {
        let mut state = new_empire();
        for action in &actions {
            action.apply(&mut state);
            prop_assert!(!state.resources().gold.is_negative());
            prop_assert!(!state.resources().wood.is_negative());
            prop_assert!(!state.resources().stone.is_negative());
        }
    }

    #[test]
    fn chronicle_grows_only_with_age(actions in arb_action_sequence(80)) {
        let mut state = new_empire();
        for action in &actions {
            action.apply(&mut state);
            prop_assert_eq!(state.chronicle().len() as u32, state.age().ordinal());
        }
    }

    #[test]
    fn villager_partition_holds_without_training_villagers(actions in arb_action_sequence(80)) {
        let mut state = new_empire();
        let total = state.villagers().total();
        for action in &actions {
            action.apply(&mut state);
        }
        prop_assert_eq!(
            state.villagers().total(),
            total + state.roster().count(UnitKind::Villager) - 10
        );
    }
}
