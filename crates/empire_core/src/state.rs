//! The game state store.
//!
//! [`GameState`] is the single owner of everything an empire has. All
//! mutation goes through its methods; every method either applies its whole
//! effect or, on error, changes nothing.
//!
//! Actions that need narrative text from the advisor are split in two: a
//! `begin_*` / `post_*` step that validates and reserves the action, and a
//! `complete_*` / `record_*` step that applies the advisor's text when it
//! arrives. Production keeps ticking in between.
//!
//! # Example
//!
//! ```
//! use empire_core::state::GameState;
//! use empire_core::units::UnitKind;
//!
//! let mut state = GameState::new().expect("embedded data is valid");
//! state.train_unit(UnitKind::Infantry).expect("starting funds cover infantry");
//! state.tick();
//! assert_eq!(state.roster().count(UnitKind::Infantry), 1);
//! assert_eq!(state.cycles(), 1);
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::age::{Age, Alignment};
use crate::buildings::Building;
use crate::chat::{Message, Transcript};
use crate::chronicle::{saga_due, Chapter, Chronicle, STARTING_HERO_TITLE};
use crate::combat::{resolve_battle, total_power, BattleOutcome, Target};
use crate::data::{default_roster, default_targets, TargetData, UnitData};
use crate::error::{GameError, Result};
use crate::math::Amount;
use crate::relics::{Artifact, WorldEvent};
use crate::resources::Resources;
use crate::units::{UnitKind, UnitRoster};
use crate::villagers::{Job, VillagerAssignment};

/// Gold added by a treasury grant.
pub const TREASURY_GRANT: i64 = 1000;

/// Something that happened to the empire, for the front-end to announce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// A production cycle was credited.
    Produced {
        /// What was added.
        #[serde(rename = "yield")]
        yield_: Resources,
    },
    /// A unit was trained.
    Trained {
        /// Unit kind.
        kind: UnitKind,
        /// New count.
        count: u32,
    },
    /// A battle was fought.
    Battle(BattleReport),
    /// A new age began.
    AgeReached {
        /// The new age.
        age: Age,
        /// Chapter number of the new chronicle entry.
        chapter: usize,
    },
    /// The empire picked a path.
    AlignmentChosen {
        /// The chosen path.
        alignment: Alignment,
    },
    /// A villager changed jobs.
    VillagerReassigned {
        /// Old job.
        from: Job,
        /// New job.
        to: Job,
    },
    /// Gold was granted by the treasury.
    TreasuryGrant {
        /// Whole gold added.
        amount: i64,
    },
    /// The advisor answered.
    AdvisorReplied,
    /// The hero received a new title.
    HeroTitled {
        /// The title.
        title: String,
    },
    /// An artifact joined the vault.
    ArtifactDiscovered {
        /// The artifact.
        artifact: Artifact,
    },
    /// A world event began.
    WorldEventBegan {
        /// The event.
        world_event: WorldEvent,
    },
}

/// A hero title request triggered by a victory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SagaRequest {
    /// Hero level (the age ordinal).
    pub level: u32,
    /// Victories so far, including this one.
    pub battles: u32,
}

/// Full account of one battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BattleReport {
    /// Target name.
    pub target: String,
    /// Defense that was faced.
    pub defense: u64,
    /// Power that was fielded.
    pub power: u64,
    /// Victory or defeat.
    pub outcome: BattleOutcome,
    /// Set when this victory earns the hero a new title.
    pub saga: Option<SagaRequest>,
}

/// Everything the advisor needs to write lore for an age advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeAdvance {
    /// The age being entered.
    pub next: Age,
    /// Current alignment.
    pub alignment: Alignment,
}

/// Everything the advisor needs to answer a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    /// Transcript before the new message.
    pub history: Vec<Message>,
    /// The new message.
    pub message: String,
}

/// The single in-memory store of an empire.
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    resources: Resources,
    villagers: VillagerAssignment,
    buildings: Vec<Building>,
    roster: UnitRoster,
    #[serde(skip)]
    targets: Vec<TargetData>,
    age: Age,
    alignment: Alignment,
    battles: u32,
    hero_title: String,
    chronicle: Chronicle,
    transcript: Transcript,
    artifacts: Vec<Artifact>,
    world_event: Option<WorldEvent>,
    cycles: u64,
    pending_age: Option<Age>,
    advisor_busy: bool,
}

impl GameState {
    /// A freshly founded empire using the built-in unit and target tables.
    pub fn new() -> Result<Self> {
        Self::from_data(&default_roster()?, default_targets()?)
    }

    /// A freshly founded empire using custom tables.
    pub fn from_data(units: &[UnitData], targets: Vec<TargetData>) -> Result<Self> {
        Ok(Self {
            resources: Resources::default(),
            villagers: VillagerAssignment::default(),
            buildings: vec![Building::town_center()],
            roster: UnitRoster::from_data(units)?,
            targets,
            age: Age::default(),
            alignment: Alignment::default(),
            battles: 0,
            hero_title: STARTING_HERO_TITLE.to_string(),
            chronicle: Chronicle::default(),
            transcript: Transcript::default(),
            artifacts: Vec::new(),
            world_event: None,
            cycles: 0,
            pending_age: None,
            advisor_busy: false,
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Current stockpiles.
    #[must_use]
    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    /// Current villager split.
    #[must_use]
    pub fn villagers(&self) -> &VillagerAssignment {
        &self.villagers
    }

    /// Settlement buildings.
    #[must_use]
    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    /// Unit roster.
    #[must_use]
    pub fn roster(&self) -> &UnitRoster {
        &self.roster
    }

    /// Current age.
    #[must_use]
    pub fn age(&self) -> Age {
        self.age
    }

    /// Current alignment.
    #[must_use]
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Victories so far.
    #[must_use]
    pub fn battles(&self) -> u32 {
        self.battles
    }

    /// The hero's title.
    #[must_use]
    pub fn hero_title(&self) -> &str {
        &self.hero_title
    }

    /// The chronicle.
    #[must_use]
    pub fn chronicle(&self) -> &Chronicle {
        &self.chronicle
    }

    /// The advisor transcript.
    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Discovered artifacts, oldest first.
    #[must_use]
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// The active world event, if any.
    #[must_use]
    pub fn world_event(&self) -> Option<&WorldEvent> {
        self.world_event.as_ref()
    }

    /// Production cycles credited so far.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Whether a chat reply is outstanding.
    #[must_use]
    pub fn advisor_busy(&self) -> bool {
        self.advisor_busy
    }

    /// The age being entered, while its chronicle entry is outstanding.
    #[must_use]
    pub fn pending_age(&self) -> Option<Age> {
        self.pending_age
    }

    /// Yield of the next production cycle.
    #[must_use]
    pub fn production(&self) -> Resources {
        self.villagers.production(self.age, self.alignment)
    }

    /// Current army power.
    #[must_use]
    pub fn total_power(&self) -> u64 {
        total_power(self.roster.raw_power(), self.alignment, self.battles)
    }

    /// Conquest targets scaled to the current age.
    #[must_use]
    pub fn targets(&self) -> Vec<Target> {
        self.targets
            .iter()
            .map(|t| Target::at_age(t, self.age))
            .collect()
    }

    /// Whether the villager split adds up to the Villager count.
    #[must_use]
    pub fn villagers_consistent(&self) -> bool {
        self.villagers
            .is_consistent(self.roster.count(UnitKind::Villager))
    }

    // =========================================================================
    // Production
    // =========================================================================

    /// Credit one production cycle.
    pub fn tick(&mut self) -> GameEvent {
        let yield_ = self.production();
        self.resources.credit(&yield_);
        self.cycles += 1;
        GameEvent::Produced { yield_ }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Train one unit.
    ///
    /// Spends the unit's cost and increments its count; a trained Villager
    /// also joins the idle pool. Changes nothing if funds are short.
    pub fn train_unit(&mut self, kind: UnitKind) -> Result<GameEvent> {
        let cost = self.roster.cost(kind);
        self.resources
            .spend(cost)
            .map_err(|s| GameError::InsufficientResources {
                unit: kind,
                resource: s.resource,
                required: s.required,
                available: s.available,
            })?;

        let count = self.roster.enlist(kind);
        if kind == UnitKind::Villager {
            self.villagers.enlist();
        }
        tracing::debug!(unit = %kind, count, "Unit trained");
        Ok(GameEvent::Trained { kind, count })
    }

    /// Attack a named target.
    ///
    /// A defeat is a normal outcome and changes nothing.
    pub fn attack(&mut self, target_name: &str) -> Result<GameEvent> {
        let target = self
            .targets
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(target_name.trim()))
            .map(|t| Target::at_age(t, self.age))
            .ok_or_else(|| GameError::UnknownTarget(target_name.to_string()))?;

        Ok(GameEvent::Battle(self.fight(&target.name, target.defense)))
    }

    /// Fight against an arbitrary defense value.
    pub fn fight(&mut self, target_name: &str, defense: u64) -> BattleReport {
        let power = self.total_power();
        let outcome = resolve_battle(power, defense);
        let mut saga = None;

        if let BattleOutcome::Victory { plunder } = outcome {
            let battles_before = self.battles;
            self.battles = self.battles.saturating_add(1);
            self.resources
                .add_gold(Amount::whole(i64::try_from(plunder).unwrap_or(i64::MAX)));
            if saga_due(battles_before) {
                saga = Some(SagaRequest {
                    level: self.age.ordinal(),
                    battles: self.battles,
                });
            }
        }

        tracing::debug!(target_name, defense, power, ?outcome, "Battle resolved");
        BattleReport {
            target: target_name.to_string(),
            defense,
            power,
            outcome,
            saga,
        }
    }

    /// Reserve an age advance. The chronicle entry is written by
    /// [`complete_age_advance`](Self::complete_age_advance).
    pub fn begin_age_advance(&mut self) -> Result<AgeAdvance> {
        if self.pending_age.is_some() {
            return Err(GameError::AgeAdvancePending);
        }
        let next = self
            .age
            .next()
            .ok_or_else(|| GameError::FinalAge(self.age.name().to_string()))?;
        self.pending_age = Some(next);
        Ok(AgeAdvance {
            next,
            alignment: self.alignment,
        })
    }

    /// Enter the reserved age and append exactly one chronicle chapter.
    pub fn complete_age_advance(&mut self, summary: impl Into<String>) -> Result<GameEvent> {
        let age = self
            .pending_age
            .take()
            .ok_or_else(|| GameError::InvalidState("no age advance in progress".to_string()))?;
        let chapter = self
            .chronicle
            .record(Chapter::age_reached(age, summary));
        self.age = age;
        tracing::info!(age = %age, chapter, "Age reached");
        Ok(GameEvent::AgeReached { age, chapter })
    }

    /// Advance the age in one step with already-known lore.
    pub fn advance_age(&mut self, summary: impl Into<String>) -> Result<GameEvent> {
        self.begin_age_advance()?;
        self.complete_age_advance(summary)
    }

    /// Choose the empire's path.
    pub fn choose_alignment(&mut self, alignment: Alignment) -> GameEvent {
        self.alignment = alignment;
        GameEvent::AlignmentChosen { alignment }
    }

    /// Move one villager between jobs.
    pub fn assign_villager(&mut self, from: Job, to: Job) -> Result<GameEvent> {
        if !self.villagers.reassign(from, to) {
            return Err(GameError::NoVillagers(from));
        }
        Ok(GameEvent::VillagerReassigned { from, to })
    }

    /// Add [`TREASURY_GRANT`] gold.
    pub fn grant_gold(&mut self) -> GameEvent {
        self.resources.add_gold(Amount::whole(TREASURY_GRANT));
        GameEvent::TreasuryGrant {
            amount: TREASURY_GRANT,
        }
    }

    /// Replace the stockpiles outright. Meant for scenarios and tests.
    pub fn set_resources(&mut self, resources: Resources) {
        self.resources = resources;
    }

    /// Append a sovereign message and mark the advisor busy.
    ///
    /// Blank text is rejected, as is a new message while a reply is
    /// outstanding.
    pub fn post_user_message(&mut self, text: &str) -> Result<ChatRequest> {
        if text.trim().is_empty() {
            return Err(GameError::EmptyMessage);
        }
        if self.advisor_busy {
            return Err(GameError::AdvisorBusy);
        }
        let history = self.transcript.messages().to_vec();
        self.transcript.push(Message::user(text));
        self.advisor_busy = true;
        Ok(ChatRequest {
            history,
            message: text.to_string(),
        })
    }

    /// Append the advisor's reply and clear the busy flag.
    pub fn record_advisor_reply(&mut self, text: impl Into<String>) -> GameEvent {
        self.transcript.push(Message::model(text));
        self.advisor_busy = false;
        GameEvent::AdvisorReplied
    }

    /// Give the hero a new title.
    pub fn set_hero_title(&mut self, title: impl Into<String>) -> GameEvent {
        self.hero_title = title.into();
        GameEvent::HeroTitled {
            title: self.hero_title.clone(),
        }
    }

    /// Put an artifact in the vault.
    pub fn store_artifact(&mut self, artifact: Artifact) -> GameEvent {
        let artifact = artifact.normalized();
        self.artifacts.push(artifact.clone());
        GameEvent::ArtifactDiscovered { artifact }
    }

    /// Replace the active world event.
    pub fn begin_world_event(&mut self, world_event: WorldEvent) -> GameEvent {
        self.world_event = Some(world_event.clone());
        GameEvent::WorldEventBegan { world_event }
    }

    // =========================================================================
    // Determinism
    // =========================================================================

    /// Hash of all gameplay state.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.resources.hash(&mut hasher);
        self.villagers.hash(&mut hasher);
        self.buildings.hash(&mut hasher);
        self.roster.hash(&mut hasher);
        self.age.hash(&mut hasher);
        self.alignment.hash(&mut hasher);
        self.battles.hash(&mut hasher);
        self.hero_title.hash(&mut hasher);
        self.chronicle.hash(&mut hasher);
        self.transcript.hash(&mut hasher);
        self.artifacts.hash(&mut hasher);
        self.world_event.hash(&mut hasher);
        self.cycles.hash(&mut hasher);
        self.pending_age.hash(&mut hasher);
        self.advisor_busy.hash(&mut hasher);
        hasher.finish()
    }
}
