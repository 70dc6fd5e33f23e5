//! JSON protocol for headless play.
//!
//! The runner communicates via JSON lines (one JSON object per line):
//!
//! **Input (stdin):** Commands from the sovereign
//! **Output (stdout):** Notices, acknowledgments and state snapshots
//!
//! # Protocol Flow
//!
//! 1. Runner starts, outputs `{"type":"ready",...}`
//! 2. The controller sends commands as JSON lines
//! 3. Production cycles run on a timer; the runner outputs state on `query`
//!    (or after every cycle with `--auto-state`)
//! 4. Advisor answers arrive later as `notice` lines
//! 5. On `quit` or end of input, outputs `{"type":"bye"}`
//!
//! # Example Session
//!
//! ```text
//! <- {"type":"ready","version":"1.0","cycle":0,"advisor":"offline"}
//! -> {"cmd":"train","unit":"knight"}
//! <- {"type":"notice","message":"Trained Knight (1 total)","event":{...}}
//! -> {"cmd":"battle","target":"Barbarian Camp"}
//! <- {"type":"notice","message":"Retreat from Barbarian Camp: 265 more power needed",...}
//! -> {"cmd":"advance_age"}
//! <- {"type":"ack","cmd":"advance_age"}
//! <- {"type":"notice","message":"EPOCH REACHED: Feudal Age",...}
//! -> {"cmd":"query"}
//! <- {"type":"state","cycle":3,...}
//! ```

use serde::{Deserialize, Serialize};

use empire_core::age::{Age, Alignment};
use empire_core::chat::Message;
use empire_core::chronicle::Chapter;
use empire_core::combat::Target;
use empire_core::relics::{Artifact, WorldEvent};
use empire_core::resources::Resources;
use empire_core::state::{GameEvent, GameState};
use empire_core::units::UnitEntry;
use empire_core::villagers::{Job, VillagerAssignment};

/// Protocol version reported in `ready`.
pub const PROTOCOL_VERSION: &str = "1.0";

// ============================================================================
// Input Commands (controller -> runner)
// ============================================================================

/// Commands that can be sent to the runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    /// Credit N production cycles immediately (default: 1).
    Tick {
        #[serde(default = "default_tick_count")]
        count: u32,
    },

    /// Query current state without advancing time.
    Query,

    /// Train one unit, by case-insensitive name.
    Train { unit: String },

    /// Attack a target, by case-insensitive name.
    Battle { target: String },

    /// Advance to the next age.
    AdvanceAge,

    /// Choose the empire's path.
    Align { alignment: Alignment },

    /// Move one villager between jobs.
    Assign { from: Job, to: Job },

    /// Treasury grant.
    Grant,

    /// Send a message to the Grand Vizier.
    Chat { message: String },

    /// Ask the advisor for an artifact.
    Discover,

    /// Ask the advisor for a world event.
    WorldEvent,

    /// Report the state hash (for determinism verification).
    Hash,

    /// Quit the session.
    Quit,
}

fn default_tick_count() -> u32 {
    1
}

// ============================================================================
// Output Responses (runner -> controller)
// ============================================================================

/// Responses sent from the runner.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// Runner is ready to accept commands.
    Ready {
        version: String,
        cycle: u64,
        advisor: String,
    },

    /// Acknowledgment of a command whose effect arrives later.
    Ack { cmd: String },

    /// Something happened to the empire.
    Notice { message: String, event: GameEvent },

    /// A command was rejected or could not be parsed.
    Error {
        message: String,
        cmd: Option<String>,
    },

    /// Full state snapshot.
    State(Box<StateSnapshot>),

    /// State hash for determinism verification.
    StateHash { cycle: u64, hash: u64 },

    /// Goodbye message before shutdown.
    Bye,
}

// ============================================================================
// State Types
// ============================================================================

/// Whole-unit view of stockpiles, floored for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceState {
    pub gold: i64,
    pub wood: i64,
    pub stone: i64,
}

impl From<&Resources> for ResourceState {
    fn from(r: &Resources) -> Self {
        Self {
            gold: r.gold.floor(),
            wood: r.wood.floor(),
            stone: r.stone.floor(),
        }
    }
}

/// Per-cycle yield, with one decimal where fractional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldState {
    pub gold: String,
    pub wood: String,
    pub stone: String,
}

impl From<&Resources> for YieldState {
    fn from(r: &Resources) -> Self {
        Self {
            gold: r.gold.to_string(),
            wood: r.wood.to_string(),
            stone: r.stone.to_string(),
        }
    }
}

/// Everything a front-end needs to draw the empire.
#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
    pub cycle: u64,
    pub age: Age,
    pub age_name: String,
    pub pending_age: Option<Age>,
    pub alignment: Alignment,
    pub resources: ResourceState,
    pub production: YieldState,
    pub villagers: VillagerAssignment,
    pub villagers_consistent: bool,
    pub units: Vec<UnitEntry>,
    pub power: u64,
    pub battles: u32,
    pub hero_title: String,
    pub targets: Vec<Target>,
    pub chronicle: Vec<Chapter>,
    pub transcript: Vec<Message>,
    pub advisor_busy: bool,
    pub artifacts: Vec<Artifact>,
    pub world_event: Option<WorldEvent>,
    pub hash: u64,
}

impl StateSnapshot {
    /// Capture the current state.
    pub fn capture(state: &GameState) -> Self {
        Self {
            cycle: state.cycles(),
            age: state.age(),
            age_name: state.age().name().to_string(),
            pending_age: state.pending_age(),
            alignment: state.alignment(),
            resources: ResourceState::from(state.resources()),
            production: YieldState::from(&state.production()),
            villagers: *state.villagers(),
            villagers_consistent: state.villagers_consistent(),
            units: state.roster().entries().to_vec(),
            power: state.total_power(),
            battles: state.battles(),
            hero_title: state.hero_title().to_string(),
            targets: state.targets(),
            chronicle: state.chronicle().chapters().to_vec(),
            transcript: state.transcript().messages().to_vec(),
            advisor_busy: state.advisor_busy(),
            artifacts: state.artifacts().to_vec(),
            world_event: state.world_event().cloned(),
            hash: state.state_hash(),
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

impl Response {
    /// Create a ready response.
    pub fn ready(cycle: u64, advisor: &str) -> Self {
        Self::Ready {
            version: PROTOCOL_VERSION.to_string(),
            cycle,
            advisor: advisor.to_string(),
        }
    }

    /// Create an acknowledgment.
    pub fn ack(cmd: &str) -> Self {
        Self::Ack {
            cmd: cmd.to_string(),
        }
    }

    /// Create a notice for an event.
    pub fn notice(event: GameEvent) -> Self {
        Self::Notice {
            message: describe(&event),
            event,
        }
    }

    /// Create an error response.
    pub fn error(message: impl Into<String>, cmd: Option<&str>) -> Self {
        Self::Error {
            message: message.into(),
            cmd: cmd.map(String::from),
        }
    }

    /// Create a state snapshot response.
    pub fn state(state: &GameState) -> Self {
        Self::State(Box::new(StateSnapshot::capture(state)))
    }

    /// Serialize to JSON line (with newline).
    pub fn to_json_line(&self) -> String {
        let mut json = serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"type":"error","message":"Serialization failed: {e}"}}"#)
        });
        json.push('\n');
        json
    }
}

impl Command {
    /// Parse from a JSON line.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Get command name for acknowledgment.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tick { .. } => "tick",
            Self::Query => "query",
            Self::Train { .. } => "train",
            Self::Battle { .. } => "battle",
            Self::AdvanceAge => "advance_age",
            Self::Align { .. } => "align",
            Self::Assign { .. } => "assign",
            Self::Grant => "grant",
            Self::Chat { .. } => "chat",
            Self::Discover => "discover",
            Self::WorldEvent => "world_event",
            Self::Hash => "hash",
            Self::Quit => "quit",
        }
    }
}

/// One-line description of an event, as shown to the player.
pub fn describe(event: &GameEvent) -> String {
    use empire_core::combat::BattleOutcome;

    match event {
        GameEvent::Produced { yield_ } => format!(
            "Production: +{} gold, +{} wood, +{} stone",
            yield_.gold, yield_.wood, yield_.stone
        ),
        GameEvent::Trained { kind, count } => format!("Trained {kind} ({count} total)"),
        GameEvent::Battle(report) => match report.outcome {
            BattleOutcome::Victory { plunder } => {
                format!("Victory at {}! +{plunder} gold", report.target)
            }
            BattleOutcome::Defeat { shortfall } => format!(
                "Retreat from {}: {shortfall} more power needed",
                report.target
            ),
        },
        GameEvent::AgeReached { age, .. } => format!("EPOCH REACHED: {age}"),
        GameEvent::AlignmentChosen { alignment } => format!("The empire walks the {alignment} path"),
        GameEvent::VillagerReassigned { from, to } => format!("A villager moves from {from} to {to}"),
        GameEvent::TreasuryGrant { amount } => format!("Treasury grants {amount} gold"),
        GameEvent::AdvisorReplied => "The Grand Vizier has spoken".to_string(),
        GameEvent::HeroTitled { title } => format!("Your hero is now known as {title}"),
        GameEvent::ArtifactDiscovered { artifact } => format!("Artifact found: {artifact}"),
        GameEvent::WorldEventBegan { world_event } => {
            format!("World event: {} ({})", world_event.name, world_event.effect)
        },
    }
}
