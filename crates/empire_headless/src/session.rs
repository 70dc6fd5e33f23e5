//! Command handling for one empire.
//!
//! A [`Session`] owns the [`GameState`] and turns protocol commands into
//! state changes and responses. Commands that need narrative text produce
//! [`AdvisorJob`]s; the caller runs them (concurrently in `play`, inline in
//! `simulate`) and feeds the resulting [`AdvisorReply`] back through
//! [`Session::apply_reply`].

use empire_advisor::Advisor;
use empire_core::age::Alignment;
use empire_core::error::GameError;
use empire_core::relics::{Artifact, WorldEvent};
use empire_core::state::{AgeAdvance, ChatRequest, GameEvent, GameState, SagaRequest};
use empire_core::units::UnitKind;

use crate::protocol::{Command, Response};

/// A request for narrative text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvisorJob {
    /// Lore for a reserved age advance.
    Lore(AgeAdvance),
    /// A new hero title.
    Saga(SagaRequest),
    /// A Grand Vizier reply.
    Chat {
        /// Transcript and message.
        request: ChatRequest,
        /// Alignment when the message was sent.
        alignment: Alignment,
    },
    /// A new artifact.
    Artifact,
    /// A new world event.
    WorldEvent,
}

impl AdvisorJob {
    /// Ask the advisor. Never fails; fallbacks are applied inside.
    pub async fn run(self, advisor: &Advisor) -> AdvisorReply {
        match self {
            Self::Lore(advance) => AdvisorReply::Lore(
                advisor
                    .chapter_lore(advance.next, advance.alignment)
                    .await,
            ),
            Self::Saga(saga) => {
                AdvisorReply::Saga(advisor.hero_saga(saga.level, saga.battles).await)
            }
            Self::Chat { request, alignment } => AdvisorReply::Chat(
                advisor
                    .chat(&request.history, &request.message, alignment)
                    .await,
            ),
            Self::Artifact => AdvisorReply::Artifact(advisor.discover_artifact().await),
            Self::WorldEvent => AdvisorReply::WorldEvent(advisor.world_event().await),
        }
    }
}

/// Narrative text returned by the advisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvisorReply {
    /// Chapter summary for the pending age.
    Lore(String),
    /// Hero title.
    Saga(String),
    /// Chat reply.
    Chat(String),
    /// Discovered artifact.
    Artifact(Artifact),
    /// New world event.
    WorldEvent(WorldEvent),
}

/// What handling a command produced.
#[derive(Debug, Default)]
pub struct Outcome {
    /// Lines to write, in order.
    pub responses: Vec<Response>,
    /// Advisor work to start.
    pub jobs: Vec<AdvisorJob>,
    /// The controller asked to quit.
    pub quit: bool,
}

impl Outcome {
    fn respond(response: Response) -> Self {
        Self {
            responses: vec![response],
            ..Self::default()
        }
    }

    fn rejected(err: &GameError, cmd: &Command) -> Self {
        tracing::debug!(cmd = cmd.name(), error = %err, "Command rejected");
        Self::respond(Response::error(err.to_string(), Some(cmd.name())))
    }
}

/// One empire and its command handling.
#[derive(Debug)]
pub struct Session {
    state: GameState,
    auto_state: bool,
}

impl Session {
    /// Wrap an existing state.
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            auto_state: false,
        }
    }

    /// Emit a state snapshot after every timed production cycle.
    pub fn with_auto_state(mut self, auto_state: bool) -> Self {
        self.auto_state = auto_state;
        self
    }

    /// The empire.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// One timed production cycle.
    pub fn production_cycle(&mut self) -> Vec<Response> {
        self.state.tick();
        if self.auto_state {
            vec![Response::state(&self.state)]
        } else {
            Vec::new()
        }
    }

    /// Handle one command.
    pub fn handle(&mut self, cmd: Command) -> Outcome {
        match &cmd {
            Command::Tick { count } => {
                for _ in 0..*count {
                    self.state.tick();
                }
                Outcome::respond(Response::state(&self.state))
            }
            Command::Query => Outcome::respond(Response::state(&self.state)),
            Command::Train { unit } => match unit.parse::<UnitKind>() {
                Ok(kind) => match self.state.train_unit(kind) {
                    Ok(event) => Outcome::respond(Response::notice(event)),
                    Err(e) => Outcome::rejected(&e, &cmd),
                },
                Err(message) => Outcome::respond(Response::error(message, Some(cmd.name()))),
            },
            Command::Battle { target } => match self.state.attack(target) {
                Ok(event) => self.battle_outcome(event),
                Err(e) => Outcome::rejected(&e, &cmd),
            },
            Command::AdvanceAge => match self.state.begin_age_advance() {
                Ok(advance) => Outcome {
                    responses: vec![Response::ack(cmd.name())],
                    jobs: vec![AdvisorJob::Lore(advance)],
                    quit: false,
                },
                Err(e) => Outcome::rejected(&e, &cmd),
            },
            Command::Align { alignment } => {
                Outcome::respond(Response::notice(self.state.choose_alignment(*alignment)))
            }
            Command::Assign { from, to } => match self.state.assign_villager(*from, *to) {
                Ok(event) => Outcome::respond(Response::notice(event)),
                Err(e) => Outcome::rejected(&e, &cmd),
            },
            Command::Grant => Outcome::respond(Response::notice(self.state.grant_gold())),
            Command::Chat { message } => match self.state.post_user_message(message) {
                Ok(request) => Outcome {
                    responses: vec![Response::ack(cmd.name())],
                    jobs: vec![AdvisorJob::Chat {
                        request,
                        alignment: self.state.alignment(),
                    }],
                    quit: false,
                },
                // Blank messages are ignored without complaint.
                Err(GameError::EmptyMessage) => Outcome::default(),
                Err(e) => Outcome::rejected(&e, &cmd),
            },
            Command::Discover => Outcome {
                responses: vec![Response::ack(cmd.name())],
                jobs: vec![AdvisorJob::Artifact],
                quit: false,
            },
            Command::WorldEvent => Outcome {
                responses: vec![Response::ack(cmd.name())],
                jobs: vec![AdvisorJob::WorldEvent],
                quit: false,
            },
            Command::Hash => Outcome::respond(Response::StateHash {
                cycle: self.state.cycles(),
                hash: self.state.state_hash(),
            }),
            Command::Quit => Outcome {
                quit: true,
                ..Outcome::default()
            },
        }
    }

    fn battle_outcome(&mut self, event: GameEvent) -> Outcome {
        let saga = match &event {
            GameEvent::Battle(report) => report.saga,
            _ => None,
        };
        Outcome {
            responses: vec![Response::notice(event)],
            jobs: saga.map(AdvisorJob::Saga).into_iter().collect(),
            quit: false,
        }
    }

    /// Apply narrative text that has arrived.
    pub fn apply_reply(&mut self, reply: AdvisorReply) -> Vec<Response> {
        let event = match reply {
            AdvisorReply::Lore(summary) => match self.state.complete_age_advance(summary) {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(error = %e, "Lore arrived without a pending age advance");
                    return vec![Response::error(e.to_string(), Some("advance_age"))];
                }
            },
            AdvisorReply::Saga(title) => self.state.set_hero_title(title),
            AdvisorReply::Chat(text) => self.state.record_advisor_reply(text),
            AdvisorReply::Artifact(artifact) => self.state.store_artifact(artifact),
            AdvisorReply::WorldEvent(event) => self.state.begin_world_event(event),
        };
        vec![Response::notice(event)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use empire_core::age::Age;
    use empire_core::villagers::Job;

    fn session() -> Session {
        Session::new(GameState::new().unwrap())
    }

    fn is_error(response: &Response) -> bool {
        matches!(response, Response::Error { .. })
    }

    #[test]
    fn train_by_lowercase_name() {
        let mut s = session();
        let out = s.handle(Command::Train {
            unit: "infantry".into(),
        });
        assert!(matches!(out.responses[0], Response::Notice { .. }));
        assert_eq!(s.state().roster().count(UnitKind::Infantry), 1);
    }

    #[test]
    fn unknown_unit_is_an_error() {
        let mut s = session();
        let out = s.handle(Command::Train {
            unit: "dragon".into(),
        });
        assert!(is_error(&out.responses[0]));
    }

    #[test]
    fn defeat_is_a_notice_not_an_error() {
        let mut s = session();
        let out = s.handle(Command::Battle {
            target: "Rival Kingdom".into(),
        });
        assert!(matches!(out.responses[0], Response::Notice { .. }));
        assert!(out.jobs.is_empty());
    }

    #[test]
    fn first_victory_requests_a_saga() {
        let mut s = session();
        s.handle(Command::Grant);
        for _ in 0..5 {
            s.handle(Command::Train {
                unit: "knight".into(),
            });
        }
        let out = s.handle(Command::Battle {
            target: "Ancient Grove".into(),
        });
        assert_eq!(
            out.jobs,
            vec![AdvisorJob::Saga(SagaRequest {
                level: 1,
                battles: 1
            })]
        );
        s.apply_reply(AdvisorReply::Saga("The Grove-Breaker".into()));
        assert_eq!(s.state().hero_title(), "The Grove-Breaker");
    }

    #[test]
    fn age_advance_waits_for_lore() {
        let mut s = session();
        let out = s.handle(Command::AdvanceAge);
        assert!(matches!(out.jobs[0], AdvisorJob::Lore(_)));
        assert_eq!(s.state().age(), Age::Dark);

        let again = s.handle(Command::AdvanceAge);
        assert!(is_error(&again.responses[0]));

        s.apply_reply(AdvisorReply::Lore("Banners rise.".into()));
        assert_eq!(s.state().age(), Age::Feudal);
        assert_eq!(s.state().chronicle().len(), 2);
    }

    #[test]
    fn stray_lore_is_reported() {
        let mut s = session();
        let responses = s.apply_reply(AdvisorReply::Lore("x".into()));
        assert!(is_error(&responses[0]));
    }

    #[test]
    fn blank_chat_is_silently_ignored() {
        let mut s = session();
        let out = s.handle(Command::Chat {
            message: "  ".into(),
        });
        assert!(out.responses.is_empty());
        assert!(out.jobs.is_empty());
    }

    #[test]
    fn chat_while_busy_is_rejected() {
        let mut s = session();
        let first = s.handle(Command::Chat {
            message: "Counsel me".into(),
        });
        assert_eq!(first.jobs.len(), 1);
        let second = s.handle(Command::Chat {
            message: "Well?".into(),
        });
        assert!(is_error(&second.responses[0]));

        s.apply_reply(AdvisorReply::Chat("Patience.".into()));
        assert!(!s.state().advisor_busy());
    }

    #[test]
    fn assign_from_empty_job_is_an_error() {
        let mut s = session();
        let out = s.handle(Command::Assign {
            from: Job::Stone,
            to: Job::Gold,
        });
        assert!(is_error(&out.responses[0]));
    }

    #[test]
    fn auto_state_emits_snapshot_per_cycle() {
        let mut s = session().with_auto_state(true);
        assert_eq!(s.production_cycle().len(), 1);
        let mut quiet = session();
        assert!(quiet.production_cycle().is_empty());
    }

    #[test]
    fn quit_sets_flag() {
        assert!(session().handle(Command::Quit).quit);
    }
}
