//! The Grand Vizier.
//!
//! Every operation returns usable text even when the model is unreachable:
//! failures are logged and replaced by a fixed fallback.

use empire_core::age::{Age, Alignment};
use empire_core::chat::Message;
use empire_core::relics::{Artifact, BonusType, Rarity, WorldEvent};
use serde::de::DeserializeOwned;

use crate::backend::{AdvisorBackend, Completion};
use crate::config::AdvisorConfig;
use crate::error::AdvisorError;
use crate::prompts::PromptEngine;

/// Chapter text used when no lore could be generated.
pub const FALLBACK_LORE: &str = "A new era begins under the shadow of the old world.";

/// Hero title used when no saga could be generated.
pub const FALLBACK_SAGA: &str = "The Undefeated Guardian of the Realm.";

/// Advisor reply used when the model cannot answer.
pub const FALLBACK_CHAT: &str = "The stars are obscured, my liege. I cannot see the path clearly.";

/// Artifact stored when none could be generated.
pub fn fallback_artifact() -> Artifact {
    Artifact {
        name: "Ancient Relic".to_owned(),
        description: "Unknown origin.".to_owned(),
        rarity: Rarity::Common,
        bonus_type: BonusType::Power,
        bonus_value: 5,
    }
}

/// World event used when none could be generated.
pub fn fallback_world_event() -> WorldEvent {
    WorldEvent {
        name: "Quiet Peace".to_owned(),
        effect: "No active modifiers.".to_owned(),
    }
}

/// Narrative text source for the empire.
#[derive(Debug)]
pub struct Advisor {
    backend: AdvisorBackend,
    prompts: PromptEngine,
}

impl Advisor {
    /// Create an advisor over an explicit backend.
    pub fn new(backend: AdvisorBackend) -> Result<Self, AdvisorError> {
        Ok(Self {
            backend,
            prompts: PromptEngine::new()?,
        })
    }

    /// Create an advisor from configuration.
    pub fn from_config(config: &AdvisorConfig) -> Result<Self, AdvisorError> {
        Self::new(AdvisorBackend::from_config(config)?)
    }

    /// An advisor that always answers with fallbacks.
    pub fn offline() -> Result<Self, AdvisorError> {
        Self::new(AdvisorBackend::Offline)
    }

    /// Name of the backend in use.
    pub const fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Introductory text for the chapter recorded on entering `age`.
    pub async fn chapter_lore(&self, age: Age, alignment: Alignment) -> String {
        let result = match self.prompts.lore(age, alignment) {
            Ok(prompt) => self.ask_text(&Completion::text(prompt)).await,
            Err(e) => Err(e),
        };
        or_fallback("chapter_lore", result, || FALLBACK_LORE.to_owned())
    }

    /// A legendary title for a hero of `level` with `battles` victories.
    pub async fn hero_saga(&self, level: u32, battles: u32) -> String {
        let result = match self.prompts.saga(level, battles) {
            Ok(prompt) => self.ask_text(&Completion::text(prompt)).await,
            Err(e) => Err(e),
        };
        or_fallback("hero_saga", result, || FALLBACK_SAGA.to_owned())
    }

    /// A freshly discovered artifact, bonus clamped to its allowed range.
    pub async fn discover_artifact(&self) -> Artifact {
        let result = match self.prompts.artifact() {
            Ok(prompt) => {
                self.ask_json::<Artifact>(&Completion::json(prompt, artifact_schema()))
                    .await
            }
            Err(e) => Err(e),
        };
        or_fallback("discover_artifact", result, fallback_artifact).normalized()
    }

    /// A new world event.
    pub async fn world_event(&self) -> WorldEvent {
        let result = match self.prompts.world_event() {
            Ok(prompt) => {
                self.ask_json::<WorldEvent>(&Completion::json(prompt, world_event_schema()))
                    .await
            }
            Err(e) => Err(e),
        };
        or_fallback("world_event", result, fallback_world_event)
    }

    /// The Grand Vizier's reply to `message`, given the earlier transcript.
    pub async fn chat(&self, history: &[Message], message: &str, alignment: Alignment) -> String {
        let result = match self.prompts.vizier(Some(alignment)) {
            Ok(system) => {
                let request = Completion {
                    system: Some(system),
                    history: history.to_vec(),
                    prompt: message.to_owned(),
                    schema: None,
                };
                self.ask_text(&request).await
            }
            Err(e) => Err(e),
        };
        or_fallback("chat", result, || FALLBACK_CHAT.to_owned())
    }

    async fn ask_text(&self, request: &Completion) -> Result<String, AdvisorError> {
        let text = self.backend.complete(request).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(AdvisorError::MissingContent("reply text"));
        }
        Ok(text.to_owned())
    }

    async fn ask_json<T: DeserializeOwned>(&self, request: &Completion) -> Result<T, AdvisorError> {
        let text = self.ask_text(request).await?;
        let json = extract_json_from_codeblock(&text).unwrap_or(&text);
        serde_json::from_str(json).map_err(|e| AdvisorError::Parse(e.to_string()))
    }
}

fn or_fallback<T>(
    operation: &'static str,
    result: Result<T, AdvisorError>,
    fallback: impl FnOnce() -> T,
) -> T {
    match result {
        Ok(value) => value,
        Err(e) if e.is_offline() => {
            tracing::debug!(operation, "Advisor offline, using fallback");
            fallback()
        }
        Err(e) => {
            tracing::warn!(operation, error = %e, "Advisor request failed, using fallback");
            fallback()
        }
    }
}

/// Extract JSON from a markdown code block.
fn extract_json_from_codeblock(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_fence = text.get(open + 3..)?;
    let body_start = after_fence.find('\n').map_or(0, |nl| nl + 1);
    let body = after_fence.get(body_start..)?;
    let end = body.find("```")?;
    body.get(..end).map(str::trim)
}

fn artifact_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "description": { "type": "STRING" },
            "rarity": { "type": "STRING", "enum": ["Common", "Rare", "Legendary"] },
            "bonusType": { "type": "STRING", "enum": ["Income", "Power", "Defense"] },
            "bonusValue": { "type": "NUMBER" }
        },
        "required": ["name", "description", "rarity", "bonusType", "bonusValue"]
    })
}

fn world_event_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "effect": { "type": "STRING" }
        },
        "required": ["name", "effect"]
    })
}
