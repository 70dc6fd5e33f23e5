//! Prompt template rendering via `minijinja`.
//!
//! Templates are embedded at compile time from the crate's `templates/`
//! directory.

use minijinja::{context, Environment};

use empire_core::age::{Age, Alignment};
use empire_core::relics::{MAX_BONUS, MIN_BONUS};

use crate::error::AdvisorError;

const TEMPLATES: [(&str, &str); 5] = [
    ("lore", include_str!("../templates/lore.j2")),
    ("saga", include_str!("../templates/saga.j2")),
    ("artifact", include_str!("../templates/artifact.j2")),
    ("world_event", include_str!("../templates/world_event.j2")),
    ("vizier", include_str!("../templates/vizier.j2")),
];

/// Renders every advisor prompt.
pub struct PromptEngine {
    env: Environment<'static>,
}

impl std::fmt::Debug for PromptEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptEngine").finish_non_exhaustive()
    }
}

impl PromptEngine {
    /// Load the embedded templates.
    pub fn new() -> Result<Self, AdvisorError> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)
                .map_err(|e| AdvisorError::Template(format!("failed to add {name} template: {e}")))?;
        }
        Ok(Self { env })
    }

    fn render(&self, name: &str, ctx: minijinja::Value) -> Result<String, AdvisorError> {
        let text = self
            .env
            .get_template(name)
            .map_err(|e| AdvisorError::Template(format!("missing {name} template: {e}")))?
            .render(ctx)
            .map_err(|e| AdvisorError::Template(format!("{name} render failed: {e}")))?;
        Ok(text.trim().to_owned())
    }

    /// Chapter introduction for a newly reached age.
    pub fn lore(&self, age: Age, alignment: Alignment) -> Result<String, AdvisorError> {
        self.render(
            "lore",
            context! { age => age.name(), alignment => alignment.name() },
        )
    }

    /// Hero title request.
    pub fn saga(&self, level: u32, battles: u32) -> Result<String, AdvisorError> {
        self.render("saga", context! { level, battles })
    }

    /// Artifact request.
    pub fn artifact(&self) -> Result<String, AdvisorError> {
        self.render(
            "artifact",
            context! { min_bonus => MIN_BONUS, max_bonus => MAX_BONUS },
        )
    }

    /// World event request.
    pub fn world_event(&self) -> Result<String, AdvisorError> {
        self.render("world_event", context! {})
    }

    /// Grand Vizier system instruction.
    pub fn vizier(&self, alignment: Option<Alignment>) -> Result<String, AdvisorError> {
        self.render(
            "vizier",
            context! { alignment => alignment.map(Alignment::name) },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lore_prompt_names_age_and_path() {
        let engine = PromptEngine::new().unwrap();
        let prompt = engine.lore(Age::Feudal, Alignment::Conqueror).unwrap();
        assert_eq!(
            prompt,
            "Write a short, epic intro for a new chapter in an empire's history called \
             \"The Feudal Age Era\". The empire follows a Conqueror path. Limit to 3 sentences."
        );
    }

    #[test]
    fn saga_prompt_names_level_and_battles() {
        let engine = PromptEngine::new().unwrap();
        let prompt = engine.saga(2, 4).unwrap();
        assert!(prompt.contains("Level 2 hero"));
        assert!(prompt.contains("won 4 battles"));
    }

    #[test]
    fn artifact_prompt_carries_bonus_range() {
        let engine = PromptEngine::new().unwrap();
        assert!(engine.artifact().unwrap().contains("(5-50)"));
    }

    #[test]
    fn vizier_mentions_path_only_when_known() {
        let engine = PromptEngine::new().unwrap();
        let bare = engine.vizier(None).unwrap();
        assert!(bare.starts_with("You are the Grand Vizier."));
        assert!(!bare.contains("path."));

        let conqueror = engine.vizier(Some(Alignment::Conqueror)).unwrap();
        assert!(conqueror.ends_with("The player follows the Conqueror path."));
    }
}
