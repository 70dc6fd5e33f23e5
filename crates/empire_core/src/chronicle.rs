//! The imperial chronicle and the hero's title.
//!
//! The chronicle is append-only: chapters can be added and read, never
//! edited or removed.

use serde::{Deserialize, Serialize};

use crate::age::Age;

/// Title shown before any saga has been written.
pub const STARTING_HERO_TITLE: &str = "The Humble Warden";

/// A hero title is rewritten after every this many victories.
pub const SAGA_INTERVAL: u32 = 3;

/// One entry in the chronicle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chapter {
    /// Heading.
    pub title: String,
    /// Narrative text.
    pub summary: String,
    /// What was achieved.
    pub milestone: String,
}

impl Chapter {
    /// The chapter every empire starts with.
    #[must_use]
    pub fn founding() -> Self {
        Self {
            title: "The Ash Beginnings".to_string(),
            summary: "Out of the ruins of the old world, a small settlement finds its footing."
                .to_string(),
            milestone: "Founded the first Town Center.".to_string(),
        }
    }

    /// The chapter recorded when the empire enters `age`.
    #[must_use]
    pub fn age_reached(age: Age, summary: impl Into<String>) -> Self {
        Self {
            title: format!("The {} Rising", age.name()),
            summary: summary.into(),
            milestone: format!("Advanced to the {}.", age.name()),
        }
    }
}

/// Append-only ordered log of chapters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chronicle {
    chapters: Vec<Chapter>,
}

impl Default for Chronicle {
    fn default() -> Self {
        Self {
            chapters: vec![Chapter::founding()],
        }
    }
}

impl Chronicle {
    /// Append a chapter. Returns its 1-based chapter number.
    pub fn record(&mut self, chapter: Chapter) -> usize {
        self.chapters.push(chapter);
        self.chapters.len()
    }

    /// All chapters, oldest first.
    #[must_use]
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// The most recent chapter.
    #[must_use]
    pub fn latest(&self) -> Option<&Chapter> {
        self.chapters.last()
    }

    /// Number of chapters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    /// Check if the chronicle is empty. Never true for a default chronicle.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }
}

/// Whether a victory should trigger a new hero title.
///
/// `battles_before` is the battle counter before the victory is counted.
#[must_use]
pub const fn saga_due(battles_before: u32) -> bool {
    battles_before % SAGA_INTERVAL == 0
}
