//! Error types for the empire state layer.
//!
//! Every variant describes a rejected action. A rejected action never
//! mutates the [`GameState`](crate::state::GameState).

use thiserror::Error;

use crate::resources::ResourceKind;
use crate::units::UnitKind;
use crate::villagers::Job;

/// Result type alias using [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;

/// Top-level error type for all empire actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Data file parsing error.
    #[error("Failed to parse data file '{path}': {message}")]
    DataParseError {
        /// Name of the data file that failed to parse.
        path: String,
        /// Error message.
        message: String,
    },

    /// A data file parsed but describes an impossible roster.
    #[error("Invalid data in '{path}': {message}")]
    InvalidData {
        /// Name of the offending data file.
        path: String,
        /// What is wrong with it.
        message: String,
    },

    /// Insufficient resources.
    #[error("Insufficient resources to train {unit}: need {required} {resource}, have {available}")]
    InsufficientResources {
        /// Unit that was requested.
        unit: UnitKind,
        /// Resource type that fell short.
        resource: ResourceKind,
        /// Amount required (whole units).
        required: i64,
        /// Amount available (whole units, floored).
        available: i64,
    },

    /// An action arrived in a state that cannot accept it.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// No battle target with the given name exists.
    #[error("Unknown battle target: {0}")]
    UnknownTarget(String),

    /// The empire is already in its final age.
    #[error("Already in the final age: {0}")]
    FinalAge(String),

    /// An age advance is already waiting for its chronicle entry.
    #[error("An age advance is already in progress")]
    AgeAdvancePending,

    /// A villager move was requested from an empty job.
    #[error("No villagers assigned to {0}")]
    NoVillagers(Job),

    /// The advisor has not finished the previous reply.
    #[error("The advisor is still composing a reply")]
    AdvisorBusy,

    /// Chat text was empty or whitespace.
    #[error("Message is empty")]
    EmptyMessage,
}
