//! # Empire Advisor
//!
//! Narrative text for Empire Sovereign from a generative model: chapter
//! lore, hero sagas, artifacts, world events and the Grand Vizier's chat.
//!
//! Every [`Advisor`] operation is infallible from the caller's side. When
//! the model is unreachable, misconfigured or returns nothing usable, the
//! failure is logged at `warn` and a fixed fallback text is returned.
//!
//! ## Crate Structure
//!
//! - [`advisor`] - The [`Advisor`] facade and fallback texts
//! - [`backend`] - Gemini, scripted and offline backends
//! - [`config`] - Environment configuration
//! - [`prompts`] - Embedded `minijinja` templates

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod advisor;
pub mod backend;
pub mod config;
pub mod error;
pub mod prompts;

pub use advisor::{
    fallback_artifact, fallback_world_event, Advisor, FALLBACK_CHAT, FALLBACK_LORE, FALLBACK_SAGA,
};
pub use backend::{AdvisorBackend, ScriptedBackend};
pub use config::AdvisorConfig;
pub use error::AdvisorError;
