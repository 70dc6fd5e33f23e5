//! Headless Empire Sovereign runner.
//!
//! This crate drives an empire from JSON commands on stdin, with responses
//! on stdout. This enables:
//!
//! - **Play**: a front-end (or a person with a terminal) sends commands
//!   while production ticks on a timer
//! - **Simulation**: scripted, clock-free runs for testing and balancing
//!
//! # Protocol
//!
//! Communication uses JSON lines (one JSON object per line):
//!
//! - **stdin**: Commands from the controller (train, battle, chat, etc.)
//! - **stdout**: Notices, snapshots and acknowledgments (JSON)
//! - **stderr**: Logs (human-readable)
//!
//! See [`protocol`] module for the full command/response format.
//!
//! # Example
//!
//! ```bash
//! # Play with the offline advisor, one production cycle per second
//! cargo run -p empire_headless -- play --offline --tick-ms 1000
//!
//! # Run a script and 100 production cycles
//! cargo run -p empire_headless -- simulate --script scripts/opening.jsonl --cycles 100
//! ```

pub mod error;
pub mod protocol;
pub mod runner;
pub mod session;
pub mod simulate;

pub use error::SessionError;
pub use protocol::{Command, Response};
pub use runner::{HeadlessRunner, PlayConfig};
pub use session::Session;
