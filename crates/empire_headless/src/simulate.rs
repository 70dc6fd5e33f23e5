//! Scripted, clock-free simulation.
//!
//! Runs a list of commands in order, answering every advisor job inline
//! before the next command, then credits a number of production cycles.
//! With a scripted or offline advisor the output is fully reproducible.

use std::path::Path;

use empire_advisor::Advisor;

use crate::error::SessionError;
use crate::protocol::{Command, Response};
use crate::session::Session;

/// Parse a script: one JSON command per line. Blank lines and lines
/// starting with `#` are skipped.
pub fn parse_script(source: &str) -> Result<Vec<Command>, SessionError> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| {
            Command::from_json(line.trim()).map_err(|e| SessionError::ScriptParse {
                line: i + 1,
                message: e.to_string(),
            })
        })
        .collect()
}

/// Read and parse a script file.
pub fn load_script(path: &Path) -> Result<Vec<Command>, SessionError> {
    let source = std::fs::read_to_string(path).map_err(|source| SessionError::ScriptRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&source)
}

/// Run `script`, then `cycles` production cycles, and return every response
/// in order, ending with a state snapshot.
pub async fn simulate(
    session: &mut Session,
    advisor: &Advisor,
    script: &[Command],
    cycles: u64,
) -> Vec<Response> {
    let mut responses = Vec::new();

    for cmd in script {
        let outcome = session.handle(cmd.clone());
        responses.extend(outcome.responses);
        for job in outcome.jobs {
            let reply = job.run(advisor).await;
            responses.extend(session.apply_reply(reply));
        }
        if outcome.quit {
            tracing::debug!("Script quit early");
            break;
        }
    }

    for _ in 0..cycles {
        responses.extend(session.production_cycle());
    }

    tracing::info!(
        commands = script.len(),
        cycles,
        total_cycles = session.state().cycles(),
        "Simulation finished"
    );
    responses.push(Response::state(session.state()));
    responses
}
