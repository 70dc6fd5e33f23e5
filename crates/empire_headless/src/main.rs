//! Headless Empire Sovereign.
//!
//! This binary runs the game without graphics, controlled via JSON on
//! stdin/stdout.
//!
//! # Usage
//!
//! ```bash
//! # Interactive play (default)
//! cargo run -p empire_headless -- play
//!
//! # Scripted simulation
//! cargo run -p empire_headless -- simulate --cycles 50 --script scripts/opening.jsonl
//! ```
//!
//! # Environment
//!
//! `ADVISOR_API_KEY` (or `API_KEY`), `ADVISOR_API_URL`, `ADVISOR_MODEL` and
//! `ADVISOR_TIMEOUT_SECS` configure the advisor. Without a key it runs
//! offline. `RUST_LOG` overrides the log filter.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use empire_advisor::{Advisor, AdvisorConfig};
use empire_core::state::GameState;
use empire_headless::{
    runner::{HeadlessRunner, PlayConfig, DEFAULT_TICK_MS},
    simulate::{load_script, simulate},
    Session, SessionError,
};

#[derive(Parser)]
#[command(name = "empire")]
#[command(about = "Headless Empire Sovereign - idle empire game over JSON lines")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Ignore advisor configuration and always use fallback texts
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively, reading commands from stdin
    Play {
        /// Milliseconds between production cycles
        #[arg(long, default_value_t = DEFAULT_TICK_MS)]
        tick_ms: u64,

        /// Output state after every production cycle
        #[arg(long)]
        auto_state: bool,
    },

    /// Run a command script, then N production cycles, without a clock
    Simulate {
        /// Production cycles to run after the script
        #[arg(short, long, default_value = "10")]
        cycles: u64,

        /// JSON-lines command script
        #[arg(short, long)]
        script: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging to stderr (stdout is for protocol)
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(filter)
        .init();

    let advisor = build_advisor(cli.offline)?;
    let session = Session::new(GameState::new().map_err(SessionError::from)?);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match cli.command {
        Some(Commands::Play {
            tick_ms,
            auto_state,
        }) => runtime.block_on(cmd_play(
            session,
            advisor,
            PlayConfig::from_tick_ms(tick_ms),
            auto_state,
        ))?,
        Some(Commands::Simulate { cycles, script }) => {
            runtime.block_on(cmd_simulate(session, &advisor, cycles, script))?;
        }
        None => runtime.block_on(cmd_play(session, advisor, PlayConfig::default(), false))?,
    }

    Ok(())
}

fn build_advisor(offline: bool) -> Result<Advisor, SessionError> {
    let config = if offline {
        AdvisorConfig::offline()
    } else {
        AdvisorConfig::from_env()?
    };
    if !config.is_online() {
        tracing::info!("No advisor API key configured; the Grand Vizier speaks only in fallbacks");
    }
    Ok(Advisor::from_config(&config)?)
}

/// Run an interactive session on stdin/stdout
async fn cmd_play(
    session: Session,
    advisor: Advisor,
    config: PlayConfig,
    auto_state: bool,
) -> Result<(), SessionError> {
    let runner = HeadlessRunner::new(session.with_auto_state(auto_state), advisor, config);
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    runner.run(input, tokio::io::stdout()).await?;
    Ok(())
}

/// Run a script and print every response
async fn cmd_simulate(
    mut session: Session,
    advisor: &Advisor,
    cycles: u64,
    script: Option<PathBuf>,
) -> Result<(), SessionError> {
    let commands = match script {
        Some(path) => load_script(&path)?,
        None => Vec::new(),
    };

    let responses = simulate(&mut session, advisor, &commands, cycles).await;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for response in &responses {
        out.write_all(response.to_json_line().as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use empire_headless::runner::DEFAULT_CYCLE;

    #[test]
    fn play_defaults_to_runner_cycle() {
        let cli = Cli::try_parse_from(["empire", "play"]).expect("valid args");
        match cli.command {
            Some(Commands::Play { tick_ms, auto_state }) => {
                assert_eq!(PlayConfig::from_tick_ms(tick_ms).cycle, DEFAULT_CYCLE);
                assert!(!auto_state);
            }
            _ => panic!("expected play"),
        }
        assert_eq!(PlayConfig::default().cycle, DEFAULT_CYCLE);
    }

    #[test]
    fn zero_tick_is_raised_to_one_millisecond() {
        assert_eq!(PlayConfig::from_tick_ms(0).cycle.as_millis(), 1);
    }
}
