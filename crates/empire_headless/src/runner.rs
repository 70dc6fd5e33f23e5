//! Interactive play loop.
//!
//! A single-threaded event loop owns the [`Session`] and multiplexes three
//! sources: the production timer, command lines, and finished advisor jobs.
//! Advisor jobs run as spawned tasks, so production keeps ticking while the
//! model is thinking.

use std::sync::Arc;
use std::time::Duration;

use empire_advisor::Advisor;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::error::SessionError;
use crate::protocol::{Command, Response};
use crate::session::{AdvisorJob, AdvisorReply, Session};

/// Default production interval in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 4000;

/// Default production interval.
pub const DEFAULT_CYCLE: Duration = Duration::from_millis(DEFAULT_TICK_MS);

/// Play loop configuration.
#[derive(Debug, Clone)]
pub struct PlayConfig {
    /// Time between production cycles.
    pub cycle: Duration,
}

impl PlayConfig {
    /// Configuration with the given cycle length, never shorter than 1 ms.
    #[must_use]
    pub fn from_tick_ms(tick_ms: u64) -> Self {
        Self {
            cycle: Duration::from_millis(tick_ms.max(1)),
        }
    }
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            cycle: DEFAULT_CYCLE,
        }
    }
}

/// Headless runner for interactive play.
pub struct HeadlessRunner {
    session: Session,
    advisor: Arc<Advisor>,
    config: PlayConfig,
}

impl HeadlessRunner {
    /// Create a runner.
    pub fn new(session: Session, advisor: Advisor, config: PlayConfig) -> Self {
        Self {
            session,
            advisor: Arc::new(advisor),
            config,
        }
    }

    /// Run until `quit` or end of input, then return the final session.
    ///
    /// On end of input, outstanding advisor jobs are awaited first so their
    /// answers are still applied.
    pub async fn run<R, W>(mut self, input: R, mut output: W) -> Result<Session, SessionError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let (reply_tx, mut reply_rx) = mpsc::unbounded_channel::<AdvisorReply>();
        let mut in_flight: usize = 0;
        let mut input_open = true;

        let mut timer = tokio::time::interval_at(
            tokio::time::Instant::now() + self.config.cycle,
            self.config.cycle,
        );
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut lines = input.lines();

        write_all(
            &mut output,
            &[Response::ready(
                self.session.state().cycles(),
                self.advisor.backend_name(),
            )],
        )
        .await?;
        tracing::info!(
            cycle = ?self.config.cycle,
            advisor = self.advisor.backend_name(),
            "Session started"
        );

        loop {
            let responses = tokio::select! {
                _ = timer.tick() => self.session.production_cycle(),

                line = lines.next_line(), if input_open => {
                    match line? {
                        Some(line) => {
                            let Some(outcome) = self.handle_line(&line) else {
                                continue;
                            };
                            for job in outcome.jobs {
                                in_flight += 1;
                                self.spawn_job(job, reply_tx.clone());
                            }
                            if outcome.quit {
                                write_all(&mut output, &outcome.responses).await?;
                                break;
                            }
                            outcome.responses
                        }
                        None => {
                            tracing::debug!(in_flight, "Input closed");
                            input_open = false;
                            if in_flight == 0 {
                                break;
                            }
                            Vec::new()
                        }
                    }
                }

                Some(reply) = reply_rx.recv() => {
                    in_flight = in_flight.saturating_sub(1);
                    let responses = self.session.apply_reply(reply);
                    if !input_open && in_flight == 0 {
                        write_all(&mut output, &responses).await?;
                        break;
                    }
                    responses
                }
            };

            write_all(&mut output, &responses).await?;
        }

        write_all(&mut output, &[Response::Bye]).await?;
        tracing::info!(cycles = self.session.state().cycles(), "Session ended");
        Ok(self.session)
    }

    fn handle_line(&mut self, line: &str) -> Option<crate::session::Outcome> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        match Command::from_json(line) {
            Ok(cmd) => {
                tracing::debug!(cmd = cmd.name(), "Command received");
                Some(self.session.handle(cmd))
            }
            Err(e) => Some(crate::session::Outcome {
                responses: vec![Response::error(format!("Parse error: {e}"), None)],
                ..Default::default()
            }),
        }
    }

    fn spawn_job(&self, job: AdvisorJob, reply_tx: mpsc::UnboundedSender<AdvisorReply>) {
        let advisor = Arc::clone(&self.advisor);
        tokio::spawn(async move {
            let reply = job.run(&advisor).await;
            if reply_tx.send(reply).is_err() {
                tracing::debug!("Session ended before the advisor answered");
            }
        });
    }
}

async fn write_all<W>(output: &mut W, responses: &[Response]) -> Result<(), SessionError>
where
    W: AsyncWrite + Unpin,
{
    if responses.is_empty() {
        return Ok(());
    }
    for response in responses {
        output.write_all(response.to_json_line().as_bytes()).await?;
    }
    output.flush().await?;
    Ok(())
}
