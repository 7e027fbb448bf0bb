use tracing::{debug, trace};

use crate::game_interface::{Display, Match};

/// Terminal snapshot of a finished match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchResult {
    /// The agent faulted during the match.
    pub crashed: bool,
    /// Invalid moves made by the agent.
    pub bad_moves: u32,
    /// Steps played before the match ended.
    pub step_count: u32,
}

impl MatchResult {
    /// Build a result from its fields.
    pub fn new(crashed: bool, bad_moves: u32, step_count: u32) -> Self {
        MatchResult {
            crashed,
            bad_moves,
            step_count,
        }
    }

    fn of<M: Match>(game: &M) -> Self {
        MatchResult {
            crashed: game.agent_faulted(),
            bad_moves: game.bad_move_count(),
            step_count: game.step_count(),
        }
    }
}

/// Drives a match to completion, optionally showing every step on a [`Display`].
pub enum MatchRunner<S> {
    /// Only the terminal state is kept.
    Batch,
    /// Every step is rendered and acknowledged before the next one.
    Interactive(Box<dyn Display<S>>),
}

impl<S> MatchRunner<S> {
    /// Play `game` until it is finished and extract its result.
    ///
    /// # Error
    /// Only in interactive mode, when waiting for the user fails.
    pub fn run<M: Match<Snapshot = S>>(&mut self, game: &mut M) -> anyhow::Result<MatchResult> {
        match self {
            MatchRunner::Batch => {
                while !game.is_finished() {
                    game.advance();
                }
            }
            MatchRunner::Interactive(display) => {
                while !game.is_finished() {
                    let snapshot = game.advance();
                    trace!(step = game.step_count(), "step played");
                    display.render(&snapshot);
                    if game.agent_faulted() {
                        let message = game
                            .last_fault_message()
                            .unwrap_or_else(|| "agent faulted".to_owned());
                        display.show_fault(&message);
                    }
                    display.wait_for_ack()?;
                }
            }
        }

        let result = MatchResult::of(game);
        debug!(?result, "match finished");
        Ok(result)
    }
}
