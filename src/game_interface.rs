//! Module defining traits that need to be implemented to use the tester
//!
//! The tester never simulates a game itself. Board generation, move validation and the
//! protocol spoken with the agent all live behind these traits.

use std::path::Path;

use crate::configuration::Configuration;

/// Produces randomized boards, one per match.
pub trait BoardGenerator {
    /// The board type handed to each match.
    type Board;

    /// Generate the next board. Successive boards must not depend on each other.
    fn generate_board(&mut self) -> Self::Board;
}

/// Ownership handle on one running agent process.
///
/// A handle is launched once, used for one or more matches, and disposed exactly once.
/// Misbehaviour of the agent (no response, invalid answers, early exit) must surface
/// through [`Match::agent_faulted`], never as an error from the handle.
pub trait AgentHandle: Sized {
    /// Launch a new agent instance from its executable.
    ///
    /// # Error
    /// Returned when the process could not be created at all.
    fn launch(path_to_exe: &Path) -> anyhow::Result<Self>;

    /// Release the OS resources held by this agent.
    fn dispose(self) -> anyhow::Result<()>;

    /// OS process id, if there is one. Used for resource observation only.
    fn pid(&self) -> Option<u32> {
        None
    }
}

/// One play-through between an agent and a board.
///
/// The match owns the agent while it runs and gives it back with [`Match::into_agent`].
pub trait Match {
    /// Agent type driven by this match.
    type Agent: AgentHandle;
    /// Immutable view of the match after one step. Only used for display.
    type Snapshot;

    /// True once the match reached its terminal state.
    fn is_finished(&self) -> bool;

    /// Perform exactly one exchange with the agent.
    ///
    /// Must not be called once [`Match::is_finished`] returned true.
    fn advance(&mut self) -> Self::Snapshot;

    /// True if the agent faulted (crash, timeout, protocol violation...).
    fn agent_faulted(&self) -> bool;

    /// Message describing the last fault, if any.
    fn last_fault_message(&self) -> Option<String>;

    /// Invalid moves made by the agent so far.
    fn bad_move_count(&self) -> u32;

    /// Steps played so far.
    fn step_count(&self) -> u32;

    /// Consume the match and take the agent back.
    fn into_agent(self) -> Self::Agent;
}

/// What will be given to the tester to allow it to create boards and matches
pub trait GameFactory {
    /// Board type shared by the generator and the matches.
    type Board;
    /// Agent process wrapper.
    type Agent: AgentHandle;
    /// Board generator, seeded from the configuration.
    type Generator: BoardGenerator<Board = Self::Board>;
    /// Match engine.
    type Match: Match<Agent = Self::Agent>;

    /// Returns a generator seeded with `config.random_seed`.
    fn new_generator(&self, config: &Configuration) -> Self::Generator;

    /// Bind a board and an agent into a new match.
    fn new_match(&self, board: Self::Board, agent: Self::Agent) -> Self::Match;
}

/// Snapshot type of the matches built by `F`.
pub(crate) type Snapshot<F> = <<F as GameFactory>::Match as Match>::Snapshot;

/// Interactive display surface used to watch matches step by step.
pub trait Display<S> {
    /// Render the state of a match after one step.
    fn render(&mut self, snapshot: &S);

    /// Show the message of a fault raised by the agent on the last step.
    fn show_fault(&mut self, message: &str);

    /// Block until the user asks for the next step.
    fn wait_for_ack(&mut self) -> anyhow::Result<()>;
}
