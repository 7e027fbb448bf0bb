//! # Ai Tester
//!
//! A Rust crate for scoring a game-playing AI agent by making it play many randomized games.
//!
//! It provides:
//! - The evaluation pipeline (`AiTester`): lazy board generation, agent process lifecycle
//!   with crash recovery, early stop on repeated crashes
//! - Score statistics (`Statistics`) and their fixed-width report
//! - A process wrapper for agents (`ProcessAgent`) and a terminal display for watching games
//! - A ready-made command line entry point ([`cli::run`])
//!
//! The agent is an external executable. One process is reused from game to game; when it
//! crashes it is replaced by a fresh one. Crashes, bad moves and game lengths are collected
//! and reduced to a single score: the shorter the games, the better, each crash and each bad
//! move being penalized.
//!
//! # Documentation Overview
//!
//! - For the evaluation pipeline, see the [`tester`] module.
//! - For configuring board size, crash limit, number of games, seed..., see
//!   [`Configuration`](crate::configuration::Configuration).
//! - For plugging in a game, implement the traits of [`game_interface`].
//! - For the score formula, see [`Statistics`](crate::statistics::Statistics).
//!
//! # Usage Example
//!
//! ```no_run
//! # use std::path::Path;
//! # use ai_tester::game_interface::*;
//! # use ai_tester::prelude::*;
//! # struct YourGenerator;
//! # impl BoardGenerator for YourGenerator {
//! #     type Board = u32;
//! #     fn generate_board(&mut self) -> u32 { 0 }
//! # }
//! # struct YourMatch { agent: ProcessAgent, steps: u32 }
//! # impl Match for YourMatch {
//! #     type Agent = ProcessAgent;
//! #     type Snapshot = u32;
//! #     fn is_finished(&self) -> bool { self.steps > 0 }
//! #     fn advance(&mut self) -> u32 { self.steps += 1; self.steps }
//! #     fn agent_faulted(&self) -> bool { false }
//! #     fn last_fault_message(&self) -> Option<String> { None }
//! #     fn bad_move_count(&self) -> u32 { 0 }
//! #     fn step_count(&self) -> u32 { self.steps }
//! #     fn into_agent(self) -> ProcessAgent { self.agent }
//! # }
//! # struct YourGame;
//! # impl GameFactory for YourGame {
//! #     type Board = u32;
//! #     type Agent = ProcessAgent;
//! #     type Generator = YourGenerator;
//! #     type Match = YourMatch;
//! #     fn new_generator(&self, _config: &Configuration) -> YourGenerator { YourGenerator }
//! #     fn new_match(&self, _board: u32, agent: ProcessAgent) -> YourMatch { YourMatch { agent, steps: 0 } }
//! # }
//! fn main() -> anyhow::Result<()> {
//!     let config = Configuration::new()
//!         .with_board_size(10, 10)
//!         .with_crash_limit(5)
//!         .with_games_count(100)
//!         .with_random_seed(42);
//!
//!     let evaluation = AiTester::new(YourGame, config).test_single_file("path/to/agent")?;
//!     println!("score: {}", evaluation.statistics.score);
//!     Ok(())
//! }
//! ```
#![warn(missing_docs)]

pub use anyhow;
mod agent;
mod agent_lifecycle;
pub mod cli;
pub mod configuration;
mod display;
pub mod game_interface;
mod logger;
mod map_stream;
mod match_runner;
pub mod report;
mod resource_monitor;
mod result_collector;
pub mod statistics;
pub mod tester;

pub use agent::ProcessAgent;
pub use agent_lifecycle::AgentLifecycleStream;
pub use display::ConsoleDisplay;
pub use logger::{build_subscriber, init_logger, RESULTS_FILE, RESULTS_TARGET};
pub use map_stream::MapStream;
pub use match_runner::{MatchResult, MatchRunner};
pub use resource_monitor::{Overruns, ResourceMonitor};
pub use result_collector::BoundedResults;

/// Commonly used types and traits for quick access.
///
/// Import this prelude to get started easily:
/// ```rust
/// use ai_tester::prelude::*;
/// ```
///
/// Includes:
/// - [`Configuration`](crate::configuration::Configuration)
/// - [`AiTester`](crate::tester::AiTester)
/// - [`Statistics`](crate::statistics::Statistics)
/// - the traits to implement to plug a game in
pub mod prelude {
    pub use crate::agent::ProcessAgent;
    pub use crate::configuration::Configuration;
    pub use crate::game_interface::{AgentHandle, BoardGenerator, Display, GameFactory, Match};
    pub use crate::match_runner::MatchResult;
    pub use crate::statistics::Statistics;
    pub use crate::tester::{AiTester, Evaluation};
}
