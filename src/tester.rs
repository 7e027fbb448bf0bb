//! Core evaluation logic for testing one AI agent.
//!
//! This module defines the [`AiTester`] type, which wires the evaluation pipeline:
//!
//! - boards are generated lazily by the [`GameFactory`]'s generator,
//! - each board is played against the agent executable, the same process being reused
//!   from game to game until it crashes,
//! - results are collected until `games_count` games were played or more than
//!   `crash_limit` games crashed,
//! - results are reduced to [`Statistics`].
//!
//! # Behavior & Configuration
//!
//! Behavior is controlled by a [`Configuration`] object. When `interactive` is set, every
//! step of every game is shown on a [`Display`] and the next step waits for the user. When
//! `verbose` is set, [`AiTester::test_single_file`] prints one line per game.
//!
//! A crashing agent is not an error: crashes are counted and penalize the score. Failing to
//! launch the agent at all is an error and aborts the evaluation.

use std::{
    io::{self, Write},
    path::Path,
};

use anyhow::bail;
use tracing::{info, instrument, trace};

use crate::agent_lifecycle::AgentLifecycleStream;
use crate::configuration::Configuration;
use crate::display::ConsoleDisplay;
use crate::game_interface::{Display, GameFactory, Snapshot};
use crate::logger::RESULTS_TARGET;
use crate::map_stream::MapStream;
use crate::match_runner::{MatchResult, MatchRunner};
use crate::report::{statistics_message, statistics_row, verbose_results};
use crate::resource_monitor::{Overruns, ResourceMonitor};
use crate::result_collector::BoundedResults;
use crate::statistics::Statistics;

/// Outcome of one evaluation.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Name shown in the report, taken from the executable name.
    pub agent_name: String,
    /// One result per game played, in order.
    pub results: Vec<MatchResult>,
    /// Summary of `results`.
    pub statistics: Statistics,
    /// Agent processes launched during the run.
    pub launched_agents: usize,
    /// Budgets the run went over.
    pub overruns: Overruns,
}

/// The main type for evaluating an AI agent.
///
/// # Type Parameters
/// - `F`: A factory implementing [`GameFactory`], providing boards, matches and the agent type
pub struct AiTester<F: GameFactory> {
    factory: F,
    config: Configuration,
    display: Option<Box<dyn Display<Snapshot<F>>>>,
}

impl<F: GameFactory> AiTester<F> {
    /// Create an [`AiTester`] with given [`GameFactory`] and [`Configuration`]
    pub fn new(factory: F, config: Configuration) -> AiTester<F> {
        trace!(?config);
        AiTester {
            factory,
            config,
            display: None,
        }
    }

    /// Display used when `config.interactive` is set.
    pub fn with_display(mut self, display: impl Display<Snapshot<F>> + 'static) -> Self {
        self.display = Some(Box::new(display));
        self
    }

    /// Play games against the agent at `path_to_exe` and compute its statistics.
    ///
    /// # Errors
    /// Returns an error if the agent could not be launched, or if interactive mode is
    /// requested without a display.
    #[instrument(skip_all, fields(path = %path_to_exe.as_ref().display()))]
    pub fn evaluate(mut self, path_to_exe: impl AsRef<Path>) -> anyhow::Result<Evaluation> {
        let path_to_exe = path_to_exe.as_ref();
        let runner = self.make_runner()?;
        let config = self.config;

        let maps = MapStream::new(self.factory.new_generator(&config));
        let mut games = AgentLifecycleStream::new(path_to_exe, maps, &self.factory, runner)
            .with_monitor(ResourceMonitor::from_config(&config));
        let games_played = games.by_ref().take(config.games_count);
        let results = BoundedResults::new(games_played, config.crash_limit)
            .collect::<anyhow::Result<Vec<_>>>();
        let launched_agents = games.launched_agents();
        let overruns = games.overruns();
        // disposes the live agent
        drop(games);
        let results = results?;

        let statistics =
            Statistics::compute(&results, config.width, config.height, config.crash_limit);
        info!(games = results.len(), ?statistics, "evaluation finished");

        Ok(Evaluation {
            agent_name: agent_name(path_to_exe),
            results,
            statistics,
            launched_agents,
            overruns,
        })
    }

    /// Evaluate the agent at `path_to_exe`, then print the per-game trace (if verbose) and
    /// the score table, and append the score row to the results log.
    pub fn test_single_file(self, path_to_exe: impl AsRef<Path>) -> anyhow::Result<Evaluation> {
        self.test_single_file_with_output(path_to_exe, io::stdout().lock())
    }

    /// Same as [`AiTester::test_single_file`], printing to `out` instead of stdout.
    pub fn test_single_file_with_output(
        self,
        path_to_exe: impl AsRef<Path>,
        mut out: impl Write,
    ) -> anyhow::Result<Evaluation> {
        let verbose = self.config.verbose;
        let evaluation = self.evaluate(path_to_exe)?;

        if verbose {
            for line in verbose_results(&evaluation.results) {
                writeln!(out, "{line}")?;
            }
        }
        info!(
            target: RESULTS_TARGET,
            "{}",
            statistics_row(&evaluation.agent_name, &evaluation.statistics)
        );
        write!(
            out,
            "{}",
            statistics_message(&evaluation.agent_name, &evaluation.statistics)
        )?;
        out.flush()?;

        Ok(evaluation)
    }

    fn make_runner(&mut self) -> anyhow::Result<MatchRunner<Snapshot<F>>> {
        if !self.config.interactive {
            return Ok(MatchRunner::Batch);
        }
        let Some(display) = self.display.take() else {
            bail!("interactive mode requires a display");
        };
        Ok(MatchRunner::Interactive(display))
    }
}

impl<F> AiTester<F>
where
    F: GameFactory,
    Snapshot<F>: std::fmt::Display,
{
    /// Show steps on the terminal when `config.interactive` is set.
    pub fn with_console_display(self) -> Self {
        self.with_display(ConsoleDisplay::stdio())
    }
}

fn agent_name(path_to_exe: &Path) -> String {
    path_to_exe
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path_to_exe.display().to_string())
}
