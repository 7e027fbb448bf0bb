use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::game_interface::{AgentHandle, GameFactory, Match, Snapshot};
use crate::match_runner::{MatchResult, MatchRunner};
use crate::resource_monitor::{Overruns, ResourceMonitor};

/// Lazy stream of played matches, one per board pulled from `maps`.
///
/// Owns the only live agent. The agent is reused from match to match until it faults; a
/// faulted agent is disposed right away and a fresh one is launched when the next match is
/// requested. The live agent is disposed when `maps` runs out or when the stream is dropped.
pub struct AgentLifecycleStream<'f, F: GameFactory, I> {
    path_to_exe: PathBuf,
    maps: I,
    factory: &'f F,
    runner: MatchRunner<Snapshot<F>>,
    monitor: Option<ResourceMonitor>,
    agent: Option<F::Agent>,
    launched: usize,
    finished: bool,
}

impl<'f, F, I> AgentLifecycleStream<'f, F, I>
where
    F: GameFactory,
    I: Iterator<Item = F::Board>,
{
    /// Play the boards of `maps` against agents launched from `path_to_exe`.
    pub fn new(
        path_to_exe: impl AsRef<Path>,
        maps: I,
        factory: &'f F,
        runner: MatchRunner<Snapshot<F>>,
    ) -> Self {
        AgentLifecycleStream {
            path_to_exe: path_to_exe.as_ref().to_path_buf(),
            maps,
            factory,
            runner,
            monitor: None,
            agent: None,
            launched: 0,
            finished: false,
        }
    }

    /// Report resource usage of the agent after every match.
    pub fn with_monitor(mut self, monitor: ResourceMonitor) -> Self {
        self.monitor = Some(monitor);
        self
    }

    #[instrument(skip(self), fields(path = %self.path_to_exe.display()))]
    fn launch_agent(&mut self) -> anyhow::Result<F::Agent> {
        let agent = <F::Agent as AgentHandle>::launch(&self.path_to_exe)?;
        self.launched += 1;
        if self.launched > 1 {
            info!(launched = self.launched, "agent relaunched after a crash");
        }
        Ok(agent)
    }

    fn finish(&mut self, agent: Option<F::Agent>) {
        self.finished = true;
        if let Some(agent) = agent.or_else(|| self.agent.take()) {
            Self::dispose_agent(agent);
        }
    }
}

impl<F: GameFactory, I> AgentLifecycleStream<'_, F, I> {
    /// Number of agent processes launched so far.
    pub fn launched_agents(&self) -> usize {
        self.launched
    }

    /// Budget overruns noticed so far, none when no monitor is attached.
    pub fn overruns(&self) -> Overruns {
        self.monitor
            .as_ref()
            .map(ResourceMonitor::overruns)
            .unwrap_or_default()
    }

    fn dispose_agent(agent: F::Agent) {
        if let Err(e) = agent.dispose() {
            warn!("could not dispose agent: {e:#}");
        }
    }
}

impl<F, I> Iterator for AgentLifecycleStream<'_, F, I>
where
    F: GameFactory,
    I: Iterator<Item = F::Board>,
{
    type Item = anyhow::Result<MatchResult>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let agent = match self.agent.take() {
            Some(agent) => agent,
            None => match self.launch_agent() {
                Ok(agent) => agent,
                Err(e) => {
                    self.finish(None);
                    return Some(Err(e));
                }
            },
        };

        let Some(board) = self.maps.next() else {
            self.finish(Some(agent));
            return None;
        };

        let mut game = self.factory.new_match(board, agent);
        let result = self.runner.run(&mut game);
        let agent = game.into_agent();

        if let Some(monitor) = &mut self.monitor {
            monitor.observe(agent.pid());
        }

        match result {
            Ok(result) => {
                if result.crashed {
                    Self::dispose_agent(agent);
                } else {
                    self.agent = Some(agent);
                }
                Some(Ok(result))
            }
            Err(e) => {
                self.finish(Some(agent));
                Some(Err(e))
            }
        }
    }
}

impl<F: GameFactory, I> Drop for AgentLifecycleStream<'_, F, I> {
    fn drop(&mut self) {
        if let Some(agent) = self.agent.take() {
            Self::dispose_agent(agent);
        }
    }
}
