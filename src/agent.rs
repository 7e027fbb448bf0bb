//! Agent process wrapper.
//!
//! [`ProcessAgent`] owns a child process running the agent executable. Its standard input
//! and output are piped so that a [`Match`](crate::game_interface::Match) implementation can
//! speak whatever protocol the game needs.

use std::{
    path::Path,
    process::{Child, ChildStdin, ChildStdout, Command, Stdio},
    time::{Duration, Instant},
};

use anyhow::Context;
use tracing::{instrument, trace, warn};

use crate::game_interface::AgentHandle;

/// A running agent process. Killed on [`AgentHandle::dispose`], or on drop otherwise.
#[derive(Debug)]
pub struct ProcessAgent {
    child: Child,
    cleaned_up: bool,
}

impl ProcessAgent {
    const CLEANUP_DURATION: Duration = Duration::from_secs(1);

    /// Spawn `path_to_exe` with piped stdin/stdout. Stderr is inherited when `allow_stderr`.
    #[instrument]
    pub fn spawn(path_to_exe: &Path, allow_stderr: bool) -> anyhow::Result<ProcessAgent> {
        let mut cmd = Command::new(path_to_exe);
        cmd.stdin(Stdio::piped()).stdout(Stdio::piped());
        if !allow_stderr {
            cmd.stderr(Stdio::null());
        }
        let child = cmd
            .spawn()
            .with_context(|| format!("could not launch agent '{}'", path_to_exe.display()))?;
        trace!(pid = child.id(), "agent launched");

        Ok(ProcessAgent {
            child,
            cleaned_up: false,
        })
    }

    /// Pipe to the agent's standard input. `None` once taken.
    pub fn stdin(&mut self) -> Option<&mut ChildStdin> {
        self.child.stdin.as_mut()
    }

    /// Pipe from the agent's standard output. `None` once taken.
    pub fn stdout(&mut self) -> Option<&mut ChildStdout> {
        self.child.stdout.as_mut()
    }

    /// True while the process has not exited.
    pub fn is_running(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// Kill the process and wait for it to exit, for up to `max_duration`.
    pub fn try_kill(&mut self, max_duration: Duration) -> anyhow::Result<()> {
        if self.cleaned_up {
            return Ok(());
        }
        // the process may have exited on its own: killing it then fails, which is fine
        let _ = self.child.kill();

        let deadline = Instant::now() + max_duration;
        loop {
            if self
                .child
                .try_wait()
                .context("could not wait for agent process")?
                .is_some()
            {
                self.cleaned_up = true;
                return Ok(());
            }
            if Instant::now() > deadline {
                anyhow::bail!("agent process {} did not exit in time", self.child.id());
            }
            std::thread::sleep(std::cmp::min(Duration::from_millis(10), max_duration / 10));
        }
    }
}

impl AgentHandle for ProcessAgent {
    fn launch(path_to_exe: &Path) -> anyhow::Result<Self> {
        Self::spawn(path_to_exe, false)
    }

    fn dispose(mut self) -> anyhow::Result<()> {
        self.try_kill(Self::CLEANUP_DURATION)
    }

    fn pid(&self) -> Option<u32> {
        Some(self.child.id())
    }
}

impl Drop for ProcessAgent {
    fn drop(&mut self) {
        if !self.cleaned_up {
            if let Err(e) = self.try_kill(Self::CLEANUP_DURATION) {
                warn!("could not kill agent process on drop: {e:#}");
            }
        }
    }
}
