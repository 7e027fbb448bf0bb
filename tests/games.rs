use std::{
    cell::RefCell,
    collections::VecDeque,
    fmt,
    io::{BufRead, BufReader, Write},
    path::Path,
};

use ai_tester::prelude::*;

// ---------------------------------------------------------------------------------------
// Scripted game: every board says exactly how the game goes.

#[derive(Debug, Clone, Copy)]
pub struct Script {
    pub steps: u32,
    pub bad_moves: u32,
    pub crash: bool,
}

pub fn script(crash: bool, bad_moves: u32, steps: u32) -> Script {
    Script {
        steps,
        bad_moves,
        crash,
    }
}

thread_local! {
    pub static LAUNCHED: RefCell<u32> = const { RefCell::new(0) };
    pub static DISPOSED: RefCell<u32> = const { RefCell::new(0) };
}

pub fn agent_counters() -> (u32, u32) {
    (
        LAUNCHED.with(|l| *l.borrow()),
        DISPOSED.with(|d| *d.borrow()),
    )
}

pub fn reset_agent_counters() {
    LAUNCHED.with(|l| *l.borrow_mut() = 0);
    DISPOSED.with(|d| *d.borrow_mut() = 0);
}

pub struct ScriptedAgent;

impl AgentHandle for ScriptedAgent {
    fn launch(_path_to_exe: &Path) -> anyhow::Result<Self> {
        LAUNCHED.with(|l| *l.borrow_mut() += 1);
        Ok(ScriptedAgent)
    }

    fn dispose(self) -> anyhow::Result<()> {
        DISPOSED.with(|d| *d.borrow_mut() += 1);
        Ok(())
    }
}

pub struct ScriptedGenerator {
    scripts: VecDeque<Script>,
}

impl BoardGenerator for ScriptedGenerator {
    type Board = Script;

    fn generate_board(&mut self) -> Script {
        self.scripts.pop_front().unwrap_or(script(false, 0, 1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptedStep {
    pub step: u32,
    pub bad_moves: u32,
}

impl fmt::Display for ScriptedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} ({} bad)", self.step, self.bad_moves)
    }
}

pub struct ScriptedMatch {
    script: Script,
    agent: ScriptedAgent,
    steps: u32,
}

impl ScriptedMatch {
    // bad moves are spread over the first steps
    fn bad_moves(&self) -> u32 {
        self.steps.min(self.script.bad_moves)
    }
}

impl Match for ScriptedMatch {
    type Agent = ScriptedAgent;
    type Snapshot = ScriptedStep;

    fn is_finished(&self) -> bool {
        self.steps >= self.script.steps
    }

    fn advance(&mut self) -> ScriptedStep {
        self.steps += 1;
        ScriptedStep {
            step: self.steps,
            bad_moves: self.bad_moves(),
        }
    }

    fn agent_faulted(&self) -> bool {
        self.script.crash && self.is_finished()
    }

    fn last_fault_message(&self) -> Option<String> {
        self.agent_faulted()
            .then(|| format!("agent crashed on step {}", self.steps))
    }

    fn bad_move_count(&self) -> u32 {
        self.bad_moves()
    }

    fn step_count(&self) -> u32 {
        self.steps
    }

    fn into_agent(self) -> ScriptedAgent {
        self.agent
    }
}

#[derive(Default)]
pub struct ScriptedFactory {
    pub scripts: Vec<Script>,
}

impl GameFactory for ScriptedFactory {
    type Board = Script;
    type Agent = ScriptedAgent;
    type Generator = ScriptedGenerator;
    type Match = ScriptedMatch;

    fn new_generator(&self, _config: &Configuration) -> ScriptedGenerator {
        ScriptedGenerator {
            scripts: self.scripts.iter().copied().collect(),
        }
    }

    fn new_match(&self, board: Script, agent: ScriptedAgent) -> ScriptedMatch {
        ScriptedMatch {
            script: board,
            agent,
            steps: 0,
        }
    }
}

// ---------------------------------------------------------------------------------------
// Echo game: the agent process must repeat every line it receives.

pub struct EchoGenerator {
    next: u32,
}

impl BoardGenerator for EchoGenerator {
    type Board = u32;

    fn generate_board(&mut self) -> u32 {
        self.next = self.next % 5 + 1;
        self.next
    }
}

pub struct EchoMatch {
    rounds: u32,
    agent: ProcessAgent,
    steps: u32,
    bad_moves: u32,
    fault: Option<String>,
}

impl EchoMatch {
    fn exchange(&mut self, line: &str) -> anyhow::Result<String> {
        let stdin = self
            .agent
            .stdin()
            .ok_or_else(|| anyhow::anyhow!("no stdin"))?;
        stdin.write_all(line.as_bytes())?;
        stdin.flush()?;
        let stdout = self
            .agent
            .stdout()
            .ok_or_else(|| anyhow::anyhow!("no stdout"))?;
        let mut answer = String::new();
        if BufReader::new(stdout).read_line(&mut answer)? == 0 {
            anyhow::bail!("agent closed its output");
        }
        Ok(answer)
    }
}

impl Match for EchoMatch {
    type Agent = ProcessAgent;
    type Snapshot = u32;

    fn is_finished(&self) -> bool {
        self.fault.is_some() || self.steps >= self.rounds
    }

    fn advance(&mut self) -> u32 {
        self.steps += 1;
        let line = format!("round {}\n", self.steps);
        match self.exchange(&line) {
            Ok(answer) if answer == line => {}
            Ok(_) => self.bad_moves += 1,
            Err(e) => self.fault = Some(format!("{e:#}")),
        }
        self.steps
    }

    fn agent_faulted(&self) -> bool {
        self.fault.is_some()
    }

    fn last_fault_message(&self) -> Option<String> {
        self.fault.clone()
    }

    fn bad_move_count(&self) -> u32 {
        self.bad_moves
    }

    fn step_count(&self) -> u32 {
        self.steps
    }

    fn into_agent(self) -> ProcessAgent {
        self.agent
    }
}

pub struct EchoFactory;

impl GameFactory for EchoFactory {
    type Board = u32;
    type Agent = ProcessAgent;
    type Generator = EchoGenerator;
    type Match = EchoMatch;

    fn new_generator(&self, config: &Configuration) -> EchoGenerator {
        EchoGenerator {
            next: (config.random_seed() % 5) as u32,
        }
    }

    fn new_match(&self, rounds: u32, agent: ProcessAgent) -> EchoMatch {
        EchoMatch {
            rounds,
            agent,
            steps: 0,
            bad_moves: 0,
            fault: None,
        }
    }
}

/// Absolute path of a system binary, if it exists on this machine.
pub fn system_binary(name: &str) -> Option<String> {
    ["/bin", "/usr/bin"]
        .iter()
        .map(|dir| format!("{dir}/{name}"))
        .find(|path| Path::new(path).is_file())
}
