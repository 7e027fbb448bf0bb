//! Command line entry point.
//!
//! A game crate only has to provide its [`GameFactory`] to get a complete tester binary:
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     ai_tester::cli::run(std::env::args(), BattleshipsFactory::default())?;
//!     Ok(())
//! }
//! ```

use std::{fmt, path::Path};

use tracing::error;

use crate::configuration::Configuration;
use crate::game_interface::{GameFactory, Snapshot};
use crate::logger::{init_logger, RESULTS_FILE};
use crate::tester::{AiTester, Evaluation};

/// Run the tester with the process arguments, configured from the environment.
///
/// Installs the global logger: the score row of each run is appended to [`RESULTS_FILE`],
/// and `EVAL_LOG` adds a timestamped debug log file.
///
/// `args` starts with the program name, followed by the path to the agent executable.
/// Returns `None` when nothing was evaluated because the arguments were invalid; a message
/// has then already been printed.
pub fn run<F>(
    args: impl IntoIterator<Item = String>,
    factory: F,
) -> anyhow::Result<Option<Evaluation>>
where
    F: GameFactory,
    Snapshot<F>: fmt::Display,
{
    let config = Configuration::from_env();
    init_logger(RESULTS_FILE, config.log())?;
    run_with_config(args, factory, config)
}

/// Same as [`run`] with an explicit configuration. Does not install any logger.
pub fn run_with_config<F>(
    args: impl IntoIterator<Item = String>,
    factory: F,
    config: Configuration,
) -> anyhow::Result<Option<Evaluation>>
where
    F: GameFactory,
    Snapshot<F>: fmt::Display,
{
    let mut args = args.into_iter();
    let program = args.next().unwrap_or_else(|| "ai-tester".to_owned());
    let program = Path::new(&program)
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.clone());

    let Some(path_to_exe) = args.next() else {
        println!("{}", usage(&program));
        return Ok(None);
    };

    if !Path::new(&path_to_exe).is_file() {
        error!(path = %path_to_exe, "agent executable not found");
        println!("No AI exe-file {path_to_exe}");
        return Ok(None);
    }

    let tester = AiTester::new(factory, config).with_console_display();
    tester.test_single_file(&path_to_exe).map(Some)
}

fn usage(program: &str) -> String {
    format!("Usage: {program} <ai.exe>")
}
