//! Config for the tester behaviors
//!
//! Configuration can be created programmatically using [`Configuration::new()`] or by reading
//! environment variables using [`Configuration::from_env()`].
//!
//! # Environment Variables
//!
//! The following environment variables can be used to override configuration values. All
//! values are optional. Flags are case-insensitive; set them to `"true"` to enable them.
//!
//! - `EVAL_WIDTH`: Board width (default: `10`)
//! - `EVAL_HEIGHT`: Board height (default: `10`)
//! - `EVAL_CRASH_LIMIT`: Crashes tolerated before stopping early (default: `5`)
//! - `EVAL_GAMES_COUNT`: Maximum number of games played (default: `100`)
//! - `EVAL_RANDOM_SEED`: Seed given to the board generator (default: `0`)
//! - `EVAL_TIME_LIMIT_SECS`: Expected wall-clock time per game, in seconds (default: `10`)
//! - `EVAL_MEMORY_LIMIT_MB`: Expected memory ceiling of the agent, in MB (default: `256`)
//! - `EVAL_INTERACTIVE`: Watch every game step by step (default: `false`)
//! - `EVAL_VERBOSE`: Print one line per game (default: `false`)
//! - `EVAL_LOG`: Enable the timestamped debug log file (default: `false`)

use std::str::FromStr;

/// Configuration for tester behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) crash_limit: u32,
    pub(crate) games_count: usize,
    pub(crate) random_seed: u64,
    pub(crate) time_limit_seconds: u64,
    pub(crate) memory_limit: u64,
    pub(crate) interactive: bool,
    pub(crate) verbose: bool,
    pub(crate) log: bool,
}

impl Configuration {
    /// Create a new configuration with default parameters.
    ///
    /// By default:
    /// - Boards are 10x10.
    /// - The run stops once more than 5 games crashed.
    /// - At most 100 games are played.
    /// - The generator seed is 0.
    /// - Each game is expected to take at most 10 seconds, and the agent at most 256 MB.
    /// - Games are played without display, and only the summary is printed.
    /// - Logging to file is disabled.
    pub fn new() -> Self {
        Self {
            width: 10,
            height: 10,
            crash_limit: 5,
            games_count: 100,
            random_seed: 0,
            time_limit_seconds: 10,
            memory_limit: 256,
            interactive: false,
            verbose: false,
            log: false,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// See the [module documentation](self) for the recognized variables. Any unset or
    /// unparsable value results in using the default value for that field.
    pub fn from_env() -> Self {
        fn get_env_flag(var: &str, default: bool) -> bool {
            match std::env::var(var) {
                Ok(val) => val.eq_ignore_ascii_case("true"),
                Err(_) => default,
            }
        }

        fn get_env_value<T: FromStr>(var: &str, default: T) -> T {
            std::env::var(var)
                .ok()
                .and_then(|val| val.trim().parse().ok())
                .unwrap_or(default)
        }

        let default = Self::new();
        Self {
            width: get_env_value("EVAL_WIDTH", default.width),
            height: get_env_value("EVAL_HEIGHT", default.height),
            crash_limit: get_env_value("EVAL_CRASH_LIMIT", default.crash_limit),
            games_count: get_env_value("EVAL_GAMES_COUNT", default.games_count),
            random_seed: get_env_value("EVAL_RANDOM_SEED", default.random_seed),
            time_limit_seconds: get_env_value("EVAL_TIME_LIMIT_SECS", default.time_limit_seconds),
            memory_limit: get_env_value("EVAL_MEMORY_LIMIT_MB", default.memory_limit),
            interactive: get_env_flag("EVAL_INTERACTIVE", default.interactive),
            verbose: get_env_flag("EVAL_VERBOSE", default.verbose),
            log: get_env_flag("EVAL_LOG", default.log),
        }
    }

    /// Set the board size.
    pub fn with_board_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the number of crashes tolerated before the run stops.
    pub fn with_crash_limit(mut self, value: u32) -> Self {
        self.crash_limit = value;
        self
    }

    /// Set the maximum number of games played.
    pub fn with_games_count(mut self, value: usize) -> Self {
        self.games_count = value;
        self
    }

    /// Set the seed of the board generator.
    pub fn with_random_seed(mut self, value: u64) -> Self {
        self.random_seed = value;
        self
    }

    /// Set the expected time per game, in seconds.
    pub fn with_time_limit_seconds(mut self, value: u64) -> Self {
        self.time_limit_seconds = value;
        self
    }

    /// Set the expected memory ceiling of the agent, in MB.
    pub fn with_memory_limit(mut self, value: u64) -> Self {
        self.memory_limit = value;
        self
    }

    /// Enable or disable step-by-step display.
    pub fn with_interactive(mut self, value: bool) -> Self {
        self.interactive = value;
        self
    }

    /// Enable or disable the per-game trace.
    pub fn with_verbose(mut self, value: bool) -> Self {
        self.verbose = value;
        self
    }

    /// Enable or disable logging to file.
    pub fn with_log(mut self, value: bool) -> Self {
        self.log = value;
        self
    }

    /// Board width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Board height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Crashes tolerated before the run stops.
    pub fn crash_limit(&self) -> u32 {
        self.crash_limit
    }

    /// Maximum number of games played.
    pub fn games_count(&self) -> usize {
        self.games_count
    }

    /// Seed of the board generator.
    pub fn random_seed(&self) -> u64 {
        self.random_seed
    }

    /// Expected time per game, in seconds.
    pub fn time_limit_seconds(&self) -> u64 {
        self.time_limit_seconds
    }

    /// Expected memory ceiling of the agent, in MB.
    pub fn memory_limit(&self) -> u64 {
        self.memory_limit
    }

    /// Step-by-step display.
    pub fn interactive(&self) -> bool {
        self.interactive
    }

    /// Per-game trace.
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Debug log written to a timestamped file.
    pub fn log(&self) -> bool {
        self.log
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}
