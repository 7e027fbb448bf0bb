//! Reduction of match results into a single comparable score.

use crate::match_runner::MatchResult;

/// Step count used in place of an empty result list.
pub const NO_GAME_TURNS: u32 = 1_000_000;

/// Summary of an evaluation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    /// Number of match results.
    pub games_played: usize,
    /// Number of crashed matches.
    pub crashes: usize,
    /// Median step count.
    pub median: u32,
    /// Mean step count.
    pub mean: f64,
    /// Population standard deviation of the step count.
    pub sigma: f64,
    /// Bad moves per hundred steps.
    pub bad_fraction: f64,
    /// Higher is better.
    pub score: f64,
}

impl Statistics {
    /// Compute statistics of `results` played on `width`x`height` boards.
    ///
    /// With no result at all, a single game of [`NO_GAME_TURNS`] steps is assumed so that
    /// the score stays finite (and very negative).
    pub fn compute(results: &[MatchResult], width: u32, height: u32, crash_limit: u32) -> Self {
        let games_played = results.len();
        let crashes = results.iter().filter(|r| r.crashed).count();

        let mut turns = results.iter().map(|r| r.step_count).collect::<Vec<_>>();
        if turns.is_empty() {
            turns.push(NO_GAME_TURNS);
        }
        turns.sort_unstable();

        let median = legacy_median(&turns);
        let count = turns.len() as f64;
        let total_turns = turns.iter().map(|&t| u64::from(t)).sum::<u64>();
        let mean = total_turns as f64 / count;
        let sigma = (turns
            .iter()
            .map(|&t| (f64::from(t) - mean).powi(2))
            .sum::<f64>()
            / count)
            .sqrt();

        let bad_moves = results.iter().map(|r| u64::from(r.bad_moves)).sum::<u64>();
        let bad_fraction = 100.0 * bad_moves as f64 / total_turns as f64;

        let area = f64::from(width) * f64::from(height);
        let crash_penalty = 100.0 * crashes as f64 / f64::from(crash_limit);
        let efficiency_score = 100.0 * (area - mean) / area;
        let score = efficiency_score - crash_penalty - bad_fraction;

        Statistics {
            games_played,
            crashes,
            median,
            mean,
            sigma,
            bad_fraction,
            score,
        }
    }
}

/// Median of sorted, non-empty `turns`.
///
/// For an even count this averages the elements at `n/2` and `(n+1)/2`, which is the same
/// index in integer arithmetic. Scores have always been computed this way, so it is kept
/// even though it differs from the usual median.
fn legacy_median(turns: &[u32]) -> u32 {
    let n = turns.len();
    if n % 2 == 1 {
        turns[n / 2]
    } else {
        ((u64::from(turns[n / 2]) + u64::from(turns[(n + 1) / 2])) / 2) as u32
    }
}
