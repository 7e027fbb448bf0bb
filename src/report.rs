//! Fixed-width text rendering of evaluation results.

use std::fmt::Display;

use crate::match_runner::MatchResult;
use crate::statistics::Statistics;

const NAME_WIDTH: usize = 15;
const VALUE_WIDTH: usize = 7;

const HEADERS: [&str; 8] = [
    "AiName", "Mean", "Sigma", "Median", "Crashes", "Bad%", "Games", "Score",
];

/// Right-pad `value` with spaces to `width` characters, cutting whatever does not fit.
pub fn format_value(value: &dyn Display, width: usize) -> String {
    let mut s = value
        .to_string()
        .replace('\t', " ")
        .chars()
        .take(width)
        .collect::<String>();
    let len = s.chars().count();
    s.extend(std::iter::repeat(' ').take(width - len));
    s
}

/// First value on 15 characters, then each other value on 7 characters, space separated.
pub fn format_table_row(values: &[&dyn Display]) -> String {
    let Some((first, rest)) = values.split_first() else {
        return String::new();
    };
    format_value(*first, NAME_WIDTH)
        + &rest
            .iter()
            .map(|v| format_value(*v, VALUE_WIDTH))
            .collect::<Vec<_>>()
            .join(" ")
}

/// Column titles.
pub fn header_row() -> String {
    let values = HEADERS.iter().map(|h| h as &dyn Display).collect::<Vec<_>>();
    format_table_row(&values)
}

/// Values of the score table, the one line written to the results log.
pub fn statistics_row(ai_name: &str, statistics: &Statistics) -> String {
    let values: [&dyn Display; 8] = [
        &ai_name,
        &statistics.mean,
        &statistics.sigma,
        &statistics.median,
        &statistics.crashes,
        &statistics.bad_fraction,
        &statistics.games_played,
        &statistics.score,
    ];
    format_table_row(&values)
}

/// Summary table with its title, as printed at the end of an evaluation.
pub fn statistics_message(ai_name: &str, statistics: &Statistics) -> String {
    format!(
        "\nScore statistics\n================\n{}\n{}\n",
        header_row(),
        statistics_row(ai_name, statistics)
    )
}

/// One line per game. `index` starts at 1.
pub fn match_trace_line(index: usize, result: &MatchResult) -> String {
    format!(
        "Game #{index:>4}: Turns {:>4}, BadShots {}{}",
        result.step_count,
        result.bad_moves,
        if result.crashed { ", Crashed" } else { "" }
    )
}

/// Trace lines of all `results`, numbered from 1.
pub fn verbose_results(results: &[MatchResult]) -> Vec<String> {
    results
        .iter()
        .enumerate()
        .map(|(i, result)| match_trace_line(i + 1, result))
        .collect()
}
