use std::{
    fs::{File, OpenOptions},
    path::Path,
    sync::Mutex,
};

use anyhow::Context;
use time::{
    format_description::{self, parse},
    OffsetDateTime, UtcOffset,
};
use tracing::{subscriber::set_global_default, Subscriber};
use tracing_subscriber::{filter::filter_fn, fmt, layer::SubscriberExt, Layer, Registry};

/// Target of the one-line result record written at the end of each evaluation.
pub const RESULTS_TARGET: &str = "results";

/// File the result records are appended to.
pub const RESULTS_FILE: &str = "results.log";

/// Install the global subscriber. Call once, at process start.
///
/// See [`build_subscriber`] for where events go.
pub fn init_logger(results_path: impl AsRef<Path>, log_to_file: bool) -> anyhow::Result<()> {
    let subscriber = build_subscriber(results_path, log_to_file)?;
    set_global_default(subscriber).context("Could not set global default tracing subscriber. Is another subscriber already installed?")
}

/// Subscriber appending events on [`RESULTS_TARGET`], bare, to `results_path`.
///
/// With `log_to_file`, every other event goes to a new timestamped log file.
pub fn build_subscriber(
    results_path: impl AsRef<Path>,
    log_to_file: bool,
) -> anyhow::Result<impl Subscriber + Send + Sync + 'static> {
    let results = OpenOptions::new()
        .create(true)
        .append(true)
        .open(results_path.as_ref())
        .with_context(|| format!("could not open {}", results_path.as_ref().display()))?;

    let log_layer = if log_to_file {
        let file_name = get_log_file_name()?;
        let file =
            File::create(&file_name).with_context(|| format!("could not create {file_name}"))?;
        let local_offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
        let timer = fmt::time::OffsetTime::new(
            local_offset,
            format_description::parse("[year]-[month]-[day] [hour]:[minute]:[second]")?,
        );
        Some(
            fmt::layer()
                .with_ansi(false)
                .with_timer(timer)
                .with_writer(Mutex::new(file))
                .with_filter(filter_fn(|meta| meta.target() != RESULTS_TARGET)),
        )
    } else {
        None
    };

    let results_layer = fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_level(false)
        .with_target(false)
        .with_writer(Mutex::new(results))
        .with_filter(filter_fn(|meta| meta.target() == RESULTS_TARGET));

    Ok(Registry::default().with(log_layer).with(results_layer))
}

fn get_log_file_name() -> anyhow::Result<String> {
    let format = parse("[year]-[month]-[day]_[hour]:[minute]:[second]_log.txt")?;
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    Ok(now.format(&format)?)
}
