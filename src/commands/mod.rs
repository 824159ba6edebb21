//! CLI command implementations.
//!
//! Each submodule owns one subcommand: a config struct built in `main.rs`
//! plus a handler that loads configuration, fetches records through the
//! paged source, runs the pure core, and renders.

pub mod aggregate;
pub mod export;
pub mod list;
pub mod stats;
pub mod summary;

pub use aggregate::{handle_aggregate, AggregateConfig};
pub use export::{handle_export, ExportConfig};
pub use list::{handle_list, ListConfig};
pub use stats::{handle_stats, StatsConfig};
pub use summary::{handle_summary, SummaryConfig};

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::config::DrillmapConfig;
use crate::core::types::ReviewRecord;
use crate::io::source::{fetch_all, JsonFileSource};

pub(crate) fn load_config(path: Option<&Path>) -> Result<DrillmapConfig> {
    let config = DrillmapConfig::load(path)?;
    Ok(config)
}

pub(crate) fn load_records(input: &Path, config: &DrillmapConfig) -> Result<Vec<ReviewRecord>> {
    let mut source = JsonFileSource::from_path(input)?;
    fetch_all(&mut source, config.page_size, config.max_records)
}

/// Lower bound for a date filter: an explicit start-of-day date, or now
/// minus the look-back window.
pub(crate) fn range_start(from: Option<NaiveDate>, days_back: u32) -> DateTime<Utc> {
    match from {
        Some(date) => date.and_time(NaiveTime::MIN).and_utc(),
        None => Utc::now() - Duration::days(i64::from(days_back)),
    }
}

/// Upper bound for a date filter: the whole given day, inclusive.
pub(crate) fn range_end(to: Option<NaiveDate>) -> Result<Option<DateTime<Utc>>> {
    to.map(|date| {
        date.and_hms_milli_opt(23, 59, 59, 999)
            .map(|naive| naive.and_utc())
            .context("invalid end-of-day time")
    })
    .transpose()
}

/// Output destination: a file when given, stdout otherwise.
pub(crate) fn open_destination(output: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output file {}", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(std::io::stdout())),
    }
}
