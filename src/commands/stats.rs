use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};
use log::info;
use serde::Serialize;

use crate::commands::{load_config, load_records, range_start};
use crate::core::stats::{group_counts, GroupBy, StatsFilter};

pub struct StatsConfig {
    pub input: PathBuf,
    pub group_by: GroupBy,
    pub days_back: u32,
    pub sector: Option<String>,
    pub type_filter: Option<String>,
    pub role: Option<String>,
    pub json: bool,
    pub config_file: Option<PathBuf>,
}

#[derive(Serialize)]
struct StatsReport<'a> {
    group_by: &'a str,
    days_back: u32,
    fetched: usize,
    kept: usize,
    counts: &'a std::collections::BTreeMap<String, u64>,
}

pub fn handle_stats(config: StatsConfig) -> Result<()> {
    let app_config = load_config(config.config_file.as_deref())?;
    let records = load_records(&config.input, &app_config)?;

    let filter = StatsFilter {
        since: range_start(None, config.days_back),
        until: None,
        sector: config.sector,
        record_type: config.type_filter,
        role: config.role,
    };
    let result = group_counts(&records, config.group_by, &filter, &app_config.unknown_label);
    info!("kept {} of {} fetched records", result.kept, records.len());

    let mut stdout = std::io::stdout();
    if config.json {
        let report = StatsReport {
            group_by: group_by_name(config.group_by),
            days_back: config.days_back,
            fetched: records.len(),
            kept: result.kept,
            counts: &result.counts,
        };
        writeln!(stdout, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    // Highest counts first, like the dashboard table.
    let mut rows: Vec<(&String, &u64)> = result.counts.iter().collect();
    rows.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![group_by_name(config.group_by), "Count"]);
    for (key, count) in rows {
        table.add_row(vec![key.clone(), count.to_string()]);
    }
    writeln!(stdout, "{table}")?;
    writeln!(
        stdout,
        "kept {} of {} records ({} days back)",
        result.kept,
        records.len(),
        config.days_back
    )?;
    Ok(())
}

fn group_by_name(group_by: GroupBy) -> &'static str {
    match group_by {
        GroupBy::Type => "type",
        GroupBy::Sector => "sector",
        GroupBy::Role => "role",
        GroupBy::Name => "name",
    }
}
