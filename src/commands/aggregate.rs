use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use log::info;

use crate::commands::{load_config, load_records, open_destination, range_end, range_start};
use crate::core::aggregate::{aggregate, AggregateFilter};
use crate::io::output::{create_writer, AggregateReport, OutputFormat};

pub struct AggregateConfig {
    pub input: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub days_back: u32,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub type_filter: Option<String>,
    pub config_file: Option<PathBuf>,
}

pub fn handle_aggregate(config: AggregateConfig) -> Result<()> {
    let app_config = load_config(config.config_file.as_deref())?;
    let records = load_records(&config.input, &app_config)?;

    let filter = AggregateFilter {
        from: range_start(config.from, config.days_back),
        to: range_end(config.to)?,
        type_filter: config.type_filter,
    };

    let aggregation = aggregate(&records, &filter, &app_config);
    info!(
        "aggregated {} of {} fetched records",
        aggregation.kept,
        records.len()
    );

    let report = AggregateReport::new(&aggregation, &filter, &app_config, records.len());
    let destination = open_destination(config.output.as_ref())?;
    create_writer(config.format, destination).write_report(&report)?;
    Ok(())
}
