//! Report rendering for the aggregate command.
//!
//! The `OutputWriter` trait decouples report content from its rendering;
//! JSON for machine consumers, markdown for pasting into documents, and a
//! table layout for the terminal.

use std::io::Write;

use chrono::{DateTime, Utc};
use colored::*;
use comfy_table::{presets::UTF8_FULL, Table};
use serde::{Deserialize, Serialize};

use crate::config::DrillmapConfig;
use crate::core::aggregate::{AggregateFilter, Aggregation, RoleSplit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

/// Aggregation result flattened for rendering: sectors in configured
/// display order, filter echoed back, fetched-vs-kept surfaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateReport {
    pub generated_at: DateTime<Utc>,
    pub from: DateTime<Utc>,
    pub to: Option<DateTime<Utc>>,
    pub type_filter: Option<String>,
    pub fetched: usize,
    pub kept: usize,
    pub types: Vec<String>,
    pub sectors: Vec<SectorReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorReport {
    pub sector: String,
    pub totals: RoleSplit,
    pub by_type: Vec<TypeCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeCount {
    pub label: String,
    pub distinguished: u64,
    pub other: u64,
}

impl AggregateReport {
    pub fn new(
        aggregation: &Aggregation,
        filter: &AggregateFilter,
        config: &DrillmapConfig,
        fetched: usize,
    ) -> Self {
        let sectors = config
            .sectors
            .iter()
            .filter_map(|name| aggregation.by_sector.get(name).map(|buckets| (name, buckets)))
            .map(|(name, buckets)| SectorReport {
                sector: name.clone(),
                totals: buckets.totals,
                by_type: buckets
                    .by_type
                    .iter()
                    .map(|(label, split)| TypeCount {
                        label: label.clone(),
                        distinguished: split.distinguished,
                        other: split.other,
                    })
                    .collect(),
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            from: filter.from,
            to: filter.to,
            type_filter: filter.type_filter.clone(),
            fetched,
            kept: aggregation.kept,
            types: aggregation.types.clone(),
            sectors,
        }
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &AggregateReport) -> anyhow::Result<()>;
}

pub fn create_writer(format: OutputFormat, writer: Box<dyn Write>) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AggregateReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, report: &AggregateReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Review Aggregation Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        let range_end = report
            .to
            .map(|to| to.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "now".to_string());
        writeln!(
            self.writer,
            "Range: {} to {}",
            report.from.format("%Y-%m-%d"),
            range_end
        )?;
        if let Some(type_filter) = &report.type_filter {
            writeln!(self.writer, "Type filter: {type_filter}")?;
        }
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Kept {} of {} fetched records.",
            report.kept, report.fetched
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_sector(&mut self, sector: &SectorReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## {}", sector.sector)?;
        writeln!(self.writer)?;
        if sector.by_type.is_empty() {
            writeln!(self.writer, "No records.")?;
            writeln!(self.writer)?;
            return Ok(());
        }
        writeln!(self.writer, "| Type | Distinguished | Other | Total |")?;
        writeln!(self.writer, "|------|---------------|-------|-------|")?;
        for row in &sector.by_type {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} |",
                row.label,
                row.distinguished,
                row.other,
                row.distinguished + row.other
            )?;
        }
        writeln!(
            self.writer,
            "| **Total** | {} | {} | {} |",
            sector.totals.distinguished,
            sector.totals.other,
            sector.totals.total()
        )?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &AggregateReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        for sector in &report.sectors {
            self.write_sector(sector)?;
        }
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &AggregateReport) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{} {} of {} records kept",
            "aggregate:".bold(),
            report.kept,
            report.fetched
        )?;
        writeln!(self.writer)?;

        for sector in &report.sectors {
            writeln!(self.writer, "{}", sector.sector.bold().cyan())?;
            if sector.by_type.is_empty() {
                writeln!(self.writer, "  (no records)")?;
                writeln!(self.writer)?;
                continue;
            }
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Type", "Distinguished", "Other", "Total"]);
            for row in &sector.by_type {
                table.add_row(vec![
                    row.label.clone(),
                    row.distinguished.to_string(),
                    row.other.to_string(),
                    (row.distinguished + row.other).to_string(),
                ]);
            }
            table.add_row(vec![
                "Total".to_string(),
                sector.totals.distinguished.to_string(),
                sector.totals.other.to_string(),
                sector.totals.total().to_string(),
            ]);
            writeln!(self.writer, "{table}")?;
            writeln!(self.writer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregate::aggregate;
    use crate::core::types::{Meta, ReviewRecord, Timestamp};
    use chrono::TimeZone;

    fn sample_report() -> AggregateReport {
        let config = DrillmapConfig::default();
        let records = vec![ReviewRecord {
            record_type: Some("סיור".to_string()),
            meta: Some(Meta {
                sector: Some("ברכה".to_string()),
                role: Some("אחר".to_string()),
                ..Default::default()
            }),
            created_at: Some(Timestamp::from(
                Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(),
            )),
            ..Default::default()
        }];
        let filter = AggregateFilter {
            from: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            to: None,
            type_filter: None,
        };
        let aggregation = aggregate(&records, &filter, &config);
        AggregateReport::new(&aggregation, &filter, &config, records.len())
    }

    #[test]
    fn report_keeps_configured_sector_order() {
        let report = sample_report();
        let order: Vec<&str> = report.sectors.iter().map(|s| s.sector.as_str()).collect();
        assert_eq!(order, vec!["אלון מורה", "איתמר", "ברכה", "לב השומרון"]);
    }

    #[test]
    fn json_writer_emits_parseable_report() {
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer)
            .write_report(&sample_report())
            .unwrap();
        let parsed: AggregateReport = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed.kept, 1);
        assert_eq!(parsed.fetched, 1);
    }

    #[test]
    fn markdown_writer_includes_sector_tables() {
        let mut buffer = Vec::new();
        MarkdownWriter::new(&mut buffer)
            .write_report(&sample_report())
            .unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("# Review Aggregation Report"));
        assert!(output.contains("## ברכה"));
        assert!(output.contains("| סיור | 0 | 1 | 1 |"));
        assert!(output.contains("No records."));
    }
}
