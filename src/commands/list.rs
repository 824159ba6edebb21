use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};

use crate::commands::{load_config, load_records, range_start};
use crate::config::DrillmapConfig;
use crate::core::normalize::created_date;
use crate::core::score::{compute_scores, legacy_average};
use crate::core::types::ReviewRecord;
use crate::formatting::{fmt_timestamp, PLACEHOLDER};

pub struct ListConfig {
    pub input: PathBuf,
    pub days_back: u32,
    pub type_filter: Option<String>,
    pub sector: Option<String>,
    pub name: Option<String>,
    pub limit: usize,
    pub config_file: Option<PathBuf>,
}

pub fn handle_list(config: ListConfig) -> Result<()> {
    let app_config = load_config(config.config_file.as_deref())?;
    let records = load_records(&config.input, &app_config)?;

    let since = range_start(None, config.days_back);
    let name_needle = config.name.as_deref().map(str::to_lowercase);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Date", "Type", "Sector", "Name", "Role", "Force", "Score"]);

    let mut shown = 0;
    for record in &records {
        if shown >= config.limit {
            break;
        }
        let Some(created) = created_date(record) else {
            continue;
        };
        if created < since {
            continue;
        }

        let meta = record.meta.as_ref();
        let sector = meta.and_then(|m| m.sector.as_deref()).unwrap_or("");
        if let Some(wanted) = &config.sector {
            if sector != wanted {
                continue;
            }
        }
        let record_type = record.record_type.as_deref().unwrap_or("");
        if let Some(wanted) = &config.type_filter {
            if record_type != wanted {
                continue;
            }
        }
        if let Some(needle) = &name_needle {
            let name = meta.and_then(|m| m.name.as_deref()).unwrap_or("");
            if !name.to_lowercase().contains(needle) {
                continue;
            }
        }

        table.add_row(vec![
            fmt_timestamp(record.event_at.as_ref().or(record.created_at.as_ref())),
            non_empty(record_type),
            non_empty(sector),
            non_empty(meta.and_then(|m| m.name.as_deref()).unwrap_or("")),
            non_empty(meta.and_then(|m| m.role.as_deref()).unwrap_or("")),
            non_empty(meta.and_then(|m| m.force.as_deref()).unwrap_or("")),
            score_display(record, &app_config),
        ]);
        shown += 1;
    }

    let mut stdout = std::io::stdout();
    writeln!(stdout, "{table}")?;
    writeln!(stdout, "showing {shown} of {} fetched records", records.len())?;
    Ok(())
}

/// Score column: the persisted overall score when present, else the computed
/// weighted score, else the legacy plain average for v1 records.
pub(crate) fn score_display(record: &ReviewRecord, config: &DrillmapConfig) -> String {
    if record.record_type.as_deref() != Some(config.audit_type.as_str()) {
        return PLACEHOLDER.to_string();
    }
    let Some(audit) = &record.audit else {
        return PLACEHOLDER.to_string();
    };

    let persisted = record.score.as_ref().and_then(|s| s.overall_100);
    let overall = persisted.or_else(|| compute_scores(audit, &config.weights).overall_100);
    if let Some(overall) = overall {
        return overall.to_string();
    }
    match legacy_average(audit) {
        Some(avg) => format!("{avg:.1}/5"),
        None => PLACEHOLDER.to_string(),
    }
}

fn non_empty(s: &str) -> String {
    if s.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AuditRatings, ScoreBreakdown};

    fn audit_record(audit: AuditRatings) -> ReviewRecord {
        ReviewRecord {
            record_type: Some(DrillmapConfig::default().audit_type),
            audit: Some(audit),
            ..Default::default()
        }
    }

    #[test]
    fn non_audit_records_show_placeholder() {
        let config = DrillmapConfig::default();
        let record = ReviewRecord {
            record_type: Some("סיור".to_string()),
            ..Default::default()
        };
        assert_eq!(score_display(&record, &config), PLACEHOLDER);
    }

    #[test]
    fn persisted_score_wins_over_computed() {
        let config = DrillmapConfig::default();
        let mut record = audit_record(AuditRatings {
            pos_sector: Some(5.0.into()),
            ..Default::default()
        });
        record.score = Some(ScoreBreakdown {
            overall_100: Some(73),
            ..Default::default()
        });
        assert_eq!(score_display(&record, &config), "73");
    }

    #[test]
    fn v2_ratings_compute_when_no_persisted_score() {
        let config = DrillmapConfig::default();
        let record = audit_record(AuditRatings {
            pos_sector: Some(4.0.into()),
            ..Default::default()
        });
        assert_eq!(score_display(&record, &config), "80");
    }

    #[test]
    fn v1_records_fall_back_to_legacy_average() {
        let config = DrillmapConfig::default();
        let record = audit_record(AuditRatings {
            discipline: Some(4.0.into()),
            knowledge: Some(3.0.into()),
            ..Default::default()
        });
        assert_eq!(score_display(&record, &config), "3.5/5");
    }
}
