use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use chrono::SecondsFormat;
use log::info;
use serde::Serialize;

use crate::commands::{load_config, load_records, open_destination};
use crate::config::DrillmapConfig;
use crate::core::normalize::{read_role, read_sector};
use crate::core::score::compute_scores;
use crate::core::types::{AuditRatings, ReviewRecord, ScoreBreakdown, Timestamp};

pub struct ExportConfig {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
}

/// One record in the canonical layout: every legacy field location resolved
/// through the normalizer, timestamps as ISO strings, and a score attached
/// to audit records that never persisted one.
#[derive(Debug, Serialize)]
struct CanonicalRecord {
    id: Option<String>,
    #[serde(rename = "createdAt")]
    created_at: Option<String>,
    #[serde(rename = "eventAt")]
    event_at: Option<String>,
    #[serde(rename = "schemaVersion")]
    schema_version: Option<u32>,
    #[serde(rename = "type")]
    record_type: Option<String>,
    meta: CanonicalMeta,
    audit: Option<AuditRatings>,
    score: Option<ScoreBreakdown>,
    #[serde(rename = "exerciseDescription")]
    exercise_description: Option<String>,
    gaps: Option<String>,
    notes: Option<String>,
    keep: Vec<String>,
    improve: Vec<String>,
}

#[derive(Debug, Serialize)]
struct CanonicalMeta {
    role: String,
    name: Option<String>,
    sector: String,
    force: Option<String>,
}

pub fn handle_export(config: ExportConfig) -> Result<()> {
    let app_config = load_config(config.config_file.as_deref())?;
    let records = load_records(&config.input, &app_config)?;

    let canonical: Vec<CanonicalRecord> = records
        .iter()
        .map(|record| canonicalize(record, &app_config))
        .collect();
    info!("exporting {} records", canonical.len());

    let mut destination = open_destination(config.output.as_ref())?;
    serde_json::to_writer_pretty(&mut destination, &canonical)?;
    writeln!(destination)?;
    Ok(())
}

fn canonicalize(record: &ReviewRecord, config: &DrillmapConfig) -> CanonicalRecord {
    let is_audit = record.record_type.as_deref() == Some(config.audit_type.as_str());
    let score = record.score.clone().or_else(|| {
        if is_audit {
            record
                .audit
                .as_ref()
                .map(|audit| compute_scores(audit, &config.weights))
        } else {
            None
        }
    });

    CanonicalRecord {
        id: record.id.clone(),
        created_at: iso(record.created_at.as_ref()),
        event_at: iso(record.event_at.as_ref()),
        schema_version: record.schema_version,
        record_type: record.record_type.clone(),
        meta: CanonicalMeta {
            role: read_role(record),
            name: record.meta.as_ref().and_then(|m| m.name.clone()),
            sector: read_sector(record),
            force: record.meta.as_ref().and_then(|m| m.force.clone()),
        },
        audit: record.audit.clone(),
        score,
        exercise_description: record.exercise_description.clone(),
        gaps: record.gaps.clone(),
        notes: record.notes.clone(),
        keep: record.keep.clone().unwrap_or_default(),
        improve: record.improve.clone().unwrap_or_default(),
    }
}

fn iso(ts: Option<&Timestamp>) -> Option<String> {
    ts.and_then(Timestamp::to_utc)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Meta;
    use chrono::{TimeZone, Utc};

    #[test]
    fn canonicalize_resolves_legacy_fields_and_attaches_score() {
        let config = DrillmapConfig::default();
        let record = ReviewRecord {
            id: Some("abc".to_string()),
            record_type: Some(config.audit_type.clone()),
            role: Some("צמ\u{05F4}מ".to_string()),
            meta: Some(Meta {
                sector: Some(" ברכה ".to_string()),
                ..Default::default()
            }),
            created_at: Some(Timestamp::from(
                Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(),
            )),
            audit: Some(AuditRatings {
                pos_sector: Some(4.0.into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let canonical = canonicalize(&record, &config);
        assert_eq!(canonical.meta.role, "צמ\"מ");
        assert_eq!(canonical.meta.sector, "ברכה");
        assert_eq!(canonical.created_at.as_deref(), Some("2024-06-01T10:00:00.000Z"));
        assert_eq!(canonical.score.as_ref().and_then(|s| s.overall_100), Some(80));
    }

    #[test]
    fn persisted_score_is_not_recomputed() {
        let config = DrillmapConfig::default();
        let record = ReviewRecord {
            record_type: Some(config.audit_type.clone()),
            score: Some(ScoreBreakdown {
                overall_100: Some(60),
                ..Default::default()
            }),
            audit: Some(AuditRatings {
                pos_sector: Some(5.0.into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let canonical = canonicalize(&record, &config);
        assert_eq!(canonical.score.as_ref().and_then(|s| s.overall_100), Some(60));
    }
}
