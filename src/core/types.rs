//! Record model for operational review documents.
//!
//! The collection accumulated several schema layouts over time: fields moved
//! between the document root and the nested `meta` object, the audit block
//! grew from 5 to 12 rating fields, and timestamps appear in three different
//! encodings. The types here deserialize every historical layout; the
//! normalizer (`core::normalize`) resolves which location wins.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single review record, as exported from the document store.
///
/// Records are read-only snapshots. All fields are optional because no
/// schema version guarantees all of them; consumers go through the
/// normalizer rather than reading ambiguous fields directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewRecord {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub record_type: Option<String>,
    pub meta: Option<Meta>,
    /// Legacy root-level role (pre-`meta` layouts). Takes precedence.
    pub role: Option<String>,
    /// Legacy root-level sector.
    pub sector: Option<String>,
    #[serde(rename = "trainingKind")]
    pub training_kind: Option<String>,
    #[serde(rename = "forceTrainingType")]
    pub force_training_type: Option<String>,
    pub sections: Option<Sections>,
    #[serde(rename = "eventAt")]
    pub event_at: Option<Timestamp>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<Timestamp>,
    pub audit: Option<AuditRatings>,
    /// Persisted scorer output, when the form computed it at save time.
    pub score: Option<ScoreBreakdown>,
    pub notes: Option<String>,
    pub gaps: Option<String>,
    #[serde(rename = "exerciseDescription")]
    pub exercise_description: Option<String>,
    pub keep: Option<Vec<String>>,
    pub improve: Option<Vec<String>>,
    #[serde(rename = "schemaVersion")]
    pub schema_version: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    pub role: Option<String>,
    pub name: Option<String>,
    pub sector: Option<String>,
    pub force: Option<String>,
    #[serde(rename = "trainingKind")]
    pub training_kind: Option<String>,
}

/// Nested sections introduced by later form versions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Sections {
    pub training: Option<TrainingSection>,
    #[serde(rename = "forceTraining")]
    pub force_training: Option<TrainingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingSection {
    pub kind: Option<String>,
}

/// Timestamp as stored in exports: either an RFC 3339 string, the document
/// store's native `{seconds, nanoseconds}` object, or some other string a
/// legacy client wrote. Converted once at the boundary; anything that does
/// not parse resolves to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    DateTime(DateTime<Utc>),
    Provider(ProviderTimestamp),
    Iso(String),
}

/// The store's native timestamp shape. Exports spell the fields either
/// `seconds`/`nanoseconds` or `_seconds`/`_nanoseconds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderTimestamp {
    #[serde(alias = "_seconds")]
    pub seconds: i64,
    #[serde(default, alias = "_nanoseconds", alias = "nanos")]
    pub nanoseconds: u32,
}

impl Timestamp {
    /// Total conversion to UTC. Unparseable input yields `None`, never an
    /// error.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::DateTime(dt) => Some(*dt),
            Timestamp::Provider(p) => DateTime::from_timestamp(p.seconds, p.nanoseconds),
            Timestamp::Iso(raw) => parse_loose_datetime(raw),
        }
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp::DateTime(dt)
    }
}

fn parse_loose_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // datetime-local inputs: no zone, seconds optional
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    None
}

/// A 1-5 rating field. Historical sentinels for "not applicable" include the
/// string `"na"`, the number 0, and an absent field; all of them are excluded
/// from every average this field would otherwise contribute to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rating {
    Value(f64),
    Sentinel(String),
}

impl Rating {
    /// Returns the numeric value when this rating should count toward an
    /// average. Zero is never a legitimate rating in the 1-5 domain.
    pub fn eligible(&self) -> Option<f64> {
        match self {
            Rating::Value(v) if v.is_finite() && *v > 0.0 => Some(*v),
            _ => None,
        }
    }

    /// Numeric value regardless of eligibility, for display.
    pub fn numeric(&self) -> Option<f64> {
        match self {
            Rating::Value(v) => Some(*v),
            Rating::Sentinel(_) => None,
        }
    }
}

impl From<f64> for Rating {
    fn from(v: f64) -> Self {
        Rating::Value(v)
    }
}

/// Audit rating fields across every schema version. Current (v2) records
/// carry the twelve weighted fields; v1 records carry `appearance` plus the
/// six legacy fields below it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuditRatings {
    // v2 operational group
    pub pos_sector: Option<Rating>,
    pub mission_briefing: Option<Rating>,
    pub sector_history: Option<Rating>,
    pub threat_understanding: Option<Rating>,
    pub appearance: Option<Rating>,
    pub effort: Option<Rating>,
    pub drills: Option<Rating>,
    pub roe: Option<Rating>,
    // v2 technical group
    pub systems: Option<Rating>,
    pub communication: Option<Rating>,
    // v2 intelligence / medical groups
    pub intel_tools: Option<Rating>,
    pub medical: Option<Rating>,
    // v1 legacy fields (appearance shared with v2)
    pub discipline: Option<Rating>,
    pub knowledge: Option<Rating>,
    pub readiness: Option<Rating>,
    pub cleanliness: Option<Rating>,
    pub mission_delivery_quality: Option<Rating>,
    pub mission_mastery: Option<Rating>,
    pub force_training: Option<ForceTraining>,
}

/// Whether the visited force ran a drill during the audit, and of what kind
/// (`methodical` or `practical`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForceTraining {
    pub trained: Option<String>,
    pub training_type: Option<String>,
}

/// Weighted score output. Every component is independently nullable: a group
/// with no eligible ratings has no average, and a record with no scoring
/// group at all has no overall score.
///
/// Field renames match the persisted `score` object written by the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreBreakdown {
    #[serde(rename = "overall100")]
    pub overall_100: Option<u32>,
    #[serde(rename = "overallAvg5")]
    pub overall_avg5: Option<f64>,
    #[serde(rename = "operational100")]
    pub operational_100: Option<u32>,
    #[serde(rename = "tech100")]
    pub tech_100: Option<u32>,
    #[serde(rename = "intel100")]
    pub intel_100: Option<u32>,
    #[serde(rename = "medical100")]
    pub medical_100: Option<u32>,
}
