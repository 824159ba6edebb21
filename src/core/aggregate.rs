//! Sector/type bucketing with a binary role split.
//!
//! Pure function of the record snapshot and the filter; the result is a
//! value handed back to the caller, never shared state. Repeated calls on
//! the same input produce identical output.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::DrillmapConfig;
use crate::core::normalize::{is_practical_drill, read_role, read_sector, resolve_event_date};
use crate::core::types::ReviewRecord;

/// Date range and optional type filter. `from` and `to` are inclusive.
#[derive(Debug, Clone)]
pub struct AggregateFilter {
    pub from: DateTime<Utc>,
    pub to: Option<DateTime<Utc>>,
    pub type_filter: Option<String>,
}

/// Counts split by the distinguished-role classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSplit {
    pub distinguished: u64,
    pub other: u64,
}

impl RoleSplit {
    pub fn total(&self) -> u64 {
        self.distinguished + self.other
    }

    fn bump(&mut self, distinguished: bool) {
        if distinguished {
            self.distinguished += 1;
        } else {
            self.other += 1;
        }
    }
}

/// Per-sector buckets: counts by type label plus sector totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectorBuckets {
    pub by_type: BTreeMap<String, RoleSplit>,
    pub totals: RoleSplit,
}

impl SectorBuckets {
    /// Count a retained record at its (sector, type) bucket and in the
    /// sector totals.
    fn tally(&mut self, label: &str, distinguished: bool) {
        self.by_type.entry(label.to_string()).or_default().bump(distinguished);
        self.totals.bump(distinguished);
    }
}

/// Aggregation result. Every recognized sector is present, including those
/// with zero retained records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aggregation {
    pub by_sector: BTreeMap<String, SectorBuckets>,
    /// Sorted distinct type labels encountered (including the derived drill
    /// label when it was tallied).
    pub types: Vec<String>,
    /// Records retained after filtering.
    pub kept: usize,
}

/// Bucket records by sector and type within the filter's date range,
/// splitting counts by role class.
///
/// Inclusion checks apply in order and short-circuit: resolvable event date,
/// date within range, recognized sector, matching type when a type filter is
/// active. A dropped record contributes nothing; the drop is silent at this
/// level (callers surface kept-vs-fetched counts).
///
/// An audit-type record that also reports a practical drill is tallied a
/// second time under the configured drill label in the same sector, in both
/// the type bucket and the sector totals; one audit event feeds two
/// reporting buckets.
pub fn aggregate(
    records: &[ReviewRecord],
    filter: &AggregateFilter,
    config: &DrillmapConfig,
) -> Aggregation {
    let mut by_sector: BTreeMap<String, SectorBuckets> = config
        .sectors
        .iter()
        .map(|s| (s.clone(), SectorBuckets::default()))
        .collect();
    let mut types = BTreeSet::new();
    let mut kept = 0;

    for record in records {
        let Some(event) = resolve_event_date(record) else {
            continue;
        };
        if event < filter.from {
            continue;
        }
        if let Some(to) = filter.to {
            if event > to {
                continue;
            }
        }

        let sector = read_sector(record);
        let Some(bucket) = by_sector.get_mut(&sector) else {
            continue;
        };

        let base_type = record
            .record_type
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| config.unknown_label.clone());
        if let Some(wanted) = &filter.type_filter {
            if &base_type != wanted {
                continue;
            }
        }

        let distinguished = read_role(record) == config.distinguished_role;
        bucket.tally(&base_type, distinguished);
        types.insert(base_type.clone());

        if base_type == config.audit_type && is_practical_drill(record, &config.practical_marker) {
            bucket.tally(&config.drill_label, distinguished);
            types.insert(config.drill_label.clone());
        }

        kept += 1;
    }

    Aggregation {
        by_sector,
        types: types.into_iter().collect(),
        kept,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Meta, Timestamp};
    use chrono::TimeZone;

    fn record(sector: &str, record_type: &str, role: &str, day: u32) -> ReviewRecord {
        ReviewRecord {
            record_type: Some(record_type.to_string()),
            meta: Some(Meta {
                role: Some(role.to_string()),
                sector: Some(sector.to_string()),
                ..Default::default()
            }),
            created_at: Some(Timestamp::from(
                Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap(),
            )),
            ..Default::default()
        }
    }

    fn wide_filter() -> AggregateFilter {
        AggregateFilter {
            from: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            to: None,
            type_filter: None,
        }
    }

    #[test]
    fn unrecognized_sector_contributes_nothing() {
        let config = DrillmapConfig::default();
        let records = vec![record("עמק", "סיור", "אחר", 1)];
        let agg = aggregate(&records, &wide_filter(), &config);
        assert_eq!(agg.kept, 0);
        let total: u64 = agg.by_sector.values().map(|b| b.totals.total()).sum();
        assert_eq!(total, 0);
        // All recognized sectors still present at zero.
        assert_eq!(agg.by_sector.len(), config.sectors.len());
    }

    #[test]
    fn counts_partition_by_role() {
        let config = DrillmapConfig::default();
        let records = vec![
            record("איתמר", "סיור", "צמ\"מ", 1),
            record("איתמר", "סיור", "צמ\u{05F4}מ", 2),
            record("איתמר", "סיור", "מפקד", 3),
        ];
        let agg = aggregate(&records, &wide_filter(), &config);
        let bucket = &agg.by_sector["איתמר"].by_type["סיור"];
        assert_eq!(bucket.distinguished, 2);
        assert_eq!(bucket.other, 1);
        assert_eq!(bucket.total(), 3);
        assert_eq!(agg.by_sector["איתמר"].totals.total(), 3);
    }

    #[test]
    fn date_bounds_are_inclusive_and_ordered() {
        let config = DrillmapConfig::default();
        let records = vec![
            record("ברכה", "סיור", "אחר", 1),
            record("ברכה", "סיור", "אחר", 15),
            record("ברכה", "סיור", "אחר", 30),
        ];
        let filter = AggregateFilter {
            from: Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap(),
            to: Some(Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()),
            type_filter: None,
        };
        let agg = aggregate(&records, &filter, &config);
        assert_eq!(agg.kept, 1);
    }

    #[test]
    fn record_before_from_is_excluded_despite_valid_sector_and_type() {
        let config = DrillmapConfig::default();
        let records = vec![record("ברכה", "סיור", "צמ\"מ", 1)];
        let filter = AggregateFilter {
            from: Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap(),
            to: None,
            type_filter: None,
        };
        let agg = aggregate(&records, &filter, &config);
        assert_eq!(agg.kept, 0);
        assert!(agg.types.is_empty());
    }

    #[test]
    fn type_filter_drops_other_types() {
        let config = DrillmapConfig::default();
        let records = vec![
            record("ברכה", "סיור", "אחר", 1),
            record("ברכה", "מארב", "אחר", 2),
        ];
        let filter = AggregateFilter {
            type_filter: Some("סיור".to_string()),
            ..wide_filter()
        };
        let agg = aggregate(&records, &filter, &config);
        assert_eq!(agg.kept, 1);
        assert_eq!(agg.types, vec!["סיור".to_string()]);
    }

    #[test]
    fn missing_type_counts_under_unknown_label() {
        let config = DrillmapConfig::default();
        let mut r = record("ברכה", "x", "אחר", 1);
        r.record_type = None;
        let agg = aggregate(&[r], &wide_filter(), &config);
        assert_eq!(agg.types, vec![config.unknown_label.clone()]);
    }

    #[test]
    fn practical_audit_also_counts_as_mission_drill() {
        let config = DrillmapConfig::default();
        let mut r = record("ברכה", &config.audit_type, "מפקד", 1);
        r.training_kind = Some("מעשי".to_string());
        let agg = aggregate(&[r], &wide_filter(), &config);

        let buckets = &agg.by_sector["ברכה"];
        assert_eq!(buckets.by_type[&config.audit_type].other, 1);
        assert_eq!(buckets.by_type[&config.drill_label].other, 1);
        // The derived drill tally counts in the sector totals as well, so
        // one physical record shows up twice there.
        assert_eq!(buckets.totals.total(), 2);
        assert!(agg.types.contains(&config.drill_label));
        assert_eq!(agg.kept, 1);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let config = DrillmapConfig::default();
        let records = vec![
            record("ברכה", "סיור", "צמ\"מ", 3),
            record("איתמר", "מארב", "אחר", 4),
        ];
        let filter = wide_filter();
        let first = aggregate(&records, &filter, &config);
        let second = aggregate(&records, &filter, &config);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
