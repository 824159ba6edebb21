//! Group-by count statistics over review records.
//!
//! The simpler of the two reporting views: one key per record, counted into
//! a map. Filters run on the record-creation time, matching how the store's
//! own queries were indexed (the aggregator, by contrast, resolves the
//! reported event time).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::normalize::created_date;
use crate::core::types::ReviewRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Type,
    Sector,
    Role,
    Name,
}

/// Creation-time window plus raw-field equality filters.
#[derive(Debug, Clone)]
pub struct StatsFilter {
    pub since: DateTime<Utc>,
    pub until: Option<DateTime<Utc>>,
    pub sector: Option<String>,
    pub record_type: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupCounts {
    pub counts: BTreeMap<String, u64>,
    pub kept: usize,
}

/// Count records per group key. Records with no resolvable creation time or
/// outside the window are dropped; a missing group field counts under
/// `unknown_label`. Equality filters compare the raw stored fields, not
/// normalized views, so the filter values round-trip from the data itself.
pub fn group_counts(
    records: &[ReviewRecord],
    group_by: GroupBy,
    filter: &StatsFilter,
    unknown_label: &str,
) -> GroupCounts {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut kept = 0;

    for record in records {
        let Some(created) = created_date(record) else {
            continue;
        };
        if created < filter.since {
            continue;
        }
        if let Some(until) = filter.until {
            if created > until {
                continue;
            }
        }

        let meta = record.meta.as_ref();
        let sector = meta.and_then(|m| m.sector.as_deref()).unwrap_or("");
        let role = meta.and_then(|m| m.role.as_deref()).unwrap_or("");
        let record_type = record.record_type.as_deref().unwrap_or("");

        if let Some(wanted) = &filter.sector {
            if sector != wanted {
                continue;
            }
        }
        if let Some(wanted) = &filter.record_type {
            if record_type != wanted {
                continue;
            }
        }
        if let Some(wanted) = &filter.role {
            if role != wanted {
                continue;
            }
        }

        let key = match group_by {
            GroupBy::Type => record_type,
            GroupBy::Sector => sector,
            GroupBy::Role => role,
            GroupBy::Name => meta.and_then(|m| m.name.as_deref()).unwrap_or(""),
        };
        let key = if key.is_empty() { unknown_label } else { key };

        *counts.entry(key.to_string()).or_insert(0) += 1;
        kept += 1;
    }

    GroupCounts { counts, kept }
}
