//! Canonical views over ambiguous record fields.
//!
//! Every function here is total: absent or malformed input resolves to an
//! empty string or `None`, never a panic or an error. This is the single
//! place that knows every historical field location, so aggregation and
//! scoring never branch on schema versions themselves.

use chrono::{DateTime, Utc};

use crate::core::types::{ReviewRecord, Timestamp};

/// Quote variants seen in role strings: Hebrew gershayim and the two smart
/// double quotes, all folded to a plain `"`.
pub fn normalize_role(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '\u{05F4}' | '\u{201C}' | '\u{201D}' => '"',
            other => other,
        })
        .collect()
}

/// Role with the root-level field taking precedence over `meta.role`,
/// normalized. Empty strings fall through to the next location.
pub fn read_role(record: &ReviewRecord) -> String {
    let raw = record
        .role
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| {
            record
                .meta
                .as_ref()
                .and_then(|m| m.role.as_deref())
                .filter(|s| !s.is_empty())
        })
        .unwrap_or("");
    normalize_role(raw)
}

/// Sector from the root-level field, else `meta.sector`, else empty; trimmed.
pub fn read_sector(record: &ReviewRecord) -> String {
    record
        .sector
        .as_deref()
        .or_else(|| record.meta.as_ref().and_then(|m| m.sector.as_deref()))
        .unwrap_or("")
        .trim()
        .to_string()
}

/// Event-reported time, falling back to record-creation time. `None` when
/// neither resolves.
pub fn resolve_event_date(record: &ReviewRecord) -> Option<DateTime<Utc>> {
    record
        .event_at
        .as_ref()
        .and_then(Timestamp::to_utc)
        .or_else(|| created_date(record))
}

/// Record-creation time alone. Group-by statistics filter on this, matching
/// how the store's queries were indexed.
pub fn created_date(record: &ReviewRecord) -> Option<DateTime<Utc>> {
    record.created_at.as_ref().and_then(Timestamp::to_utc)
}

/// Training kind across every legacy location, in priority order. The first
/// candidate that is non-empty after trimming wins.
pub fn training_kind(record: &ReviewRecord) -> Option<String> {
    let candidates = [
        record
            .sections
            .as_ref()
            .and_then(|s| s.training.as_ref())
            .and_then(|t| t.kind.as_deref()),
        record
            .sections
            .as_ref()
            .and_then(|s| s.force_training.as_ref())
            .and_then(|t| t.kind.as_deref()),
        record.meta.as_ref().and_then(|m| m.training_kind.as_deref()),
        record.training_kind.as_deref(),
        record.force_training_type.as_deref(),
    ];
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(String::from)
}

/// True when the record reports a practical drill (`marker` is the
/// configured practical-training label).
pub fn is_practical_drill(record: &ReviewRecord, marker: &str) -> bool {
    training_kind(record).as_deref() == Some(marker)
}
