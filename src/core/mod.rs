//! Core review-record engine: record model, normalization, aggregation,
//! scoring, and group-by statistics. Everything here is a stateless pure
//! transformation over record snapshots; all I/O lives in `crate::io` and
//! `crate::commands`.

pub mod aggregate;
pub mod normalize;
pub mod score;
pub mod stats;
pub mod types;

pub use aggregate::{aggregate, AggregateFilter, Aggregation, RoleSplit, SectorBuckets};
pub use score::{compute_scores, legacy_average};
pub use stats::{group_counts, GroupBy, GroupCounts, StatsFilter};
pub use types::{
    AuditRatings, ForceTraining, Meta, ProviderTimestamp, Rating, ReviewRecord, ScoreBreakdown,
    Sections, Timestamp, TrainingSection,
};
