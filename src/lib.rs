// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod formatting;
pub mod io;
pub mod summary;

// Re-export commonly used types
pub use crate::config::{ConfigError, DrillmapConfig, ScoringWeights};

pub use crate::core::{
    aggregate::{aggregate, AggregateFilter, Aggregation, RoleSplit, SectorBuckets},
    normalize::{
        created_date, is_practical_drill, normalize_role, read_role, read_sector,
        resolve_event_date, training_kind,
    },
    score::{compute_scores, legacy_average, to_100},
    stats::{group_counts, GroupBy, GroupCounts, StatsFilter},
    types::{AuditRatings, ForceTraining, Meta, Rating, ReviewRecord, ScoreBreakdown, Timestamp},
};

pub use crate::io::output::{create_writer, AggregateReport, OutputFormat, OutputWriter};
pub use crate::io::source::{fetch_all, JsonFileSource, RecordSource};

pub use crate::summary::build_whatsapp_text;
