use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
    Markdown,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => Self::Terminal,
            OutputFormat::Json => Self::Json,
            OutputFormat::Markdown => Self::Markdown,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GroupByArg {
    Type,
    Sector,
    Role,
    Name,
}

impl From<GroupByArg> for crate::core::stats::GroupBy {
    fn from(group_by: GroupByArg) -> Self {
        match group_by {
            GroupByArg::Type => Self::Type,
            GroupByArg::Sector => Self::Sector,
            GroupByArg::Role => Self::Role,
            GroupByArg::Name => Self::Name,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "drillmap")]
#[command(about = "Operational review aggregation and scoring toolkit", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Aggregate records by sector and type, split by role class
    Aggregate {
        /// JSON records export to read
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Look-back window in days (ignored when --from is set)
        #[arg(long, default_value = "30")]
        days_back: u32,

        /// Range start date (inclusive), YYYY-MM-DD
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Range end date (inclusive, whole day), YYYY-MM-DD
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Only count records of this type
        #[arg(long = "type")]
        type_filter: Option<String>,

        /// Config file (defaults to drillmap.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Count records per type, sector, role, or name
    Stats {
        /// JSON records export to read
        input: PathBuf,

        #[arg(long, value_enum, default_value = "type")]
        group_by: GroupByArg,

        /// Look-back window in days
        #[arg(long, default_value = "30")]
        days_back: u32,

        /// Only count records with this sector
        #[arg(long)]
        sector: Option<String>,

        /// Only count records of this type
        #[arg(long = "type")]
        type_filter: Option<String>,

        /// Only count records with this role
        #[arg(long)]
        role: Option<String>,

        /// Emit JSON instead of the terminal table
        #[arg(long)]
        json: bool,

        /// Config file (defaults to drillmap.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List records with their scores
    List {
        /// JSON records export to read
        input: PathBuf,

        /// Look-back window in days
        #[arg(long, default_value = "30")]
        days_back: u32,

        /// Only list records of this type
        #[arg(long = "type")]
        type_filter: Option<String>,

        /// Only list records with this sector
        #[arg(long)]
        sector: Option<String>,

        /// Case-insensitive substring match on the reviewer name
        #[arg(long)]
        name: Option<String>,

        /// Maximum rows to show
        #[arg(long, default_value = "200")]
        limit: usize,

        /// Config file (defaults to drillmap.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the WhatsApp-formatted summary of one record
    Summary {
        /// JSON records export to read
        input: PathBuf,

        /// Record id (defaults to the most recent record)
        #[arg(long)]
        id: Option<String>,

        /// Also copy the summary to the clipboard
        #[arg(long)]
        copy: bool,

        /// Config file (defaults to drillmap.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Re-export all records in the canonical layout
    Export {
        /// JSON records export to read
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Config file (defaults to drillmap.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}
