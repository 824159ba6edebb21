pub mod output;
pub mod source;

pub use output::{create_writer, AggregateReport, OutputFormat, OutputWriter};
pub use source::{fetch_all, JsonFileSource, RecordSource};
