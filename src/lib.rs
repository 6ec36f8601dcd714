#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Merge of selector outcomes into the output table.
pub mod aggregate;
/// Command-line runner behind the `sample_tweets` binary.
pub mod apps;
/// Sampling policy and run configuration types.
pub mod config;
/// Centralized constants used across selectors, sampler, and transport.
pub mod constants;
/// Row table types.
pub mod data;
/// Per-group count summaries.
pub mod metrics;
/// End-to-end sampling run.
pub mod pipeline;
/// Seedable RNG and per-group random sampling.
pub mod sampler;
/// Date and keyword group selectors.
pub mod selection;
/// Input and output transports (filesystem today).
pub mod transport;
/// Shared type aliases.
pub mod types;

mod errors;

pub use aggregate::aggregate;
pub use config::{SampleType, SamplingConfig, SamplingPolicy};
pub use data::{Columns, Row, RowTable};
pub use errors::SamplerError;
pub use pipeline::{GroupSummary, SamplingReport, run_sampling};
pub use sampler::{SeededRng, sample, sample_size};
pub use selection::dates::{DateGranularity, DateSpecifier, parse_periods, select_by_dates};
pub use selection::keywords::{Keyword, select_by_keywords};
pub use selection::{GroupSample, GroupSpecifier, SelectionOutcome};
pub use types::{ColumnName, FieldValue, GroupLabel, Seed};
