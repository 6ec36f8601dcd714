use std::io;

use thiserror::Error;

/// Error type for configuration, sampling-policy, and table IO failures.
#[derive(Debug, Error)]
pub enum SamplerError {
    /// Bad input: malformed periods, missing columns, unreadable stopwords.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Sampling size out of range, or a count above the table size.
    #[error("invalid sampling policy: {0}")]
    InvalidPolicy(String),
    /// Neither the date nor the keyword selector is enabled.
    #[error(
        "no sampling method is provided; enable at least one of stopword or time-period sampling"
    )]
    NoSamplingMethodSpecified,
    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Delimited-file read or write failure.
    #[error("table error: {0}")]
    Csv(#[from] csv::Error),
}
