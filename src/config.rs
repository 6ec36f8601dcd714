use std::fmt;

use crate::errors::SamplerError;
use crate::selection::dates::DateSpecifier;
use crate::selection::keywords::Keyword;
use crate::types::Seed;

/// How the requested sample size is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleType {
    /// Size is a fraction of each group.
    Fraction,
    /// Size is a row count per group.
    Number,
}

/// Per-group sampling rule shared by every group of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SamplingPolicy {
    /// Sample `round(f * group_len)` rows, `f` in `(0, 1]`.
    Fraction(f64),
    /// Sample `min(n, group_len)` rows.
    Count(usize),
}

impl SamplingPolicy {
    /// Build a policy from a sample type and a real-valued size.
    ///
    /// Counts are truncated toward zero, so `12.9` requests 12 rows.
    pub fn new(sample_type: SampleType, size: f64) -> Result<Self, SamplerError> {
        match sample_type {
            SampleType::Fraction => Self::fraction(size),
            SampleType::Number => Self::count(size),
        }
    }

    /// Fraction policy; `f` must lie in `(0, 1]`.
    pub fn fraction(f: f64) -> Result<Self, SamplerError> {
        if !(f > 0.0 && f <= 1.0) {
            return Err(SamplerError::InvalidPolicy(format!(
                "sample fraction must be in (0, 1], got {f}"
            )));
        }
        Ok(Self::Fraction(f))
    }

    /// Count policy from a real number, truncated to an integer.
    pub fn count(n: f64) -> Result<Self, SamplerError> {
        if !n.is_finite() || n < 0.0 {
            return Err(SamplerError::InvalidPolicy(format!(
                "sample count must be a non-negative number, got {n}"
            )));
        }
        Ok(Self::Count(n.trunc() as usize))
    }

    /// Check the policy against the size of the whole dataset.
    ///
    /// Counts larger than the dataset are rejected here, once, before any
    /// grouping. Individual groups smaller than the count are clamped later.
    pub fn validate_for_total(&self, total_rows: usize) -> Result<(), SamplerError> {
        match *self {
            Self::Fraction(_) => Ok(()),
            Self::Count(n) if n > total_rows => Err(SamplerError::InvalidPolicy(format!(
                "sample count {n} exceeds the {total_rows} tweets in the dataset"
            ))),
            Self::Count(_) => Ok(()),
        }
    }
}

impl fmt::Display for SamplingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fraction(fraction) => write!(f, "{}% of each group", fraction * 100.0),
            Self::Count(n) => write!(f, "{n} tweets per group"),
        }
    }
}

/// Top-level configuration for one sampling run.
///
/// `None` disables a selector; at least one must be set.
#[derive(Clone, Debug)]
pub struct SamplingConfig {
    /// RNG seed; `None` draws a fresh seed and logs it.
    pub seed: Option<Seed>,
    /// Per-group sampling rule.
    pub policy: SamplingPolicy,
    /// Date specifiers for the date-group selector.
    pub periods: Option<Vec<DateSpecifier>>,
    /// Keywords for the keyword-group selector.
    pub keywords: Option<Vec<Keyword>>,
}

impl SamplingConfig {
    /// Fail fast on a configuration that cannot produce a run.
    pub fn validate(&self) -> Result<(), SamplerError> {
        if self.periods.is_none() && self.keywords.is_none() {
            return Err(SamplerError::NoSamplingMethodSpecified);
        }
        if self.periods.as_ref().is_some_and(Vec::is_empty) {
            return Err(SamplerError::Configuration(
                "empty time periods are provided".to_string(),
            ));
        }
        if self.keywords.as_ref().is_some_and(Vec::is_empty) {
            return Err(SamplerError::Configuration(
                "empty stopwords are provided".to_string(),
            ));
        }
        Ok(())
    }
}
