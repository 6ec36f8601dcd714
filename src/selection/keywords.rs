use rand::Rng;
use tracing::info;

use crate::config::SamplingPolicy;
use crate::constants::sampler::KEYWORD_SELECTOR_LABEL;
use crate::data::{Row, RowTable};
use crate::selection::{GroupSpecifier, SelectionOutcome, select_groups};

/// Keyword (typically a stopword) matched as a case-sensitive substring of `text`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keyword(String);

impl Keyword {
    /// Keyword text, kept verbatim.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Keyword text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if `text` contains this keyword.
    pub fn matches_text(&self, text: &str) -> bool {
        text.contains(self.0.as_str())
    }
}

impl GroupSpecifier for Keyword {
    fn label(&self) -> &str {
        &self.0
    }

    fn matches(&self, table: &RowTable, row: &Row) -> bool {
        self.matches_text(table.text(row))
    }
}

/// Sample each keyword group of `table` with `policy`, in keyword order.
pub fn select_by_keywords<R>(
    table: &RowTable,
    keywords: &[Keyword],
    policy: &SamplingPolicy,
    rng: &mut R,
) -> SelectionOutcome
where
    R: Rng + ?Sized,
{
    let outcome = select_groups(table, keywords, policy, rng);
    info!(
        selector = KEYWORD_SELECTOR_LABEL,
        groups = outcome.groups.len(),
        sampled = outcome.sampled_len(),
        "keyword-group selection finished"
    );
    outcome
}
