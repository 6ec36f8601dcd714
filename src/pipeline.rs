//! Linear sampling run: validate, select, aggregate.
//!
//! Every configuration and policy check happens before the first group is
//! sampled, so a failing run never produces partial output.

use tracing::info;

use crate::aggregate::aggregate;
use crate::config::SamplingConfig;
use crate::data::RowTable;
use crate::errors::SamplerError;
use crate::sampler::SeededRng;
use crate::selection::SelectionOutcome;
use crate::selection::dates::select_by_dates;
use crate::selection::keywords::select_by_keywords;
use crate::types::{GroupLabel, Seed};

/// Matched and sampled counts for one group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupSummary {
    /// Specifier or keyword text.
    pub label: GroupLabel,
    /// Rows that fell in the group.
    pub matched: usize,
    /// Rows drawn from the group.
    pub sampled: usize,
}

fn summarize(outcome: &SelectionOutcome) -> Vec<GroupSummary> {
    outcome
        .groups
        .iter()
        .map(|group| GroupSummary {
            label: group.label.clone(),
            matched: group.matched,
            sampled: group.rows.len(),
        })
        .collect()
}

/// Result of a sampling run.
#[derive(Clone, Debug)]
pub struct SamplingReport {
    /// Combined sample, date groups first.
    pub table: RowTable,
    /// Per-group counts of the date selector, if it ran.
    pub date_groups: Option<Vec<GroupSummary>>,
    /// Per-group counts of the keyword selector, if it ran.
    pub keyword_groups: Option<Vec<GroupSummary>>,
    /// Seed that reproduces this run.
    pub seed: Seed,
}

/// Run both configured selectors over `table` and merge their samples.
pub fn run_sampling(
    table: &RowTable,
    config: &SamplingConfig,
) -> Result<SamplingReport, SamplerError> {
    config.validate()?;
    config.policy.validate_for_total(table.len())?;

    let (mut rng, seed) = match config.seed {
        Some(seed) => (SeededRng::new(seed), seed),
        None => SeededRng::from_fresh_seed(),
    };
    info!(
        seed,
        rows = table.len(),
        policy = %config.policy,
        "starting sampling run"
    );

    let dates = config
        .periods
        .as_deref()
        .map(|periods| select_by_dates(table, periods, &config.policy, &mut rng));
    let keywords = config
        .keywords
        .as_deref()
        .map(|keywords| select_by_keywords(table, keywords, &config.policy, &mut rng));

    let date_groups = dates.as_ref().map(summarize);
    let keyword_groups = keywords.as_ref().map(summarize);
    let combined = aggregate(table.columns.clone(), dates, keywords)?;
    info!(sampled = combined.len(), "sampling run finished");

    Ok(SamplingReport {
        table: combined,
        date_groups,
        keyword_groups,
        seed,
    })
}
