//! Group selection shared by the date and keyword selectors.
//!
//! A selector turns each specifier into one group (the rows the specifier
//! matches), samples every group independently with the same policy, and
//! keeps the groups in specifier order. A row matched by several specifiers
//! is eligible in each of those groups and may be drawn more than once.

use rand::Rng;
use tracing::debug;

use crate::config::SamplingPolicy;
use crate::data::{Row, RowTable};
use crate::sampler::sample;
use crate::types::GroupLabel;

/// Date/period specifiers and the date-group selector.
pub mod dates;
/// Keyword specifiers and the keyword-group selector.
pub mod keywords;

/// A token that defines one sampling group.
pub trait GroupSpecifier {
    /// Label used in reports and logs.
    fn label(&self) -> &str;
    /// True if `row` belongs to this specifier's group.
    fn matches(&self, table: &RowTable, row: &Row) -> bool;
}

/// Sampled rows of a single group.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupSample {
    /// Specifier the group was built from.
    pub label: GroupLabel,
    /// Rows that matched the specifier before sampling.
    pub matched: usize,
    /// Rows drawn from the group.
    pub rows: Vec<Row>,
}

/// Ordered group samples produced by one selector.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionOutcome {
    /// One entry per specifier, in specifier order.
    pub groups: Vec<GroupSample>,
}

impl SelectionOutcome {
    /// Total sampled rows across groups.
    pub fn sampled_len(&self) -> usize {
        self.groups.iter().map(|group| group.rows.len()).sum()
    }

    /// Concatenate group rows in specifier order.
    pub fn into_rows(self) -> Vec<Row> {
        self.groups
            .into_iter()
            .flat_map(|group| group.rows)
            .collect()
    }
}

/// Filter `table` by each specifier and sample every group with `policy`.
pub fn select_groups<S, R>(
    table: &RowTable,
    specifiers: &[S],
    policy: &SamplingPolicy,
    rng: &mut R,
) -> SelectionOutcome
where
    S: GroupSpecifier,
    R: Rng + ?Sized,
{
    let groups = specifiers
        .iter()
        .map(|specifier| {
            let members: Vec<&Row> = table
                .rows
                .iter()
                .filter(|row| specifier.matches(table, row))
                .collect();
            let rows: Vec<Row> = sample(&members, policy, rng)
                .into_iter()
                .cloned()
                .collect();
            debug!(
                group = specifier.label(),
                matched = members.len(),
                sampled = rows.len(),
                "sampled group"
            );
            GroupSample {
                label: specifier.label().to_string(),
                matched: members.len(),
                rows,
            }
        })
        .collect();
    SelectionOutcome { groups }
}
