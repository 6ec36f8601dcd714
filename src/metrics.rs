use crate::pipeline::GroupSummary;
use crate::types::GroupLabel;

/// Aggregate skew metrics for per-group sampled counts.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupSkew {
    /// Sampled rows across all groups.
    pub total: usize,
    /// Number of groups.
    pub groups: usize,
    /// Smallest group count.
    pub min: usize,
    /// Largest group count.
    pub max: usize,
    /// Mean group count.
    pub mean: f64,
    /// `max / total`, or 0 when nothing was sampled.
    pub max_share: f64,
    /// `min / total`, or 0 when nothing was sampled.
    pub min_share: f64,
    /// `max / min`; infinite when the smallest group is empty.
    pub ratio: f64,
    /// Per-group shares, largest count first.
    pub per_group: Vec<GroupShare>,
}

/// Per-group share of the sampled output.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupShare {
    /// Group label.
    pub label: GroupLabel,
    /// Sampled rows in the group.
    pub count: usize,
    /// `count / total`.
    pub share: f64,
}

/// Compute skew metrics from per-group sampled counts.
///
/// Groups keep their own entry even when two share a label (a specifier
/// listed twice is sampled twice).
pub fn group_skew(groups: &[GroupSummary]) -> Option<GroupSkew> {
    let min = groups.iter().map(|group| group.sampled).min()?;
    let max = groups.iter().map(|group| group.sampled).max()?;
    let total: usize = groups.iter().map(|group| group.sampled).sum();
    let count = groups.len();
    let mean = total as f64 / count as f64;
    let share_of = |value: usize| {
        if total == 0 {
            0.0
        } else {
            value as f64 / total as f64
        }
    };
    let ratio = if min == 0 {
        f64::INFINITY
    } else {
        max as f64 / min as f64
    };
    let mut per_group: Vec<GroupShare> = groups
        .iter()
        .map(|group| GroupShare {
            label: group.label.clone(),
            count: group.sampled,
            share: share_of(group.sampled),
        })
        .collect();
    per_group.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    Some(GroupSkew {
        total,
        groups: count,
        min,
        max,
        mean,
        max_share: share_of(max),
        min_share: share_of(min),
        ratio,
        per_group,
    })
}

/// Format an integer with thousands separators (`12345` -> `12,345`).
pub fn format_with_commas(value: usize) -> String {
    let raw = value.to_string();
    let mut grouped_reversed = String::with_capacity(raw.len() + (raw.len() / 3));
    for (idx, ch) in raw.chars().rev().enumerate() {
        if idx > 0 && idx % 3 == 0 {
            grouped_reversed.push(',');
        }
        grouped_reversed.push(ch);
    }
    grouped_reversed.chars().rev().collect()
}
