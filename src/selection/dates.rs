use std::fmt;

use chrono::NaiveDate;
use rand::Rng;
use tracing::{debug, info};

use crate::config::SamplingPolicy;
use crate::constants::periods::{
    COMPONENT_DELIMITER, LIST_DELIMITER, MAX_COMPONENTS, RANGE_DELIMITER,
};
use crate::constants::sampler::DATE_SELECTOR_LABEL;
use crate::data::{Row, RowTable};
use crate::errors::SamplerError;
use crate::selection::{GroupSpecifier, SelectionOutcome, select_groups};

/// Level of detail of a single date specifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateGranularity {
    /// `YY` or `YYYY`
    Year,
    /// `YY-MM` or `YYYY-MM`
    YearMonth,
    /// `YY-MM-DD` or `YYYY-MM-DD`
    YearMonthDay,
}

/// One date group: a partial date or an inclusive range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DateSpecifier {
    /// Matches rows whose `created_at` contains `value`.
    Single {
        /// Partial date as written, e.g. `23-01`.
        value: String,
        /// Detail level of `value`.
        granularity: DateGranularity,
    },
    /// Matches rows with `start <= created_at <= end` under string ordering.
    ///
    /// Ordering is lexicographic, so it is chronological only for ISO-ordered
    /// timestamps. A timestamp that extends an end bound (`2023-02-15` against
    /// `2023-02`) sorts after it and is excluded. A range whose start sorts
    /// after its end is well-formed and matches nothing.
    Range {
        /// Inclusive lower bound.
        start: String,
        /// Inclusive upper bound.
        end: String,
    },
}

impl DateSpecifier {
    /// Parse `YY[-MM[-DD]]`, `YYYY[-MM[-DD]]`, or `start:end` of two such dates.
    pub fn parse(raw: &str) -> Result<Self, SamplerError> {
        let raw = raw.trim();
        let mut bounds = raw.split(RANGE_DELIMITER);
        match (bounds.next(), bounds.next(), bounds.next()) {
            (Some(value), None, None) => {
                let granularity = parse_granularity(value)?;
                Ok(Self::Single {
                    value: value.to_string(),
                    granularity,
                })
            }
            (Some(start), Some(end), None) => {
                let start = start.trim();
                let end = end.trim();
                if start.is_empty() || end.is_empty() {
                    return Err(malformed(raw, "a range needs both a start and an end"));
                }
                parse_granularity(start)?;
                parse_granularity(end)?;
                Ok(Self::Range {
                    start: start.to_string(),
                    end: end.to_string(),
                })
            }
            _ => Err(malformed(raw, "expected at most one ':'")),
        }
    }

    /// Detail level of a single date; `None` for ranges.
    pub fn granularity(&self) -> Option<DateGranularity> {
        match self {
            Self::Single { granularity, .. } => Some(*granularity),
            Self::Range { .. } => None,
        }
    }

    /// True if `created_at` falls in this specifier's group.
    pub fn matches_timestamp(&self, created_at: &str) -> bool {
        match self {
            Self::Single { value, .. } => created_at.contains(value.as_str()),
            Self::Range { start, end } => {
                start.as_str() <= created_at && created_at <= end.as_str()
            }
        }
    }
}

impl fmt::Display for DateSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single { value, .. } => f.write_str(value),
            Self::Range { start, end } => write!(f, "{start}{RANGE_DELIMITER}{end}"),
        }
    }
}

/// Date specifier paired with its display label.
#[derive(Clone, Debug)]
struct LabeledDate<'a> {
    label: String,
    specifier: &'a DateSpecifier,
}

impl GroupSpecifier for LabeledDate<'_> {
    fn label(&self) -> &str {
        &self.label
    }

    fn matches(&self, table: &RowTable, row: &Row) -> bool {
        self.specifier.matches_timestamp(table.created_at(row))
    }
}

/// Sample each date group of `table` with `policy`, in specifier order.
pub fn select_by_dates<R>(
    table: &RowTable,
    specifiers: &[DateSpecifier],
    policy: &SamplingPolicy,
    rng: &mut R,
) -> SelectionOutcome
where
    R: Rng + ?Sized,
{
    let labeled: Vec<LabeledDate<'_>> = specifiers
        .iter()
        .map(|specifier| {
            debug!(
                specifier = %specifier,
                granularity = ?specifier.granularity(),
                "date group"
            );
            LabeledDate {
                label: specifier.to_string(),
                specifier,
            }
        })
        .collect();
    let outcome = select_groups(table, &labeled, policy, rng);
    info!(
        selector = DATE_SELECTOR_LABEL,
        groups = outcome.groups.len(),
        sampled = outcome.sampled_len(),
        "date-group selection finished"
    );
    outcome
}

/// Parse a comma-separated periods literal into date specifiers.
///
/// Accepted forms: `23-01,23-02:23-03`, `'2023-01', '2023-02'`,
/// `['2023-01-15:2023-01-20']`, and `('2023',)`. Items may be quoted with
/// `'` or `"`, the list may be wrapped in `[...]` or `(...)`, and a single
/// trailing comma is allowed. An empty list is an error.
pub fn parse_periods(literal: &str) -> Result<Vec<DateSpecifier>, SamplerError> {
    let body = strip_brackets(literal.trim())?;
    let mut items: Vec<&str> = body.split(LIST_DELIMITER).map(str::trim).collect();
    if items.len() > 1 && items.last().is_some_and(|item| item.is_empty()) {
        items.pop();
    }
    if items.iter().all(|item| item.is_empty()) {
        return Err(SamplerError::Configuration(
            "empty time periods are provided".to_string(),
        ));
    }
    items
        .into_iter()
        .map(|item| {
            if item.is_empty() {
                return Err(SamplerError::Configuration(format!(
                    "malformed time periods '{literal}': empty entry"
                )));
            }
            DateSpecifier::parse(strip_quotes(item)?)
        })
        .collect()
}

fn strip_brackets(literal: &str) -> Result<&str, SamplerError> {
    for (open, close) in [('[', ']'), ('(', ')')] {
        let has_open = literal.starts_with(open);
        let has_close = literal.ends_with(close);
        match (has_open, has_close) {
            (true, true) if literal.len() >= 2 => return Ok(&literal[1..literal.len() - 1]),
            (false, false) => continue,
            _ => {
                return Err(SamplerError::Configuration(format!(
                    "malformed time periods '{literal}': unbalanced '{open}{close}'"
                )));
            }
        }
    }
    Ok(literal)
}

fn strip_quotes(item: &str) -> Result<&str, SamplerError> {
    for quote in ['\'', '"'] {
        if item.starts_with(quote) {
            if item.len() >= 2 && item.ends_with(quote) {
                return Ok(&item[1..item.len() - 1]);
            }
            return Err(malformed(item, "unterminated quote"));
        }
    }
    if item.contains(['\'', '"']) {
        return Err(malformed(item, "stray quote"));
    }
    Ok(item)
}

fn parse_granularity(value: &str) -> Result<DateGranularity, SamplerError> {
    let components: Vec<&str> = value.split(COMPONENT_DELIMITER).collect();
    if components.len() > MAX_COMPONENTS {
        return Err(malformed(value, "expected at most year, month, and day"));
    }
    if components
        .iter()
        .any(|part| part.is_empty() || !part.chars().all(|ch| ch.is_ascii_digit()))
    {
        return Err(malformed(value, "date components must be digits"));
    }
    let year = components[0];
    if year.len() != 2 && year.len() != 4 {
        return Err(malformed(value, "year must have 2 or 4 digits"));
    }
    if components[1..].iter().any(|part| part.len() != 2) {
        return Err(malformed(value, "month and day must have 2 digits"));
    }
    match components.len() {
        1 => Ok(DateGranularity::Year),
        2 => {
            let month = components[1].parse::<u32>().unwrap_or(0);
            if (1..=12).contains(&month) {
                Ok(DateGranularity::YearMonth)
            } else {
                Err(malformed(value, "month out of range"))
            }
        }
        _ => {
            let format = if year.len() == 4 { "%Y-%m-%d" } else { "%y-%m-%d" };
            NaiveDate::parse_from_str(value, format)
                .map(|_| DateGranularity::YearMonthDay)
                .map_err(|_| malformed(value, "not a calendar date"))
        }
    }
}

fn malformed(value: &str, reason: &str) -> SamplerError {
    SamplerError::Configuration(format!("malformed time period '{value}': {reason}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Columns;
    use crate::sampler::SeededRng;

    fn single(value: &str) -> DateSpecifier {
        DateSpecifier::parse(value).unwrap()
    }

    fn table(stamps: &[&str]) -> RowTable {
        let columns = Columns::new(vec!["created_at".into(), "text".into()]).unwrap();
        let rows = stamps
            .iter()
            .enumerate()
            .map(|(idx, stamp)| Row::new(vec![stamp.to_string(), format!("tweet {idx}")]))
            .collect();
        RowTable::new(columns, rows).unwrap()
    }

    #[test]
    fn parses_single_specifiers_by_granularity() {
        assert_eq!(
            single("2023"),
            DateSpecifier::Single {
                value: "2023".into(),
                granularity: DateGranularity::Year
            }
        );
        assert_eq!(
            single("23-01"),
            DateSpecifier::Single {
                value: "23-01".into(),
                granularity: DateGranularity::YearMonth
            }
        );
        assert_eq!(
            single(" 2023-01-15 "),
            DateSpecifier::Single {
                value: "2023-01-15".into(),
                granularity: DateGranularity::YearMonthDay
            }
        );
    }

    #[test]
    fn rejects_malformed_specifiers() {
        for bad in [
            "", "2023-13", "2023-02-30", "23-1", "202", "2023/01", "jan", "2023-01-01-01",
            "2023-01:2023-02:2023-03", "2023:", ":2023",
        ] {
            assert!(
                matches!(DateSpecifier::parse(bad), Err(SamplerError::Configuration(_))),
                "'{bad}' should be rejected"
            );
        }
    }

    #[test]
    fn substring_matching_supports_partial_dates() {
        assert!(single("23-01").matches_timestamp("2023-01-15"));
        assert!(single("2023").matches_timestamp("2023-04-10 08:00:00"));
        assert!(!single("2023-02").matches_timestamp("2023-01-15"));
    }

    #[test]
    fn range_matching_is_inclusive() {
        let range = single("2023-01-10:2023-01-20");
        assert!(range.matches_timestamp("2023-01-15"));
        assert!(range.matches_timestamp("2023-01-10"));
        assert!(range.matches_timestamp("2023-01-20"));
        assert!(!range.matches_timestamp("2023-01-21"));
        assert!(!single("2023-01-16:2023-01-20").matches_timestamp("2023-01-15"));
    }

    #[test]
    fn range_end_is_compared_as_a_string() {
        let range = single("2023-01:2023-02");
        assert!(range.matches_timestamp("2023-01-31"));
        assert!(range.matches_timestamp("2023-02"));
        assert!(!range.matches_timestamp("2023-02-15"));
    }

    #[test]
    fn granularity_is_reported_for_single_dates_only() {
        assert_eq!(single("23").granularity(), Some(DateGranularity::Year));
        assert_eq!(
            single("2023-01-15").granularity(),
            Some(DateGranularity::YearMonthDay)
        );
        assert_eq!(single("2023-01:2023-02").granularity(), None);
    }

    #[test]
    fn inverted_and_mixed_width_ranges_parse() {
        assert_eq!(
            single("2023-02:2023-01"),
            DateSpecifier::Range {
                start: "2023-02".into(),
                end: "2023-01".into()
            }
        );
        assert!(DateSpecifier::parse("23-12:2024-01").is_ok());
    }

    #[test]
    fn inverted_range_yields_an_empty_group() {
        let table = table(&["2023-01-15", "2023-01", "2023-02", "2023-02-01"]);
        let specifiers = parse_periods("2023-02:2023-01").unwrap();
        let mut rng = SeededRng::new(21);
        let outcome =
            select_by_dates(&table, &specifiers, &SamplingPolicy::Fraction(1.0), &mut rng);
        assert_eq!(outcome.groups.len(), 1);
        assert_eq!(outcome.groups[0].label, "2023-02:2023-01");
        assert_eq!(outcome.groups[0].matched, 0);
        assert!(outcome.groups[0].rows.is_empty());
    }

    #[test]
    fn overlapping_year_and_month_groups_share_january_rows() {
        let table = table(&["2023-01-15", "2023-03-02"]);
        let specifiers = parse_periods("23,23-01").unwrap();
        let mut rng = SeededRng::new(6);
        let outcome =
            select_by_dates(&table, &specifiers, &SamplingPolicy::Fraction(1.0), &mut rng);
        assert_eq!(outcome.groups[0].matched, 2);
        assert_eq!(outcome.groups[1].matched, 1);
        let january = outcome
            .into_rows()
            .iter()
            .filter(|row| row.field(0) == "2023-01-15")
            .count();
        assert_eq!(january, 2);
    }

    #[test]
    fn display_round_trips_the_specifier_text() {
        assert_eq!(single("2023-01:2023-02").to_string(), "2023-01:2023-02");
        assert_eq!(single("23").to_string(), "23");
    }

    #[test]
    fn parses_period_literals() {
        let expected = vec![single("23-01"), single("2023-01-10:2023-01-20")];
        assert_eq!(parse_periods("23-01,2023-01-10:2023-01-20").unwrap(), expected);
        assert_eq!(
            parse_periods("['23-01', \"2023-01-10:2023-01-20\"]").unwrap(),
            expected
        );
        assert_eq!(
            parse_periods("('23-01', '2023-01-10:2023-01-20',)").unwrap(),
            expected
        );
        assert_eq!(parse_periods("'2023',").unwrap(), vec![single("2023")]);
    }

    #[test]
    fn rejects_malformed_period_literals() {
        for bad in [
            "", "[]", "()", " , ", "['23-01'", "'23-01", "23-01,,23-02", "'23-01\"", "2'3",
            "23-01,jan",
        ] {
            assert!(
                matches!(parse_periods(bad), Err(SamplerError::Configuration(_))),
                "'{bad}' should be rejected"
            );
        }
    }

    #[test]
    fn select_by_dates_samples_each_specifier() {
        let table = table(&[
            "2023-01-05",
            "2023-01-15",
            "2023-01-25",
            "2023-02-01",
            "2023-03-01",
        ]);
        let specifiers = vec![single("2023-01"), single("2023-02-01:2023-03-01"), single("2024")];
        let mut rng = SeededRng::new(17);
        let outcome = select_by_dates(&table, &specifiers, &SamplingPolicy::Count(2), &mut rng);
        let summary: Vec<(&str, usize, usize)> = outcome
            .groups
            .iter()
            .map(|group| (group.label.as_str(), group.matched, group.rows.len()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("2023-01", 3, 2),
                ("2023-02-01:2023-03-01", 2, 2),
                ("2024", 0, 0)
            ]
        );
        assert!(
            outcome.groups[0]
                .rows
                .iter()
                .all(|row| row.field(0).starts_with("2023-01"))
        );
    }
}
