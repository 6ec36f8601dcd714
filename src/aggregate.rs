//! Merge of the per-selector outcomes into the output table.

use crate::data::{Columns, RowTable};
use crate::errors::SamplerError;
use crate::selection::SelectionOutcome;

/// Concatenate date-group rows, then keyword-group rows.
///
/// No deduplication: a row drawn by several groups appears once per draw.
/// `None` marks a selector that did not run; both `None` is an error.
pub fn aggregate(
    columns: Columns,
    dates: Option<SelectionOutcome>,
    keywords: Option<SelectionOutcome>,
) -> Result<RowTable, SamplerError> {
    if dates.is_none() && keywords.is_none() {
        return Err(SamplerError::NoSamplingMethodSpecified);
    }
    let mut combined = RowTable::empty(columns);
    for outcome in [dates, keywords].into_iter().flatten() {
        combined.rows.extend(outcome.into_rows());
    }
    Ok(combined)
}
