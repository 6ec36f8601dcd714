use crate::constants::columns::{CREATED_AT, REQUIRED, TEXT};
use crate::errors::SamplerError;

pub use crate::types::{ColumnName, FieldValue};

/// Table header with the resolved positions of the required columns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Columns {
    names: Vec<ColumnName>,
    created_at: usize,
    text: usize,
}

impl Columns {
    /// Build a header, failing when `created_at` or `text` is missing.
    pub fn new(names: Vec<ColumnName>) -> Result<Self, SamplerError> {
        let created_at = names.iter().position(|name| name == CREATED_AT);
        let text = names.iter().position(|name| name == TEXT);
        match (created_at, text) {
            (Some(created_at), Some(text)) => Ok(Self {
                names,
                created_at,
                text,
            }),
            _ => {
                let missing: Vec<&str> = REQUIRED
                    .iter()
                    .copied()
                    .filter(|required| !names.iter().any(|name| name == required))
                    .collect();
                Err(SamplerError::Configuration(format!(
                    "required column(s) missing from the tweets file: {}",
                    missing.join(", ")
                )))
            }
        }
    }

    /// Column names in file order.
    pub fn names(&self) -> &[ColumnName] {
        &self.names
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True for a header with no columns.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Position of the `created_at` column.
    pub fn created_at_idx(&self) -> usize {
        self.created_at
    }

    /// Position of the `text` column.
    pub fn text_idx(&self) -> usize {
        self.text
    }
}

/// One tweet record; fields are stored in header order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// Raw field values.
    pub fields: Vec<FieldValue>,
}

impl Row {
    /// Wrap field values without checking them against a header.
    pub fn new(fields: Vec<FieldValue>) -> Self {
        Self { fields }
    }

    /// Field at `idx`, or the empty string for a short row.
    pub fn field(&self, idx: usize) -> &str {
        self.fields.get(idx).map(String::as_str).unwrap_or("")
    }
}

/// Ordered header plus ordered rows.
///
/// Rows carry no identity: two rows with identical content are
/// indistinguishable and both are kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowTable {
    /// Shared header.
    pub columns: Columns,
    /// Rows in file (or sample) order.
    pub rows: Vec<Row>,
}

impl RowTable {
    /// Build a table, checking that every row matches the header width.
    pub fn new(columns: Columns, rows: Vec<Row>) -> Result<Self, SamplerError> {
        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.fields.len() != columns.len())
        {
            return Err(SamplerError::Configuration(format!(
                "row {} has {} field(s) but the header has {}",
                idx + 1,
                row.fields.len(),
                columns.len()
            )));
        }
        Ok(Self { columns, rows })
    }

    /// Empty table sharing `columns`.
    pub fn empty(columns: Columns) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `created_at` value of `row`.
    pub fn created_at<'a>(&self, row: &'a Row) -> &'a str {
        row.field(self.columns.created_at_idx())
    }

    /// `text` value of `row`.
    pub fn text<'a>(&self, row: &'a Row) -> &'a str {
        row.field(self.columns.text_idx())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<ColumnName> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn columns_resolve_required_positions() {
        let columns = Columns::new(names(&["id", "text", "lang", "created_at"])).unwrap();
        assert_eq!(columns.text_idx(), 1);
        assert_eq!(columns.created_at_idx(), 3);
        assert_eq!(columns.len(), 4);
    }

    #[test]
    fn columns_reject_missing_required_fields() {
        let err = Columns::new(names(&["id", "text"])).unwrap_err();
        match err {
            SamplerError::Configuration(message) => assert!(message.contains("created_at")),
            other => panic!("unexpected error: {other:?}"),
        }
        let err = Columns::new(names(&["lang"])).unwrap_err();
        match err {
            SamplerError::Configuration(message) => {
                assert!(message.contains("created_at, text"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn row_table_rejects_ragged_rows() {
        let columns = Columns::new(names(&["created_at", "text"])).unwrap();
        let rows = vec![
            Row::new(names(&["2023-01-01", "hello"])),
            Row::new(names(&["2023-01-02"])),
        ];
        assert!(matches!(
            RowTable::new(columns, rows),
            Err(SamplerError::Configuration(_))
        ));
    }

    #[test]
    fn row_table_reads_required_fields() {
        let columns = Columns::new(names(&["text", "created_at"])).unwrap();
        let table = RowTable::new(
            columns,
            vec![Row::new(names(&["habari", "2023-01-15"]))],
        )
        .unwrap();
        let row = &table.rows[0];
        assert_eq!(table.created_at(row), "2023-01-15");
        assert_eq!(table.text(row), "habari");
    }
}
