use std::fs::{self, File};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use tracing::{debug, info};

use crate::constants::transport::{
    CSV_DELIMITER, CSV_EXTENSION, OUTPUT_FILENAME, TSV_DELIMITER, TSV_EXTENSION,
};
use crate::data::{Columns, Row, RowTable};
use crate::errors::SamplerError;
use crate::selection::keywords::Keyword;

/// Delimited-file flavor, chosen from the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableFormat {
    /// Comma-separated (`.csv`).
    Csv,
    /// Tab-separated (`.tsv`).
    Tsv,
}

impl TableFormat {
    /// Format for `path` (`.csv` or `.tsv`, case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, SamplerError> {
        let extension = path.extension().and_then(|ext| ext.to_str());
        match extension {
            Some(ext) if ext.eq_ignore_ascii_case(CSV_EXTENSION) => Ok(Self::Csv),
            Some(ext) if ext.eq_ignore_ascii_case(TSV_EXTENSION) => Ok(Self::Tsv),
            _ => Err(SamplerError::Configuration(format!(
                "tweets file format not supported for '{}', please provide a csv/tsv file",
                path.display()
            ))),
        }
    }

    /// Field delimiter byte.
    pub fn delimiter(self) -> u8 {
        match self {
            Self::Csv => CSV_DELIMITER,
            Self::Tsv => TSV_DELIMITER,
        }
    }
}

/// Load a delimited tweet table; the first row is the header.
///
/// Fails with `Configuration` for unsupported extensions or when `created_at`
/// or `text` is missing from the header.
pub fn load_table(path: &Path) -> Result<RowTable, SamplerError> {
    let format = TableFormat::from_path(path)?;
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(format.delimiter())
        .from_reader(file);

    let names = reader
        .headers()?
        .iter()
        .map(|name| name.to_string())
        .collect();
    let columns = Columns::new(names)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(Row::new(record.iter().map(str::to_string).collect()));
    }
    let table = RowTable::new(columns, rows)?;
    info!(
        path = %path.display(),
        ?format,
        rows = table.len(),
        columns = table.columns.len(),
        "loaded tweets table"
    );
    Ok(table)
}

/// Load one keyword per line from a stopwords file.
///
/// Lines are kept verbatim apart from the line ending, so `" na "` only
/// matches `na` as a standalone word. Blank and whitespace-only lines are
/// skipped; an empty substring would otherwise match every tweet.
pub fn load_stopwords(path: &Path) -> Result<Vec<Keyword>, SamplerError> {
    let contents = fs::read_to_string(path).map_err(|err| {
        SamplerError::Configuration(format!(
            "cannot read stopwords file '{}': {err}",
            path.display()
        ))
    })?;
    let keywords: Vec<Keyword> = contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(Keyword::new)
        .collect();
    if keywords.is_empty() {
        return Err(SamplerError::Configuration(format!(
            "stopwords file '{}' contains no stopwords",
            path.display()
        )));
    }
    debug!(path = %path.display(), count = keywords.len(), "loaded stopwords");
    Ok(keywords)
}

/// Path of the sampled output inside `out_dir`.
pub fn output_path(out_dir: &Path) -> PathBuf {
    out_dir.join(OUTPUT_FILENAME)
}

/// Write `table` as comma-separated `sampled_tweets.csv` under `out_dir`.
///
/// Creates `out_dir` when missing. The header is always written, even for an
/// empty sample. Returns the written path.
pub fn write_table(table: &RowTable, out_dir: &Path) -> Result<PathBuf, SamplerError> {
    if !out_dir.as_os_str().is_empty() {
        fs::create_dir_all(out_dir)?;
    }
    let path = output_path(out_dir);
    let mut writer = WriterBuilder::new()
        .delimiter(CSV_DELIMITER)
        .from_path(&path)?;
    writer.write_record(table.columns.names())?;
    for row in &table.rows {
        writer.write_record(&row.fields)?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = table.len(), "wrote sampled tweets");
    Ok(path)
}
