/// Constants describing the tweet table layout.
pub mod columns {
    /// Required column holding the tweet timestamp (ISO-ordered string).
    pub const CREATED_AT: &str = "created_at";
    /// Required column holding the tweet body.
    pub const TEXT: &str = "text";
    /// Columns every input table must carry.
    pub const REQUIRED: [&str; 2] = [CREATED_AT, TEXT];
}

/// Constants used by the table loader and writer.
pub mod transport {
    /// Extension for comma-separated inputs.
    pub const CSV_EXTENSION: &str = "csv";
    /// Extension for tab-separated inputs.
    pub const TSV_EXTENSION: &str = "tsv";
    /// Field delimiter for `.csv` inputs and for the written output.
    pub const CSV_DELIMITER: u8 = b',';
    /// Field delimiter for `.tsv` inputs.
    pub const TSV_DELIMITER: u8 = b'\t';
    /// Fixed filename of the sampled output inside the output directory.
    pub const OUTPUT_FILENAME: &str = "sampled_tweets.csv";
    /// Output directory used when none is given.
    pub const DEFAULT_OUTPUT_DIR: &str = ".";
}

/// Constants used by date specifier parsing.
pub mod periods {
    /// Separates the two bounds of a range specifier (`start:end`).
    pub const RANGE_DELIMITER: char = ':';
    /// Separates specifiers inside a periods literal.
    pub const LIST_DELIMITER: char = ',';
    /// Separates the year, month, and day components of a specifier.
    pub const COMPONENT_DELIMITER: char = '-';
    /// Maximum number of components (year, month, day).
    pub const MAX_COMPONENTS: usize = 3;
}

/// Constants used by the sampler.
pub mod sampler {
    /// Label used for the date-group selector in reports and logs.
    pub const DATE_SELECTOR_LABEL: &str = "periods";
    /// Label used for the keyword-group selector in reports and logs.
    pub const KEYWORD_SELECTOR_LABEL: &str = "stopwords";
}
