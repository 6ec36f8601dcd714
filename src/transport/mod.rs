/// Filesystem table, stopwords, and output transport.
pub mod fs;
