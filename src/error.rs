/// A required column is absent from the header after canonicalization.
#[derive(Debug, Eq, PartialEq, thiserror::Error)]
#[error("required column `{column}` is missing from the header")]
pub struct SchemaError {
    pub column: &'static str,
}

/// A timestamp or numeric field could not be parsed.
#[derive(Debug, Eq, PartialEq, thiserror::Error)]
#[error("failed to parse `{field}` value `{value}` on line {line}")]
pub struct ParseError {
    pub field: &'static str,
    pub value: String,
    pub line: u64,
}

/// An aggregation was requested over zero readings.
#[derive(Debug, Eq, PartialEq, thiserror::Error)]
#[error("the dataset contains no readings")]
pub struct EmptyDatasetError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    EmptyDataset(#[from] EmptyDatasetError),

    #[error("failed to read the source file")]
    Io(#[from] std::io::Error),

    #[error("failed to read the CSV records")]
    Csv(#[from] csv::Error),
}
