use thiserror::Error;

/// Errors raised while loading a dataset, configuring a session or
/// validating a query before it reaches the ranker.
///
/// "No matches" is not represented here: an empty result list is a normal
/// ranking outcome.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported dataset format: '{0}' (expected xlsx, xls, xlsm, ods, csv or tsv)")]
    UnsupportedFormat(String),

    #[error("The workbook does not contain any readable worksheet")]
    EmptyWorkbook,

    #[error("Dataset is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Please enter some symptoms to get recommendations.")]
    EmptyQuery,

    #[error("top_n must be between 1 and {max}, got {value}")]
    InvalidTopN { value: usize, max: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
