use thiserror::Error;

pub type Result<T> = std::result::Result<T, DriftError>;

#[derive(Error, Debug)]
pub enum DriftError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not identify latitude/longitude columns in header: {header}")]
    MissingColumn { header: String },

    #[error("Invalid coordinate for {key}, column '{column}': '{value}'")]
    CoordinateParse {
        key: String,
        column: String,
        value: String,
    },

    #[error("Could not read revision {revision}: {message}")]
    RevisionLookup { revision: String, message: String },

    #[error("No revision history found for {path}")]
    NoHistory { path: String },

    #[error("Only one revision exists. Nothing to compare")]
    InsufficientHistory,

    #[error("Version control command failed: {0}")]
    VersionControl(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid quadrat letter: '{0}'")]
    InvalidQuadrat(String),
}
