use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unsupported file '{file_name}': expected a .csv file")]
    UnsupportedExtension { file_name: String },

    #[error("Required columns not found (direction: {direction}, speed: {speed})")]
    MissingColumns { direction: String, speed: String },

    #[error("No valid records after cleaning ({total_rows} rows read)")]
    EmptyResult { total_rows: usize },

    #[error("Chart rendering error: {0}")]
    Render(String),

    #[error("Telegram request error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Telegram download error: {0}")]
    Download(#[from] teloxide::DownloadError),

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// Coarse classification used at the request boundary to pick a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong file type or required columns absent.
    InputFormat,
    /// File parsed but every row was dropped during normalization.
    EmptyResult,
    Unexpected,
}

impl ProcessingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProcessingError::UnsupportedExtension { .. }
            | ProcessingError::MissingColumns { .. } => ErrorKind::InputFormat,
            ProcessingError::EmptyResult { .. } => ErrorKind::EmptyResult,
            _ => ErrorKind::Unexpected,
        }
    }
}
