//! Error handling for the resume optimizer application

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeOptimizerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    #[error("Text extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Enhancement failed: {0}")]
    EnhancementFailed(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Template population failed: {0}")]
    PopulationFailed(String),

    #[error("{stage} conversion failed: {message}")]
    ConversionFailed { stage: String, message: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ResumeOptimizerError>;

impl ResumeOptimizerError {
    /// Wrap an exporter failure with the stage name it originated from.
    pub fn conversion(stage: &str, message: impl Into<String>) -> Self {
        ResumeOptimizerError::ConversionFailed {
            stage: stage.to_string(),
            message: message.into(),
        }
    }
}
