//! Error types for reading and writing MusicXML documents

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    /// XML is malformed (not well-formed)
    #[error("Invalid XML: {0}")]
    InvalidXml(String),

    /// MusicXML format not supported (e.g., timewise instead of partwise)
    #[error("Unsupported MusicXML format: {0}")]
    UnsupportedFormat(String),

    /// Required structural element is missing
    #[error("Missing required element: {0}")]
    MissingRequiredElement(String),

    /// An element or attribute holds a value we cannot interpret
    #[error("Invalid value '{value}' for {element}")]
    InvalidValue { element: String, value: String },

    /// Number of <part> elements differs from number of <score-part> descriptors
    #[error("score has {parts} parts but {descriptors} score-part entries")]
    PartListMismatch { parts: usize, descriptors: usize },

    /// Serialization failed
    #[error("Failed to write XML: {0}")]
    Write(String),
}
