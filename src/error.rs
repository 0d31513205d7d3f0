use thiserror::Error;

pub type Result<T> = std::result::Result<T, SlideInsightError>;

#[derive(Error, Debug)]
pub enum SlideInsightError {
    /// Missing credential, unusable config file, bad bounds. Fatal at startup.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Topic extraction returned nothing usable or the backend call failed.
    #[error("Topic extraction failed: {0}")]
    Extraction(String),

    /// The similarity index was unreachable, returned no slides, or a
    /// returned slide image could not be decoded.
    #[error("Slide retrieval failed: {0}")]
    Retrieval(String),

    /// The multimodal generation request failed.
    #[error("Quiz generation failed: {0}")]
    Generation(String),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SlideInsightError {
    /// Pipeline failures are caught per turn and turned into an apology
    /// reply; configuration errors abort startup instead.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, SlideInsightError::Config(_))
    }
}
