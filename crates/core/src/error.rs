#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Measurement generation failed: {0}")]
    Generation(String),

    #[error("Invalid classification bands: {0}")]
    InvalidBands(String),
}
