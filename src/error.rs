use thiserror::Error;

#[derive(Error, Debug)]
pub enum DraftError {
    /// SRT input that the parser could not make sense of.
    #[error("{0}")]
    Parse(String),

    /// Draft JSON that does not match the expected shape.
    #[error("Malformed draft: {0}")]
    InvalidDraft(#[from] serde_json::Error),
}
