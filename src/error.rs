use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PpgError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Empty input: sample sequence has no samples")]
    EmptyInput,

    #[error("Input error: {0}")]
    Input(String),
}

pub type Result<T> = std::result::Result<T, PpgError>;
