pub type EscapadeResult<T> = Result<T, EscapadeError>;

#[derive(thiserror::Error, Debug)]
pub enum EscapadeError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("worker group error: {0}")]
    Group(String),

    #[error("consolidation error: {0}")]
    Consolidation(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EscapadeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn group(msg: impl Into<String>) -> Self {
        Self::Group(msg.into())
    }

    pub fn consolidation(msg: impl Into<String>) -> Self {
        Self::Consolidation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
