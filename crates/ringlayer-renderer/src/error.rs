use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayerError {
    #[error("'{operation}' needs the layer to be attached to a map first")]
    NotAttached { operation: &'static str },

    #[error("layer is already attached to a map")]
    AlreadyAttached,

    #[error("invalid layer options: {0}")]
    Config(#[from] serde_json::Error),

    #[error("layer option '{field}' {reason}")]
    InvalidOption { field: &'static str, reason: String },
}

pub type LayerResult<T> = Result<T, LayerError>;
