use thiserror::Error;

#[derive(Debug, Error)]
pub enum FatscopeError {
    #[error("Geometry decode failed: {0}")]
    GeometryDecode(String),

    #[error("Addressing error: {0}")]
    Addressing(String),

    #[error("Cannot go back further")]
    NavigationUnderflow,

    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
