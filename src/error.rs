pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Allocation error: {0}")]
    Allocation(String),

    #[error("Invalid reference: vertex {0:#x} is neither native nor in the outer vertex map")]
    InvalidReference(u64),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    pub fn allocation<S: Into<String>>(msg: S) -> Self {
        GraphError::Allocation(msg.into())
    }

    pub fn invalid_parameter<S: Into<String>>(msg: S) -> Self {
        GraphError::InvalidParameter(msg.into())
    }

    pub fn invalid_reference(gid: u64) -> Self {
        GraphError::InvalidReference(gid)
    }
}
