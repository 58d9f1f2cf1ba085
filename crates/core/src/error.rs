use thiserror::Error;

/// Errors that can occur while playing or searching connect-n positions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectNError {
    #[error("Invalid geometry: {size}x{size} board with run length {run_length}")]
    InvalidGeometry { size: usize, run_length: usize },

    #[error("Invalid move: {0}")]
    InvalidMove(String),

    #[error("Invalid board: {0}")]
    InvalidBoard(String),

    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Invalid search configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience Result type for connect-n operations
pub type Result<T> = std::result::Result<T, ConnectNError>;
