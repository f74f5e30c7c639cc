use thiserror::Error;

/// Invalid replication-budget accounting request.
///
/// Every variant leaves the budget untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyAccountingError {
    #[error("cannot decrease copies by {requested}: only {available} available")]
    Decrease { requested: i64, available: u32 },

    #[error("number of copies should be positive, got {requested}")]
    NonPositive { requested: i64 },

    #[error("number of copies out of range: {requested}")]
    OutOfRange { requested: i64 },
}

#[derive(Error, Debug)]
pub enum PacketError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Lets callers fold accounting failures into `PacketResult` with `?`
    #[error("Copy accounting error: {0}")]
    CopyAccounting(#[from] CopyAccountingError),
}

impl From<serde_json::Error> for PacketError {
    fn from(err: serde_json::Error) -> Self {
        PacketError::Serialization(err.to_string())
    }
}

pub type PacketResult<T> = Result<T, PacketError>;
