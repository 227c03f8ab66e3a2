use thiserror::Error;

/// Canonical result for every seqflow crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A required function or comparer was missing, or an argument was
    /// rejected outright (e.g. a duplicate key while building a map).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("index {index} is out of range for a sequence of length {len}")]
    ArgumentOutOfRange { index: usize, len: usize },

    #[error("sequence contains no matching element")]
    EmptySequence,

    #[error("sequence contains more than one matching element")]
    MoreThanOneElement,

    #[error("arithmetic overflow while computing {0}")]
    ArithmeticOverflow(&'static str),

    #[error("operation not supported: {0}")]
    NotSupported(&'static str),

    #[error("capacity exceeded: requested {requested} items, max capacity {max}")]
    CapacityExceeded { requested: usize, max: usize },

    #[error("operation was cancelled")]
    Cancelled,

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Shorthand for the error raised when a required function is absent.
    pub fn missing(name: &str) -> Self {
        Error::InvalidArgument(format!("'{}' must be provided", name))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}
