/// Cause of a [`Error::DataCorrupt`] failure: the blob was located but its
/// contents could not be turned into records.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error(transparent)]
    Decompress(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The dataset blob could not be located or read.
    #[error("user-agent dataset unavailable: {0}")]
    DataUnavailable(#[source] std::io::Error),
    /// The dataset blob failed to decompress or deserialize. Loading is
    /// atomic, so no partial record set survives this.
    #[error("user-agent dataset corrupt: {0}")]
    DataCorrupt(#[source] DatasetError),
    /// A caller-supplied argument is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// A filter's user-agent pattern failed to compile. Surfaced when the
    /// filter is applied, never per record.
    #[error("invalid user-agent pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<fancy_regex::Error>,
    },
    /// A filter left no candidate records for a draw.
    #[error("no user-agent records match the given filter")]
    NoMatch,
}

pub type Result<T> = std::result::Result<T, Error>;
