/// Failures raised by digraph mutations and removal cursors.
///
/// Absence is never an error: lookups and removals of unknown vertices or edges return
/// `None` / `false`. Every failing call leaves the graph untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The representation cannot hold the requested structure.
    #[error("unsupported operation: {reason}")]
    Unsupported { reason: &'static str },

    /// A removal cursor was used out of sequence.
    #[error("invalid cursor state: {reason}")]
    InvalidState { reason: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
