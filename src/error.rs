use cancel_this::Cancelled;
use thiserror::Error;

/// Errors reported by the cone construction and the over-approximation drivers.
///
/// Violated preconditions are reported immediately and are never retried: every operation
/// in this crate is a pure function of its inputs.
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// A constraint row does not have exactly one coefficient per cone variable.
    #[error("row has {actual} coefficients, but the cone has {expected} variables")]
    DimensionMismatch { expected: usize, actual: usize },
    /// An event was referenced that is not part of the input alphabet.
    #[error("event `{0}` is not part of the alphabet")]
    UnknownEvent(String),
    /// A transition of a Petri net was fired under a marking that does not enable it.
    #[error("transition `{0}` is not enabled under the supplied marking")]
    NotEnabled(String),
    /// The computation was cancelled (timeout, explicit trigger or an exceeded size limit).
    #[error("computation cancelled: {0:?}")]
    Cancelled(Cancelled),
}

impl From<Cancelled> for SynthesisError {
    fn from(value: Cancelled) -> Self {
        SynthesisError::Cancelled(value)
    }
}
