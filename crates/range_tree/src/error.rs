use std::fmt;

/// Errors reported by [`RangeTree`](crate::RangeTree).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeTreeError {
    /// Construction was attempted on an empty sequence.
    EmptyInput,
    /// `left > right` or `right >= len`.
    InvalidRange {
        left: usize,
        right: usize,
        len: usize,
    },
}

impl fmt::Display for RangeTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "range tree cannot be built from an empty sequence"),
            Self::InvalidRange { left, right, len } => {
                write!(f, "range [{left}, {right}] out of bounds for length {len}")
            }
        }
    }
}

impl std::error::Error for RangeTreeError {}
