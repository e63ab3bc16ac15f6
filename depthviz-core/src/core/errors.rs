//! Error types for order book analysis
//!
//! Errors are local to a single computation call. Nothing here is retried:
//! every operation is pure and deterministic, so the same input fails the
//! same way.

use super::types::Side;
use thiserror::Error;

/// Errors raised by the depth analyzer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DepthError {
    /// A level carried a negative or non-finite quantity
    #[error("invalid input: {side} level {level} has quantity {quantity}")]
    InvalidInput {
        /// Side the level belongs to (None when a bare level list was analyzed)
        side: SideLabel,
        /// Index of the offending level, 0 = best
        level: usize,
        /// The rejected quantity
        quantity: f64,
    },

    /// One side of the book has no levels (strict statistics only)
    #[error("empty book: no {side} levels")]
    EmptyBook {
        /// The side with zero levels
        side: Side,
    },
}

/// Side context attached to [`DepthError::InvalidInput`]
///
/// `compute_depth_curve` works on a bare level list and does not know which
/// side it came from; statistics fill the side in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideLabel {
    Unknown,
    Known(Side),
}

impl std::fmt::Display for SideLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SideLabel::Unknown => write!(f, "book"),
            SideLabel::Known(side) => write!(f, "{}", side),
        }
    }
}

impl DepthError {
    /// Attach a side to an `InvalidInput` error raised on a bare level list
    pub fn on_side(self, side: Side) -> Self {
        match self {
            DepthError::InvalidInput {
                side: SideLabel::Unknown,
                level,
                quantity,
            } => DepthError::InvalidInput {
                side: SideLabel::Known(side),
                level,
                quantity,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = DepthError::InvalidInput {
            side: SideLabel::Known(Side::Ask),
            level: 3,
            quantity: -1.5,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("ask level 3"));
        assert!(msg.contains("-1.5"));
    }

    #[test]
    fn test_empty_book_display() {
        let err = DepthError::EmptyBook { side: Side::Bid };
        assert_eq!(format!("{}", err), "empty book: no bid levels");
    }

    #[test]
    fn test_on_side_only_fills_unknown() {
        let err = DepthError::InvalidInput {
            side: SideLabel::Unknown,
            level: 0,
            quantity: -1.0,
        }
        .on_side(Side::Bid);

        match err {
            DepthError::InvalidInput { side, .. } => {
                assert_eq!(side, SideLabel::Known(Side::Bid));
            }
            _ => panic!("Expected InvalidInput variant"),
        }

        let empty = DepthError::EmptyBook { side: Side::Ask }.on_side(Side::Bid);
        assert_eq!(empty, DepthError::EmptyBook { side: Side::Ask });
    }
}
