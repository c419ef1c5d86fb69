//! Error types for selection building and score slicing
//!
//! Every failure aborts the whole operation. A score that raised an error
//! part-way through slicing must be treated as not sliced.

use crate::models::{AddressRange, Axis, Bound};
use crate::musicxml::ScoreError;
use crate::parse::ExpressionError;
use thiserror::Error;

/// Top-level slicing error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SliceError {
    /// A resolved range runs backwards
    #[error("invalid {axis} range {range}: start {start} exceeds end {end}{}", at_measure(*measure))]
    InvalidRange {
        axis: Axis,
        range: AddressRange,
        start: u32,
        end: u32,
        measure: Option<u32>,
    },

    /// A symbolic bound has no metadata to resolve against
    #[error("cannot resolve bound '{bound}' on the {axis} axis{}", at_measure(*measure))]
    UnresolvedBound {
        axis: Axis,
        bound: Bound,
        measure: Option<u32>,
    },

    /// The selection and the score disagree about which measures or staves exist
    #[error("selection references {axis} {number}, which the score does not contain")]
    SelectionMismatch { axis: Axis, number: u32 },

    /// Two beat windows for one staff in one measure overlap
    #[error("overlapping beat windows {first} and {second} for staff {staff} in measure {measure}")]
    OverlappingWindows {
        measure: u32,
        staff: u32,
        first: AddressRange,
        second: AddressRange,
    },

    /// The expression has fewer sub-expressions than the outer axis selected
    #[error("no {axis} sub-expression for position {position} ({available} given)")]
    MissingSubExpression {
        axis: Axis,
        position: usize,
        available: usize,
    },

    /// Beat slicing needed a divisions or time value that was never declared
    #[error("measure {measure} of staff {staff} has no {attribute} in force")]
    MissingAttribute {
        measure: u32,
        staff: u32,
        attribute: &'static str,
    },

    #[error(transparent)]
    Expression(#[from] ExpressionError),

    #[error(transparent)]
    Score(#[from] ScoreError),
}

fn at_measure(measure: Option<u32>) -> String {
    measure
        .map(|m| format!(" in measure {}", m))
        .unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, SliceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        let err = SliceError::InvalidRange {
            axis: Axis::Beat,
            range: AddressRange::new(4, 2),
            start: 4,
            end: 2,
            measure: Some(3),
        };
        assert_eq!(
            err.to_string(),
            "invalid beat range 4-2: start 4 exceeds end 2 in measure 3"
        );

        let err = SliceError::UnresolvedBound {
            axis: Axis::Beat,
            bound: Bound::EndOfMeasure,
            measure: Some(9),
        };
        assert_eq!(
            err.to_string(),
            "cannot resolve bound 'end' on the beat axis in measure 9"
        );
    }
}
