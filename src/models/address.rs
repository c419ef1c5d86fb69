//! Address expression data structures
//!
//! An address expression selects content along three axes (measure, staff,
//! beat). Each axis is written as a list of [`AddressRange`]s whose bounds may
//! be concrete numbers or symbolic tokens resolved later against score
//! metadata.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three independent addressing dimensions
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Measure,
    Staff,
    Beat,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::Measure => "measure",
            Axis::Staff => "staff",
            Axis::Beat => "beat",
        };
        f.write_str(name)
    }
}

/// A range bound: a concrete number or a symbolic token
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    /// Concrete 1-based (or score-native) number
    Value(u32),
    /// First element of the axis
    Start,
    /// Last element of the axis
    End,
    /// Last beat of whichever measure the range is applied to (beat axis only)
    EndOfMeasure,
}

impl Bound {
    /// True for tokens that leave their side of a beat window open
    pub fn is_open(&self) -> bool {
        !matches!(self, Bound::Value(_))
    }

    pub fn value(&self) -> Option<u32> {
        match self {
            Bound::Value(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Value(v) => write!(f, "{}", v),
            Bound::Start => f.write_str("start"),
            Bound::End | Bound::EndOfMeasure => f.write_str("end"),
        }
    }
}

impl From<u32> for Bound {
    fn from(value: u32) -> Self {
        Bound::Value(value)
    }
}

/// Inclusive start-end pair on one axis
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AddressRange {
    pub start: Bound,
    pub end: Bound,
}

impl AddressRange {
    pub fn new(start: impl Into<Bound>, end: impl Into<Bound>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Range covering a single number
    pub fn single(value: u32) -> Self {
        Self::new(value, value)
    }

    /// `start-end` on the measure and staff axes
    pub fn all() -> Self {
        Self::new(Bound::Start, Bound::End)
    }

    /// `start-end` on the beat axis, where the end is the measure's last beat
    pub fn all_beats() -> Self {
        Self::new(Bound::Start, Bound::EndOfMeasure)
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// A parsed address expression
///
/// `staff_ranges` holds one entry per selected measure position, or a single
/// entry broadcast to every measure. `beat_ranges` is indexed by measure
/// position and then by staff position, with the same broadcast rule applied
/// independently at each level.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AddressExpression {
    pub measure_ranges: Vec<AddressRange>,
    pub staff_ranges: Vec<Vec<AddressRange>>,
    pub beat_ranges: Vec<Vec<Vec<AddressRange>>>,
}

impl AddressExpression {
    /// The `all/all/@all` expression
    pub fn everything() -> Self {
        Self {
            measure_ranges: vec![AddressRange::all()],
            staff_ranges: vec![vec![AddressRange::all()]],
            beat_ranges: vec![vec![vec![AddressRange::all_beats()]]],
        }
    }
}
