//! Range resolution
//!
//! Substitutes symbolic bounds with metadata values and expands an
//! [`AddressRange`] into the inclusive ascending numbers it denotes. Beat
//! ranges are resolved per measure because each measure has its own beat
//! count.

use crate::errors::{Result, SliceError};
use crate::models::{AddressRange, Axis, AxisBounds, Bound, ScoreMetadata};
use std::ops::RangeInclusive;

#[derive(Clone, Copy, Debug)]
pub struct RangeResolver<'a> {
    metadata: &'a ScoreMetadata,
}

impl<'a> RangeResolver<'a> {
    pub fn new(metadata: &'a ScoreMetadata) -> Self {
        Self { metadata }
    }

    /// Bounds for an axis; `measure` is required on the beat axis
    fn axis_bounds(&self, axis: Axis, bound: Bound, measure: Option<u32>) -> Result<AxisBounds> {
        match axis {
            Axis::Measure => Ok(self.metadata.measure_bounds),
            Axis::Staff => Ok(self.metadata.staff_bounds),
            Axis::Beat => measure
                .and_then(|m| self.metadata.beat_bounds(m))
                .ok_or(SliceError::UnresolvedBound {
                    axis,
                    bound,
                    measure,
                }),
        }
    }

    /// Resolve one bound to a concrete number
    pub fn resolve_bound(&self, bound: Bound, axis: Axis, measure: Option<u32>) -> Result<u32> {
        match bound {
            Bound::Value(v) => Ok(v),
            Bound::Start if axis == Axis::Beat => Ok(self.metadata.beat_start),
            Bound::Start => Ok(self.axis_bounds(axis, bound, measure)?.first),
            Bound::End => Ok(self.axis_bounds(axis, bound, measure)?.last),
            Bound::EndOfMeasure if axis == Axis::Beat => {
                Ok(self.axis_bounds(axis, bound, measure)?.last)
            }
            Bound::EndOfMeasure => Err(SliceError::UnresolvedBound {
                axis,
                bound,
                measure,
            }),
        }
    }

    /// Resolve both bounds; a range whose start exceeds its end is an error
    pub fn resolve(
        &self,
        range: &AddressRange,
        axis: Axis,
        measure: Option<u32>,
    ) -> Result<RangeInclusive<u32>> {
        let start = self.resolve_bound(range.start, axis, measure)?;
        let end = self.resolve_bound(range.end, axis, measure)?;
        if start > end {
            return Err(SliceError::InvalidRange {
                axis,
                range: *range,
                start,
                end,
                measure,
            });
        }
        Ok(start..=end)
    }

    /// Expand a list of ranges into numbers, keeping list order
    ///
    /// Numbers requested twice appear twice; the selection builder merges them.
    pub fn expand(
        &self,
        ranges: &[AddressRange],
        axis: Axis,
        measure: Option<u32>,
    ) -> Result<Vec<u32>> {
        let mut numbers = Vec::new();
        for range in ranges {
            numbers.extend(self.resolve(range, axis, measure)?);
        }
        Ok(numbers)
    }
}
