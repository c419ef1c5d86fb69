//! Numeric bounds used to resolve symbolic address tokens
//!
//! Built once from a score (see `musicxml::metadata`) or by hand in tests,
//! and read-only afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// First beat of every measure
pub const BEAT_START: u32 = 1;

/// Inclusive first/last pair for one axis
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisBounds {
    pub first: u32,
    pub last: u32,
}

impl AxisBounds {
    pub fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ScoreMetadata {
    pub measure_bounds: AxisBounds,
    pub staff_bounds: AxisBounds,
    /// Measure number -> governing time-signature numerator
    pub beats_per_measure: BTreeMap<u32, u32>,
    pub beat_start: u32,
}

impl ScoreMetadata {
    pub fn new(
        measure_bounds: AxisBounds,
        staff_count: u32,
        beats_per_measure: BTreeMap<u32, u32>,
    ) -> Self {
        Self {
            measure_bounds,
            staff_bounds: AxisBounds::new(1, staff_count),
            beats_per_measure,
            beat_start: BEAT_START,
        }
    }

    /// Beat bounds for one measure, if its beat count is known
    ///
    /// A number missing from a gapped numbering inherits the beat count of
    /// the closest earlier measure.
    pub fn beat_bounds(&self, measure: u32) -> Option<AxisBounds> {
        if measure > self.measure_bounds.last {
            return None;
        }
        self.beats_per_measure
            .range(..=measure)
            .next_back()
            .map(|(_, &beats)| AxisBounds::new(self.beat_start, beats))
    }
}
