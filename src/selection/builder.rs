//! Selection building
//!
//! Drives the [`RangeResolver`] over the measure, staff and beat axes and
//! merges the results into a [`Selection`]. Staff and beat sub-expressions
//! broadcast: a single entry applies to every position of the outer axis.

use super::resolver::RangeResolver;
use crate::errors::{Result, SliceError};
use crate::models::{AddressExpression, AddressRange, Axis, Orientation, ScoreMetadata, Selection};

/// Entry at `position`, or the only entry when there is exactly one
pub fn pick<T>(items: &[T], position: usize) -> Option<&T> {
    if items.len() == 1 {
        items.first()
    } else {
        items.get(position)
    }
}

fn pick_or_err<T>(items: &[T], position: usize, axis: Axis) -> Result<&T> {
    pick(items, position).ok_or(SliceError::MissingSubExpression {
        axis,
        position,
        available: items.len(),
    })
}

/// Resolve an address expression against score metadata
pub fn build_selection(
    metadata: &ScoreMetadata,
    expression: &AddressExpression,
    orientation: Orientation,
) -> Result<Selection> {
    let resolver = RangeResolver::new(metadata);
    let mut selection = Selection::new(orientation);

    let measures = resolver.expand(&expression.measure_ranges, Axis::Measure, None)?;
    for (m, &measure) in measures.iter().enumerate() {
        let staff_ranges = pick_or_err(&expression.staff_ranges, m, Axis::Staff)?;
        let staves = resolver.expand(staff_ranges, Axis::Staff, None)?;

        // Measure-level broadcast is checked against the outer beat list,
        // staff-level broadcast against the list chosen here.
        let beat_group = pick_or_err(&expression.beat_ranges, m, Axis::Beat)?;
        for (s, &staff) in staves.iter().enumerate() {
            let windows = pick_or_err(beat_group, s, Axis::Beat)?;
            for window in windows {
                resolver.resolve(window, Axis::Beat, Some(measure))?;
            }
            selection.insert(measure, staff, windows);
        }
    }

    order_windows(&mut selection, &resolver)?;

    log::debug!(
        "built {:?} selection: {} measure(s), {} staff/staves, {} entries",
        orientation,
        selection.selected_measures().len(),
        selection.selected_staves().len(),
        selection.len()
    );
    Ok(selection)
}

/// Sort every window list by resolved start and reject overlaps
///
/// The slicer walks windows in ascending order and never rewinds, so merged
/// lists must be ordered and disjoint.
fn order_windows(selection: &mut Selection, resolver: &RangeResolver) -> Result<()> {
    selection.try_for_each_entry_mut(|measure, staff, windows| {
        let mut resolved: Vec<(u32, u32, AddressRange)> = windows
            .iter()
            .map(|w| {
                resolver
                    .resolve(w, Axis::Beat, Some(measure))
                    .map(|r| (*r.start(), *r.end(), *w))
            })
            .collect::<Result<_>>()?;
        resolved.sort_by_key(|&(start, _, _)| start);

        for pair in resolved.windows(2) {
            let (_, prev_end, first) = pair[0];
            let (next_start, _, second) = pair[1];
            if prev_end >= next_start {
                return Err(SliceError::OverlappingWindows {
                    measure,
                    staff,
                    first,
                    second,
                });
            }
        }

        *windows = resolved.into_iter().map(|(_, _, w)| w).collect();
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AxisBounds, Bound};
    use std::collections::BTreeMap;

    fn metadata() -> ScoreMetadata {
        ScoreMetadata::new(
            AxisBounds::new(1, 4),
            2,
            BTreeMap::from([(1, 4), (2, 4), (3, 4), (4, 4)]),
        )
    }

    fn expression(
        measures: Vec<AddressRange>,
        staves: Vec<Vec<AddressRange>>,
        beats: Vec<Vec<Vec<AddressRange>>>,
    ) -> AddressExpression {
        AddressExpression {
            measure_ranges: measures,
            staff_ranges: staves,
            beat_ranges: beats,
        }
    }

    #[test]
    fn test_pick_broadcasts_singletons() {
        assert_eq!(pick(&[7], 5), Some(&7));
        assert_eq!(pick(&[1, 2, 3], 1), Some(&2));
        assert_eq!(pick(&[1, 2], 4), None);
        assert_eq!(pick::<u8>(&[], 0), None);
    }

    #[test]
    fn test_measures_two_to_three_all_staves() {
        let expr = expression(
            vec![AddressRange::new(2, 3)],
            vec![vec![AddressRange::all()]],
            vec![vec![vec![AddressRange::new(1, 2)]]],
        );
        let selection = build_selection(&metadata(), &expr, Orientation::MeasureMajor).unwrap();

        let window = vec![AddressRange::new(1, 2)];
        let expected = BTreeMap::from([
            (2, BTreeMap::from([(1, window.clone()), (2, window.clone())])),
            (3, BTreeMap::from([(1, window.clone()), (2, window.clone())])),
        ]);
        assert_eq!(selection.entries(), &expected);
    }

    #[test]
    fn test_staff_broadcast_across_measures() {
        let expr = expression(
            vec![AddressRange::new(1, 3)],
            vec![vec![AddressRange::single(1), AddressRange::single(2)]],
            vec![vec![vec![AddressRange::all_beats()]]],
        );
        let selection = build_selection(&metadata(), &expr, Orientation::MeasureMajor).unwrap();

        for measure in 1..=3 {
            assert!(selection.windows(measure, 1).is_some());
            assert!(selection.windows(measure, 2).is_some());
        }
        assert!(!selection.contains_measure(4));
    }

    #[test]
    fn test_beat_broadcast_levels_are_independent() {
        // Two measures with their own staves; one beat group for every
        // measure, holding a list per staff.
        let expr = expression(
            vec![AddressRange::single(1), AddressRange::single(3)],
            vec![
                vec![AddressRange::single(1), AddressRange::single(2)],
                vec![AddressRange::single(2)],
            ],
            vec![vec![
                vec![AddressRange::single(1)],
                vec![AddressRange::single(4)],
            ]],
        );
        let selection = build_selection(&metadata(), &expr, Orientation::MeasureMajor).unwrap();

        assert_eq!(selection.windows(1, 1), Some(&[AddressRange::single(1)][..]));
        assert_eq!(selection.windows(1, 2), Some(&[AddressRange::single(4)][..]));
        // Staff 2 is the first staff of measure 3, so it takes list 0
        assert_eq!(selection.windows(3, 2), Some(&[AddressRange::single(1)][..]));
        assert_eq!(selection.selected_staves().iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_merges_and_sorts_repeated_measures() {
        let expr = expression(
            vec![AddressRange::single(2), AddressRange::single(2)],
            vec![vec![AddressRange::single(1)]],
            vec![
                vec![vec![AddressRange::single(3)]],
                vec![vec![AddressRange::single(1), AddressRange::single(3)]],
            ],
        );
        let selection = build_selection(&metadata(), &expr, Orientation::MeasureMajor).unwrap();

        assert_eq!(
            selection.windows(2, 1),
            Some(&[AddressRange::single(1), AddressRange::single(3)][..])
        );
    }

    #[test]
    fn test_rejects_overlapping_windows() {
        let expr = expression(
            vec![AddressRange::single(1)],
            vec![vec![AddressRange::single(1)]],
            vec![vec![vec![AddressRange::new(1, 3), AddressRange::new(Bound::Value(2), Bound::EndOfMeasure)]]],
        );
        let err = build_selection(&metadata(), &expr, Orientation::MeasureMajor).unwrap_err();
        assert!(matches!(
            err,
            SliceError::OverlappingWindows {
                measure: 1,
                staff: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_staff_sub_expression() {
        let expr = expression(
            vec![AddressRange::new(1, 3)],
            vec![vec![AddressRange::single(1)], vec![AddressRange::single(2)]],
            vec![vec![vec![AddressRange::all_beats()]]],
        );
        let err = build_selection(&metadata(), &expr, Orientation::MeasureMajor).unwrap_err();
        assert_eq!(
            err,
            SliceError::MissingSubExpression {
                axis: Axis::Staff,
                position: 2,
                available: 2
            }
        );
    }

    #[test]
    fn test_invalid_beat_range_is_reported() {
        let expr = expression(
            vec![AddressRange::single(1)],
            vec![vec![AddressRange::single(1)]],
            vec![vec![vec![AddressRange::new(3, 2)]]],
        );
        let err = build_selection(&metadata(), &expr, Orientation::MeasureMajor).unwrap_err();
        assert!(matches!(
            err,
            SliceError::InvalidRange {
                axis: Axis::Beat,
                measure: Some(1),
                ..
            }
        ));
    }

    #[test]
    fn test_partwise_orientation() {
        let expr = expression(
            vec![AddressRange::new(1, 2)],
            vec![vec![AddressRange::single(2)]],
            vec![vec![vec![AddressRange::all_beats()]]],
        );
        let selection = build_selection(&metadata(), &expr, Orientation::Partwise).unwrap();

        assert_eq!(selection.entries().keys().copied().collect::<Vec<_>>(), vec![2]);
        assert_eq!(selection.entries()[&2].keys().copied().collect::<Vec<_>>(), vec![1, 2]);
    }
}
