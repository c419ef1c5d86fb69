//! Resolved selection of measures, staves and beat windows

use super::address::AddressRange;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Which key comes first in a [`Selection`]
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// measure -> staff -> beat windows
    #[default]
    MeasureMajor,
    /// staff -> measure -> beat windows
    Partwise,
}

impl Orientation {
    pub fn from_partwise(partwise: bool) -> Self {
        if partwise {
            Orientation::Partwise
        } else {
            Orientation::MeasureMajor
        }
    }
}

/// Measure/staff identity mapped to the beat windows requested for it
///
/// Only the selection builder inserts entries; once handed out a selection is
/// read-only.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    orientation: Orientation,
    entries: BTreeMap<u32, BTreeMap<u32, Vec<AddressRange>>>,
    selected_measures: BTreeSet<u32>,
    selected_staves: BTreeSet<u32>,
}

impl Selection {
    pub(crate) fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            entries: BTreeMap::new(),
            selected_measures: BTreeSet::new(),
            selected_staves: BTreeSet::new(),
        }
    }

    /// Add beat windows for a (measure, staff) pair
    ///
    /// Windows already present (by value) are not added twice.
    pub(crate) fn insert(&mut self, measure: u32, staff: u32, windows: &[AddressRange]) {
        let (outer, inner) = self.key(measure, staff);
        let existing = self.entries.entry(outer).or_default().entry(inner).or_default();
        for window in windows {
            if !existing.contains(window) {
                existing.push(*window);
            }
        }
        self.selected_measures.insert(measure);
        self.selected_staves.insert(staff);
    }

    /// Visit every window list mutably as (measure, staff, windows)
    pub(crate) fn try_for_each_entry_mut<E>(
        &mut self,
        mut f: impl FnMut(u32, u32, &mut Vec<AddressRange>) -> Result<(), E>,
    ) -> Result<(), E> {
        let orientation = self.orientation;
        for (&outer, inner_map) in self.entries.iter_mut() {
            for (&inner, windows) in inner_map.iter_mut() {
                let (measure, staff) = match orientation {
                    Orientation::MeasureMajor => (outer, inner),
                    Orientation::Partwise => (inner, outer),
                };
                f(measure, staff, windows)?;
            }
        }
        Ok(())
    }

    fn key(&self, measure: u32, staff: u32) -> (u32, u32) {
        match self.orientation {
            Orientation::MeasureMajor => (measure, staff),
            Orientation::Partwise => (staff, measure),
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Raw keyed entries in this selection's orientation
    pub fn entries(&self) -> &BTreeMap<u32, BTreeMap<u32, Vec<AddressRange>>> {
        &self.entries
    }

    /// Beat windows for one staff within one measure
    pub fn windows(&self, measure: u32, staff: u32) -> Option<&[AddressRange]> {
        let (outer, inner) = self.key(measure, staff);
        self.entries
            .get(&outer)
            .and_then(|m| m.get(&inner))
            .map(Vec::as_slice)
    }

    /// True if any staff requested this measure
    pub fn contains_measure(&self, measure: u32) -> bool {
        self.selected_measures.contains(&measure)
    }

    pub fn selected_measures(&self) -> &BTreeSet<u32> {
        &self.selected_measures
    }

    /// Every staff chosen for any measure
    pub fn selected_staves(&self) -> &BTreeSet<u32> {
        &self.selected_staves
    }

    /// (measure, staff, windows) triples in key order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, &[AddressRange])> + '_ {
        let orientation = self.orientation;
        self.entries.iter().flat_map(move |(&outer, inner_map)| {
            inner_map.iter().map(move |(&inner, windows)| match orientation {
                Orientation::MeasureMajor => (outer, inner, windows.as_slice()),
                Orientation::Partwise => (inner, outer, windows.as_slice()),
            })
        })
    }

    /// Number of (measure, staff) pairs
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
