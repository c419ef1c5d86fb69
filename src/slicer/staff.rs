//! Per-staff slicing scan
//!
//! One left-to-right pass over a part's measures. Dropped measures are left
//! out of the rebuilt child list; kept measures get any pending attribute
//! changes re-declared and have out-of-window notes turned into rests.

use super::attributes::{duration_of, AttributeState};
use super::beats::{beat_length, Beat, BeatWindows};
use super::rests::convert_to_rest;
use super::SliceReport;
use crate::errors::{Result, SliceError};
use crate::models::{AddressRange, Selection};
use crate::musicxml::{measure_number, Element, XmlNode};

/// State threaded through one staff's scan
struct StaffScan<'a> {
    staff: u32,
    selection: &'a Selection,
    /// Latest value of every attribute seen so far
    active: AttributeState,
    /// Attribute changes from dropped measures not yet re-declared
    pending: AttributeState,
    report: &'a mut SliceReport,
}

/// Slice one `<part>` in place
pub(crate) fn slice_staff(
    part: &mut Element,
    staff: u32,
    selection: &Selection,
    report: &mut SliceReport,
) -> Result<()> {
    let mut scan = StaffScan {
        staff,
        selection,
        active: AttributeState::new(),
        pending: AttributeState::new(),
        report,
    };

    let children = std::mem::take(&mut part.children);
    let mut kept = Vec::with_capacity(children.len());

    for node in children {
        match node {
            XmlNode::Element(mut measure) if measure.name == "measure" => {
                let number = measure_number(&measure)?;
                if selection.contains_measure(number) {
                    scan.keep_measure(&mut measure, number)?;
                    kept.push(XmlNode::Element(measure));
                } else {
                    scan.drop_measure(&measure, number);
                    if kept.last().map_or(false, XmlNode::is_whitespace) {
                        kept.pop();
                    }
                }
            }
            other => kept.push(other),
        }
    }

    part.children = kept;
    Ok(())
}

impl StaffScan<'_> {
    fn drop_measure(&mut self, measure: &Element, number: u32) {
        for block in measure.children_named("attributes") {
            self.active.merge_block(block);
            self.pending.merge_block(block);
        }
        log::debug!("staff {}: dropping measure {}", self.staff, number);
        self.report.measures_removed += 1;
    }

    fn keep_measure(&mut self, measure: &mut Element, number: u32) -> Result<()> {
        if !self.pending.is_empty() {
            log::debug!(
                "staff {}: carrying {} attribute(s) into measure {}",
                self.staff,
                self.pending.len(),
                number
            );
            measure.prepend_element(self.pending.to_element());
            self.pending.clear();
            self.report.attributes_carried += 1;
        }

        let selection = self.selection;
        match selection.windows(number, self.staff) {
            Some(windows) => self.slice_beats(measure, number, windows),
            None => {
                self.silence_measure(measure);
                Ok(())
            }
        }
    }

    /// Measure kept for another staff but not requested for this one
    fn silence_measure(&mut self, measure: &mut Element) {
        for element in measure.elements_mut() {
            match element.name.as_str() {
                "attributes" => self.active.merge_block(element),
                "note" => {
                    if convert_to_rest(element) {
                        self.report.notes_silenced += 1;
                    }
                }
                _ => {}
            }
        }
    }

    fn slice_beats(
        &mut self,
        measure: &mut Element,
        number: u32,
        windows: &[AddressRange],
    ) -> Result<()> {
        let mut windows = BeatWindows::new(windows);
        let mut cursor = Beat::from_integer(1);
        // Start of the most recent non-chord note
        let mut chord_start = cursor;

        for element in measure.elements_mut() {
            match element.name.as_str() {
                "attributes" => self.active.merge_block(element),
                "note" => {
                    let length = self.length_of(element, number)?;
                    let in_chord = element.has_child("chord");
                    let start = if in_chord { chord_start } else { cursor };

                    if !windows.admits(start, start + length) && convert_to_rest(element) {
                        self.report.notes_silenced += 1;
                    }

                    if !in_chord {
                        chord_start = cursor;
                        cursor += length;
                    }
                }
                "backup" => {
                    cursor -= self.length_of(element, number)?;
                    windows.rewind();
                }
                "forward" => {
                    cursor += self.length_of(element, number)?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Beat-length of a note, backup or forward; zero without a duration
    fn length_of(&self, element: &Element, number: u32) -> Result<Beat> {
        let Some(duration) = duration_of(element)? else {
            return Ok(Beat::from_integer(0));
        };

        let divisions = self
            .active
            .divisions()?
            .filter(|&d| d > 0)
            .ok_or(SliceError::MissingAttribute {
                measure: number,
                staff: self.staff,
                attribute: "divisions",
            })?;
        let (numerator, denominator) = self
            .active
            .time_signature()?
            .filter(|&(n, d)| n > 0 && d > 0)
            .ok_or(SliceError::MissingAttribute {
                measure: number,
                staff: self.staff,
                attribute: "time signature",
            })?;

        Ok(beat_length(
            duration,
            divisions,
            numerator as i64,
            denominator as i64,
        )?)
    }
}
