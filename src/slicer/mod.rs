//! Score slicer
//!
//! Applies a frozen [`Selection`] to a partwise MusicXML score.
//!
//! # Overview
//!
//! 1. **Slice**: per staff, drop unselected measures, carry attribute
//!    changes forward, and turn notes outside the requested beats into rests
//! 2. **Clean up**: remove staves the selection never chose, along with
//!    their part-list descriptors
//!
//! # Basic Usage
//!
//! ```ignore
//! use ema_slicer::slicer::slice_musicxml;
//!
//! let result = slice_musicxml(musicxml, "2-3/all/@1-2", None)?;
//! println!("{}", result.musicxml);
//! ```

pub mod attributes;
pub mod beats;
pub mod cleanup;
pub mod rests;
mod staff;

pub use cleanup::remove_unselected_staves;

use crate::errors::{Result, SliceError};
use crate::models::{Axis, Orientation, ScoreMetadata, Selection};
use crate::musicxml::{measure_number, Score};
use crate::parse::parse_expression;
use crate::selection::build_selection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Slicing options
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SliceSettings {
    /// Key the selection by staff first instead of by measure
    #[serde(default)]
    pub orientation: Orientation,
}

/// What slicing changed
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct SliceReport {
    /// Measures dropped, counted once per staff
    pub measures_removed: usize,
    /// Notes turned into rests
    pub notes_silenced: usize,
    /// Attribute blocks synthesized in kept measures
    pub attributes_carried: usize,
    /// Ids of parts removed by cleanup
    pub removed_parts: Vec<String>,
}

/// Output of [`slice_musicxml`]
#[derive(Serialize, Clone, Debug)]
pub struct SliceResult {
    pub musicxml: String,
    pub metadata: ScoreMetadata,
    pub selection: Selection,
    pub report: SliceReport,
}

/// Fail before touching the score if the selection names staves the score
/// does not have, or measures outside its numbering
///
/// Measure numbering may have gaps; a selected number inside the range that
/// no measure carries simply matches nothing.
fn check_selection(score: &Score, selection: &Selection) -> Result<()> {
    let part_count = score.part_count() as u32;
    if let Some(&staff) = selection
        .selected_staves()
        .iter()
        .find(|&&s| s == 0 || s > part_count)
    {
        return Err(SliceError::SelectionMismatch {
            axis: Axis::Staff,
            number: staff,
        });
    }

    let mut measures = BTreeSet::new();
    for part in score.parts() {
        for measure in part.children_named("measure") {
            measures.insert(measure_number(measure)?);
        }
    }
    let (first, last) = match (measures.first(), measures.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => (1, 0),
    };
    if let Some(&measure) = selection
        .selected_measures()
        .iter()
        .find(|&&m| m < first || m > last)
    {
        return Err(SliceError::SelectionMismatch {
            axis: Axis::Measure,
            number: measure,
        });
    }
    Ok(())
}

/// Slice every staff of the score in staff order
///
/// Does not remove staves; see [`remove_unselected_staves`].
pub fn slice_score(score: &mut Score, selection: &Selection) -> Result<SliceReport> {
    check_selection(score, selection)?;

    let mut report = SliceReport::default();
    for (index, part) in score.parts_mut().enumerate() {
        let staff = index as u32 + 1;
        log::debug!(
            "slicing staff {} ({})",
            staff,
            part.attribute("id").unwrap_or("unknown")
        );
        staff::slice_staff(part, staff, selection, &mut report)?;
    }
    Ok(report)
}

/// Slice the score, then remove staves the selection never chose
pub fn apply_selection(score: &mut Score, selection: &Selection) -> Result<SliceReport> {
    let mut report = slice_score(score, selection)?;
    report.removed_parts = remove_unselected_staves(score, selection.selected_staves())?;
    Ok(report)
}

/// Parse an address expression and resolve it against a score
pub fn resolve_selection(
    score: &Score,
    expression: &str,
    orientation: Orientation,
) -> Result<(ScoreMetadata, Selection)> {
    let metadata = ScoreMetadata::from_score(score)?;
    let expression = parse_expression(expression)?;
    let selection = build_selection(&metadata, &expression, orientation)?;
    Ok((metadata, selection))
}

/// Slice a MusicXML document by an address expression
///
/// # Arguments
///
/// * `musicxml` - partwise MusicXML document
/// * `expression` - address expression, e.g. `1-4/1+2/@all`
/// * `settings` - optional settings (defaults if None)
pub fn slice_musicxml(
    musicxml: &str,
    expression: &str,
    settings: Option<SliceSettings>,
) -> Result<SliceResult> {
    let settings = settings.unwrap_or_default();

    let mut score = Score::parse(musicxml)?;
    let (metadata, selection) = resolve_selection(&score, expression, settings.orientation)?;
    let report = apply_selection(&mut score, &selection)?;

    log::info!(
        "sliced '{}': {} measure(s) removed, {} note(s) silenced, {} part(s) removed",
        expression,
        report.measures_removed,
        report.notes_silenced,
        report.removed_parts.len()
    );

    Ok(SliceResult {
        musicxml: score.to_musicxml()?,
        metadata,
        selection,
        report,
    })
}
