//! EMA score slicer
//!
//! Resolves measure/staff/beat address expressions against a partwise
//! MusicXML score and rewrites the score so only the addressed content
//! remains: unselected notes become rests, unselected measures are dropped,
//! and staves never referenced are removed along with their part-list
//! entries.

pub mod errors;
pub mod models;
pub mod musicxml;
pub mod parse;
pub mod selection;
pub mod slicer;
pub mod api;

// Re-export commonly used types
pub use errors::SliceError;
pub use models::{
    AddressExpression, AddressRange, Axis, AxisBounds, Bound, Orientation, ScoreMetadata, Selection,
};
pub use musicxml::{Score, ScoreError};
pub use parse::{parse_expression, ExpressionError};
pub use selection::{build_selection, RangeResolver};
pub use slicer::{
    apply_selection, remove_unselected_staves, resolve_selection, slice_musicxml, slice_score,
    SliceReport, SliceResult, SliceSettings,
};
