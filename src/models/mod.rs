//! Models module for score slicing
//!
//! Address expressions, score metadata and the resolved selection.

pub mod address;
pub mod metadata;
pub mod selection;

// Re-export commonly used types
pub use address::{AddressExpression, AddressRange, Axis, Bound};
pub use metadata::{AxisBounds, ScoreMetadata, BEAT_START};
pub use selection::{Orientation, Selection};
