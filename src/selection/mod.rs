//! Address resolution
//!
//! `resolver` turns single ranges into numbers; `builder` combines the three
//! axes into a [`crate::models::Selection`].

pub mod builder;
pub mod resolver;

pub use builder::{build_selection, pick};
pub use resolver::RangeResolver;
