//! Parsing module for address expressions
//!
//! Converts the compact textual syntax into the structured
//! [`crate::models::AddressExpression`] the selection builder consumes.

pub mod expression;

// Re-export commonly used types
pub use expression::{parse_expression, ExpressionError};
