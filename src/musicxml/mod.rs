//! MusicXML document layer
//!
//! Reads a partwise MusicXML document into an owned tree, exposes its parts
//! and measures, extracts [`crate::models::ScoreMetadata`], and writes the
//! (possibly sliced) tree back out.

pub mod errors;
pub mod metadata;
pub mod reader;
pub mod score;
pub mod tree;
pub mod writer;

pub use errors::ScoreError;
pub use reader::read_document;
pub use score::{measure_number, Score};
pub use tree::{Element, XmlNode};
pub use writer::write_document;

/// `<?xml ...?>` declaration fields
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

/// Anything before the root element
#[derive(Clone, Debug, PartialEq)]
pub enum PrologNode {
    Declaration(Declaration),
    DocType(String),
    Node(XmlNode),
}

/// A whole XML document: prolog, root element, and trailing nodes
#[derive(Clone, Debug, PartialEq)]
pub struct XmlDocument {
    pub prolog: Vec<PrologNode>,
    pub root: Element,
    pub epilog: Vec<XmlNode>,
}
