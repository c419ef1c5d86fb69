//! Partwise MusicXML score wrapper
//!
//! Staves are the `<part>` elements of a `score-partwise` document, numbered
//! from 1 in document order. Each part's `<score-part>` descriptor sits at the
//! same position inside `<part-list>`.

use super::errors::ScoreError;
use super::reader::read_document;
use super::tree::Element;
use super::writer::write_document;
use super::XmlDocument;

#[derive(Clone, Debug, PartialEq)]
pub struct Score {
    document: XmlDocument,
}

impl Score {
    /// Parse a MusicXML string
    pub fn parse(xml: &str) -> Result<Self, ScoreError> {
        Self::from_document(read_document(xml)?)
    }

    pub fn from_document(document: XmlDocument) -> Result<Self, ScoreError> {
        match document.root.name.as_str() {
            "score-partwise" => Ok(Self { document }),
            other => Err(ScoreError::UnsupportedFormat(format!(
                "Expected score-partwise, found {}",
                other
            ))),
        }
    }

    pub fn root(&self) -> &Element {
        &self.document.root
    }

    pub(crate) fn root_mut(&mut self) -> &mut Element {
        &mut self.document.root
    }

    pub fn document(&self) -> &XmlDocument {
        &self.document
    }

    /// `<part>` elements in staff order
    pub fn parts(&self) -> impl Iterator<Item = &Element> {
        self.document.root.children_named("part")
    }

    pub(crate) fn parts_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.document
            .root
            .elements_mut()
            .filter(|e| e.name == "part")
    }

    pub fn part_count(&self) -> usize {
        self.parts().count()
    }

    pub fn part_ids(&self) -> Vec<String> {
        self.parts()
            .map(|p| p.attribute("id").unwrap_or("unknown").to_string())
            .collect()
    }

    pub fn part_list(&self) -> Option<&Element> {
        self.document.root.child("part-list")
    }

    /// Serialize back to MusicXML text
    pub fn to_musicxml(&self) -> Result<String, ScoreError> {
        write_document(&self.document)
    }

    pub fn into_document(self) -> XmlDocument {
        self.document
    }
}

/// Numeric `number` attribute of a `<measure>`
pub fn measure_number(measure: &Element) -> Result<u32, ScoreError> {
    let raw = measure.attribute("number").ok_or_else(|| {
        ScoreError::MissingRequiredElement("measure without a number attribute".to_string())
    })?;
    raw.trim().parse().map_err(|_| ScoreError::InvalidValue {
        element: "measure number".to_string(),
        value: raw.to_string(),
    })
}

/// Numeric text of a child element, if present
pub fn child_number(element: &Element, tag: &str) -> Result<Option<i64>, ScoreError> {
    match element.child_text(tag) {
        Some(text) => text
            .parse()
            .map(Some)
            .map_err(|_| ScoreError::InvalidValue {
                element: tag.to_string(),
                value: text,
            }),
        None => Ok(None),
    }
}

/// Numerator and denominator of a `<time>` element
///
/// Composite numerators (`3+2`) and repeated `<beats>` groups are summed.
/// Returns `None` for `<senza-misura/>`.
pub fn time_signature(time: &Element) -> Result<Option<(u32, u32)>, ScoreError> {
    let mut numerator = 0u32;
    let mut seen = false;
    for beats in time.children_named("beats") {
        let text = beats.text().unwrap_or_default();
        for part in text.split('+') {
            let value: u32 = part.trim().parse().map_err(|_| ScoreError::InvalidValue {
                element: "beats".to_string(),
                value: text.clone(),
            })?;
            numerator = numerator
                .checked_add(value)
                .ok_or_else(|| ScoreError::InvalidValue {
                    element: "beats".to_string(),
                    value: text.clone(),
                })?;
        }
        seen = true;
    }
    if !seen {
        return Ok(None);
    }

    let denominator = match time.child_text("beat-type") {
        Some(text) => text.parse().map_err(|_| ScoreError::InvalidValue {
            element: "beat-type".to_string(),
            value: text,
        })?,
        None => {
            return Err(ScoreError::MissingRequiredElement(
                "time signature missing beat-type".to_string(),
            ))
        }
    };
    Ok(Some((numerator, denominator)))
}
