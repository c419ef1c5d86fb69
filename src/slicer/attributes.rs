//! Attribute state carried across measures
//!
//! An `<attributes>` block stays in force until another one overrides it. The
//! slicer keeps the latest value of every attribute child so that a change
//! declared in a dropped measure can be re-declared in the next kept one.

use crate::musicxml::score::{child_number, time_signature};
use crate::musicxml::{Element, ScoreError};

/// Child tag plus its `number` attribute, so `<clef number="2">` is tracked
/// apart from `<clef number="1">`
#[derive(Clone, Debug, PartialEq, Eq)]
struct AttributeKey {
    tag: String,
    number: Option<String>,
}

impl AttributeKey {
    fn of(element: &Element) -> Self {
        Self {
            tag: element.name.clone(),
            number: element.attribute("number").map(str::to_string),
        }
    }
}

/// Position of an attributes child in the MusicXML content model
fn schema_rank(tag: &str) -> usize {
    match tag {
        "footnote" => 0,
        "level" => 1,
        "divisions" => 2,
        "key" => 3,
        "time" => 4,
        "staves" => 5,
        "part-symbol" => 6,
        "instruments" => 7,
        "clef" => 8,
        "staff-details" => 9,
        "transpose" => 10,
        "for-part" => 11,
        "directive" => 12,
        "measure-style" => 13,
        _ => 14,
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeState {
    entries: Vec<(AttributeKey, Element)>,
}

impl AttributeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge every child of an `<attributes>` block, replacing older values
    pub fn merge_block(&mut self, block: &Element) {
        for child in block.elements() {
            self.set(child.clone());
        }
    }

    pub fn set(&mut self, element: Element) {
        let key = AttributeKey::of(&element);
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = element,
            None => self.entries.push((key, element)),
        }
    }

    pub fn get(&self, tag: &str) -> Option<&Element> {
        self.entries
            .iter()
            .find(|(k, _)| k.tag == tag)
            .map(|(_, e)| e)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Build an `<attributes>` block holding every tracked value
    pub fn to_element(&self) -> Element {
        let mut children: Vec<&Element> = self.entries.iter().map(|(_, e)| e).collect();
        children.sort_by_key(|e| schema_rank(&e.name));

        children
            .into_iter()
            .fold(Element::new("attributes"), |block, child| block.with_child(child.clone()))
    }

    /// Divisions per quarter note
    pub fn divisions(&self) -> Result<Option<i64>, ScoreError> {
        let Some(block) = self.get("divisions") else {
            return Ok(None);
        };
        let text = block.text().unwrap_or_default();
        text.parse().map(Some).map_err(|_| ScoreError::InvalidValue {
            element: "divisions".to_string(),
            value: text,
        })
    }

    pub fn time_signature(&self) -> Result<Option<(u32, u32)>, ScoreError> {
        match self.get("time") {
            Some(time) => time_signature(time),
            None => Ok(None),
        }
    }
}

/// Duration of a note, backup or forward element in divisions
pub fn duration_of(element: &Element) -> Result<Option<i64>, ScoreError> {
    match child_number(element, "duration")? {
        Some(d) if d < 0 => Err(ScoreError::InvalidValue {
            element: "duration".to_string(),
            value: d.to_string(),
        }),
        other => Ok(other),
    }
}
