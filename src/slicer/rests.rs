//! Note-to-rest conversion

use crate::musicxml::{Element, XmlNode};

/// Elements that may precede the pitch/rest choice inside `<note>`
const LEADING: [&str; 3] = ["grace", "cue", "chord"];

/// Strip pitch and stem from a note, leaving a rest of the same duration
///
/// Type, voice, lyrics and everything else stay. The `<rest/>` takes the
/// place of `<pitch>` (or `<unpitched>`). Returns `false` when the note was
/// already a rest.
pub fn convert_to_rest(note: &mut Element) -> bool {
    if note.has_child("rest") {
        return false;
    }

    let pitched = note
        .children
        .iter()
        .position(|n| n.is_element_named("pitch") || n.is_element_named("unpitched"));

    match pitched {
        Some(index) => note.children[index] = XmlNode::Element(Element::new("rest")),
        None => {
            let index = note
                .children
                .iter()
                .position(|n| n.as_element().map_or(false, |e| !LEADING.contains(&e.name.as_str())))
                .unwrap_or(note.children.len());
            note.children.insert(index, XmlNode::Element(Element::new("rest")));
        }
    }

    note.remove_children_named("pitch");
    note.remove_children_named("unpitched");
    note.remove_children_named("stem");
    true
}
