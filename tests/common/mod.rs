// Shared MusicXML fixtures for integration tests
#![allow(dead_code)]

pub const FOUR_FOUR: &str = "<attributes>\n        <divisions>1</divisions>\n        <time><beats>4</beats><beat-type>4</beat-type></time>\n      </attributes>";

/// Quarter note with voice, type and stem
pub fn note(step: &str) -> String {
    format!(
        "<note><pitch><step>{}</step><octave>4</octave></pitch><duration>1</duration><voice>1</voice><type>quarter</type><stem>up</stem></note>",
        step
    )
}

/// Measure with optional attributes block and pre-rendered children
pub fn measure(number: u32, attributes: Option<&str>, children: &[String]) -> String {
    let mut body = String::new();
    if let Some(attributes) = attributes {
        body.push_str("\n      ");
        body.push_str(attributes);
    }
    for child in children {
        body.push_str("\n      ");
        body.push_str(child);
    }
    format!("<measure number=\"{}\">{}\n    </measure>", number, body)
}

/// Measure of quarter notes
pub fn quarters(number: u32, attributes: Option<&str>, steps: &[&str]) -> String {
    let notes: Vec<String> = steps.iter().map(|s| note(s)).collect();
    measure(number, attributes, &notes)
}

/// Partwise score from (id, measures) pairs
pub fn score(parts: &[(&str, Vec<String>)]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<score-partwise version=\"3.1\">\n  <part-list>");
    for (id, _) in parts {
        xml.push_str(&format!(
            "\n    <score-part id=\"{}\"><part-name>{}</part-name></score-part>",
            id, id
        ));
    }
    xml.push_str("\n  </part-list>");
    for (id, measures) in parts {
        xml.push_str(&format!("\n  <part id=\"{}\">", id));
        for m in measures {
            xml.push_str("\n    ");
            xml.push_str(m);
        }
        xml.push_str("\n  </part>");
    }
    xml.push_str("\n</score-partwise>\n");
    xml
}

/// Two staves, four 4/4 measures of quarter notes each
pub fn two_staff_score() -> String {
    let upper: Vec<String> = (1..=4)
        .map(|n| quarters(n, (n == 1).then_some(FOUR_FOUR), &["C", "D", "E", "F"]))
        .collect();
    let lower: Vec<String> = (1..=4)
        .map(|n| quarters(n, (n == 1).then_some(FOUR_FOUR), &["G", "A", "B", "C"]))
        .collect();
    score(&[("P1", upper), ("P2", lower)])
}

/// Measure numbers of a part in the output
pub fn measure_numbers(xml: &str, part_id: &str) -> Vec<String> {
    let doc = roxmltree::Document::parse(xml).expect("output should be well-formed");
    let part = find_part(&doc, part_id);
    part.children()
        .filter(|n| n.has_tag_name("measure"))
        .map(|m| m.attribute("number").unwrap_or_default().to_string())
        .collect()
}

/// Pitch step of every note in one measure of a part; `None` for rests
pub fn steps(xml: &str, part_id: &str, measure: &str) -> Vec<Option<String>> {
    let doc = roxmltree::Document::parse(xml).expect("output should be well-formed");
    let part = find_part(&doc, part_id);
    let measure = part
        .children()
        .find(|n| n.has_tag_name("measure") && n.attribute("number") == Some(measure))
        .expect("measure should exist");
    measure
        .children()
        .filter(|n| n.has_tag_name("note"))
        .map(|note| {
            note.descendants()
                .find(|n| n.has_tag_name("step"))
                .and_then(|s| s.text())
                .map(str::to_string)
        })
        .collect()
}

fn find_part<'a, 'input>(
    doc: &'a roxmltree::Document<'input>,
    part_id: &str,
) -> roxmltree::Node<'a, 'input> {
    doc.root_element()
        .children()
        .find(|n| n.has_tag_name("part") && n.attribute("id") == Some(part_id))
        .expect("part should exist")
}

pub fn s(step: &str) -> Option<String> {
    Some(step.to_string())
}
