//! Structural cleanup: remove staves the selection never chose
//!
//! Parts are visited from last to first so removing one never shifts the
//! index of a part not yet visited. Each removed `<part>` takes its
//! `<score-part>` descriptor with it.

use crate::musicxml::{ScoreError, Score};
use std::collections::BTreeSet;

/// Remove every part whose 1-based position is not in `selected`
///
/// Returns the ids of removed parts in document order.
pub fn remove_unselected_staves(
    score: &mut Score,
    selected: &BTreeSet<u32>,
) -> Result<Vec<String>, ScoreError> {
    let part_count = score.part_count();
    let descriptors = score
        .part_list()
        .map(|list| list.children_named("score-part").count())
        .unwrap_or(0);
    if descriptors != part_count {
        return Err(ScoreError::PartListMismatch {
            parts: part_count,
            descriptors,
        });
    }

    let root = score.root_mut();
    let mut removed = Vec::new();

    for index in (0..part_count).rev() {
        let staff = index as u32 + 1;
        if selected.contains(&staff) {
            continue;
        }

        if let Some(position) = root.position_of_nth("part", index) {
            if let Some(part) = root.remove_at(position).as_element() {
                removed.push(part.attribute("id").unwrap_or("unknown").to_string());
            }
        }
        if let Some(list) = root.child_mut("part-list") {
            if let Some(position) = list.position_of_nth("score-part", index) {
                list.remove_at(position);
            }
        }
    }

    if !removed.is_empty() {
        let has_groups = score
            .part_list()
            .map_or(false, |list| list.has_child("part-group"));
        if has_groups {
            log::warn!("part-group entries are left as they were after removing staves");
        }
        log::info!("removed {} unselected staves", removed.len());
    }

    removed.reverse();
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML: &str = r#"<score-partwise>
  <part-list>
    <score-part id="P1"><part-name>Flute</part-name></score-part>
    <score-part id="P2"><part-name>Oboe</part-name></score-part>
    <score-part id="P3"><part-name>Horn</part-name></score-part>
  </part-list>
  <part id="P1"/>
  <part id="P2"/>
  <part id="P3"/>
</score-partwise>"#;

    #[test]
    fn test_removes_part_and_descriptor_together() {
        let mut score = Score::parse(XML).unwrap();
        let removed = remove_unselected_staves(&mut score, &BTreeSet::from([1, 3])).unwrap();

        assert_eq!(removed, vec!["P2"]);
        assert_eq!(score.part_ids(), vec!["P1", "P3"]);
        let descriptors: Vec<_> = score
            .part_list()
            .unwrap()
            .children_named("score-part")
            .map(|p| p.attribute("id").unwrap())
            .collect();
        assert_eq!(descriptors, vec!["P1", "P3"]);
    }

    #[test]
    fn test_removes_several_in_reverse() {
        let mut score = Score::parse(XML).unwrap();
        let removed = remove_unselected_staves(&mut score, &BTreeSet::from([2])).unwrap();

        assert_eq!(removed, vec!["P1", "P3"]);
        assert_eq!(score.part_ids(), vec!["P2"]);
        let out = score.to_musicxml().unwrap();
        assert!(!out.contains("\n\n"));
    }

    #[test]
    fn test_part_list_mismatch() {
        let mut score = Score::parse(
            r#"<score-partwise><part-list><score-part id="P1"/></part-list><part id="P1"/><part id="P2"/></score-partwise>"#,
        )
        .unwrap();
        assert_eq!(
            remove_unselected_staves(&mut score, &BTreeSet::from([1])),
            Err(ScoreError::PartListMismatch {
                parts: 2,
                descriptors: 1
            })
        );
    }
}
