//! Extract [`ScoreMetadata`] from a parsed score

use super::errors::ScoreError;
use super::score::{measure_number, time_signature, Score};
use crate::models::{AxisBounds, ScoreMetadata};
use std::collections::BTreeMap;

impl ScoreMetadata {
    /// Read measure bounds, staff count and per-measure beat counts
    ///
    /// Measure numbers and time signatures come from the first part; every
    /// part of a well-formed score shares them.
    pub fn from_score(score: &Score) -> Result<Self, ScoreError> {
        let first_part = score.parts().next().ok_or_else(|| {
            ScoreError::MissingRequiredElement("No parts found in score".to_string())
        })?;

        let measures: Vec<_> = first_part.children_named("measure").collect();
        let (first, last) = match (measures.first(), measures.last()) {
            (Some(first), Some(last)) => (measure_number(first)?, measure_number(last)?),
            _ => {
                return Err(ScoreError::MissingRequiredElement(
                    "first part has no measures".to_string(),
                ))
            }
        };

        let mut beats_per_measure = BTreeMap::new();
        let mut numerator: Option<u32> = None;
        for measure in &measures {
            for attributes in measure.children_named("attributes") {
                if let Some(time) = attributes.child("time") {
                    numerator = time_signature(time)?.map(|(beats, _)| beats);
                }
            }
            if let Some(beats) = numerator {
                beats_per_measure.insert(measure_number(measure)?, beats);
            }
        }

        let metadata = ScoreMetadata::new(
            AxisBounds::new(first, last),
            score.part_count() as u32,
            beats_per_measure,
        );
        log::debug!(
            "score metadata: measures {}-{}, {} staves, {} measures with a time signature",
            first,
            last,
            metadata.staff_bounds.last,
            metadata.beats_per_measure.len()
        );
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML: &str = r#"<score-partwise>
  <part-list>
    <score-part id="P1"/>
    <score-part id="P2"/>
  </part-list>
  <part id="P1">
    <measure number="0">
      <note><rest/><duration>1</duration></note>
    </measure>
    <measure number="1">
      <attributes><divisions>1</divisions><time><beats>4</beats><beat-type>4</beat-type></time></attributes>
    </measure>
    <measure number="2"/>
    <measure number="3">
      <attributes><time><beats>3</beats><beat-type>4</beat-type></time></attributes>
    </measure>
  </part>
  <part id="P2"/>
</score-partwise>"#;

    #[test]
    fn test_from_score() {
        let score = Score::parse(XML).unwrap();
        let meta = ScoreMetadata::from_score(&score).unwrap();

        assert_eq!(meta.measure_bounds, AxisBounds::new(0, 3));
        assert_eq!(meta.staff_bounds, AxisBounds::new(1, 2));
        assert_eq!(meta.beats_per_measure, BTreeMap::from([(1, 4), (2, 4), (3, 3)]));
        assert_eq!(meta.beat_start, 1);
    }

    #[test]
    fn test_empty_score() {
        let score = Score::parse("<score-partwise><part-list/></score-partwise>").unwrap();
        assert!(matches!(
            ScoreMetadata::from_score(&score),
            Err(ScoreError::MissingRequiredElement(_))
        ));
    }
}
