//! Address expression parser
//!
//! Turns `measures/staves/beats` strings such as `1-3/1+2,2/@1-2@4,@all`
//! into an [`AddressExpression`].
//!
//! - measures: ranges separated by `,`
//! - staves: one group per selected measure, separated by `,`; ranges inside a
//!   group separated by `+`
//! - beats: one group per selected measure (`,`), one list per staff (`+`),
//!   each range in a list prefixed by `@`
//!
//! A range is `all`, a single item, or `item-item`, where an item is a number,
//! `start` or `end`.

use crate::models::{AddressExpression, AddressRange, Axis, Bound};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    #[error("expected measures/staves/beats, found {found} segment(s)")]
    SegmentCount { found: usize },

    #[error("empty {axis} expression at offset {offset}")]
    Empty { axis: Axis, offset: usize },

    #[error("invalid number '{text}' at offset {offset}")]
    InvalidNumber { text: String, offset: usize },

    #[error("unknown token '{text}' at offset {offset}")]
    UnknownToken { text: String, offset: usize },

    #[error("beat list '{text}' at offset {offset} must start with '@'")]
    MissingBeatMarker { text: String, offset: usize },
}

pub type Result<T> = std::result::Result<T, ExpressionError>;

/// Parse a full address expression
pub fn parse_expression(input: &str) -> Result<AddressExpression> {
    let trimmed = input.trim();
    let base = input.len() - input.trim_start().len();

    let segments = split_offsets(trimmed, base, '/');
    if segments.len() != 3 {
        return Err(ExpressionError::SegmentCount {
            found: segments.len(),
        });
    }

    let (m_off, measures) = segments[0];
    let (s_off, staves) = segments[1];
    let (b_off, beats) = segments[2];

    let expression = AddressExpression {
        measure_ranges: parse_range_list(measures, m_off, ',', Axis::Measure)?,
        staff_ranges: split_offsets(staves, s_off, ',')
            .into_iter()
            .map(|(off, group)| parse_range_list(group, off, '+', Axis::Staff))
            .collect::<Result<_>>()?,
        beat_ranges: split_offsets(beats, b_off, ',')
            .into_iter()
            .map(|(off, group)| parse_beat_group(group, off))
            .collect::<Result<_>>()?,
    };

    log::debug!("parsed address expression '{}'", trimmed);
    Ok(expression)
}

fn parse_range_list(text: &str, offset: usize, sep: char, axis: Axis) -> Result<Vec<AddressRange>> {
    split_offsets(text, offset, sep)
        .into_iter()
        .map(|(off, item)| parse_range(item, off, axis))
        .collect()
}

/// `@1-2@4+@all`: one `@`-list per staff
fn parse_beat_group(text: &str, offset: usize) -> Result<Vec<Vec<AddressRange>>> {
    split_offsets(text, offset, '+')
        .into_iter()
        .map(|(off, list)| parse_beat_list(list, off))
        .collect()
}

fn parse_beat_list(text: &str, offset: usize) -> Result<Vec<AddressRange>> {
    let Some(rest) = text.strip_prefix('@') else {
        if text.is_empty() {
            return Err(ExpressionError::Empty {
                axis: Axis::Beat,
                offset,
            });
        }
        return Err(ExpressionError::MissingBeatMarker {
            text: text.to_string(),
            offset,
        });
    };
    parse_range_list(rest, offset + 1, '@', Axis::Beat)
}

fn parse_range(text: &str, offset: usize, axis: Axis) -> Result<AddressRange> {
    if text.is_empty() {
        return Err(ExpressionError::Empty { axis, offset });
    }
    if text == "all" {
        return Ok(match axis {
            Axis::Beat => AddressRange::all_beats(),
            _ => AddressRange::all(),
        });
    }

    match text.split_once('-') {
        Some((start, end)) => Ok(AddressRange {
            start: parse_item(start, offset, axis)?,
            end: parse_item(end, offset + start.len() + 1, axis)?,
        }),
        None => {
            let item = parse_item(text, offset, axis)?;
            Ok(AddressRange {
                start: item,
                end: item,
            })
        }
    }
}

fn parse_item(text: &str, offset: usize, axis: Axis) -> Result<Bound> {
    match text {
        "start" => Ok(Bound::Start),
        "end" if axis == Axis::Beat => Ok(Bound::EndOfMeasure),
        "end" => Ok(Bound::End),
        "" => Err(ExpressionError::Empty { axis, offset }),
        _ if text.starts_with(|c: char| c.is_ascii_digit()) => {
            text.parse()
                .map(Bound::Value)
                .map_err(|_| ExpressionError::InvalidNumber {
                    text: text.to_string(),
                    offset,
                })
        }
        _ => Err(ExpressionError::UnknownToken {
            text: text.to_string(),
            offset,
        }),
    }
}

/// Split on `sep`, pairing each piece with its byte offset in the original input
fn split_offsets(text: &str, base: usize, sep: char) -> Vec<(usize, &str)> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if c == sep {
            pieces.push((base + start, &text[start..i]));
            start = i + c.len_utf8();
        }
    }
    pieces.push((base + start, &text[start..]));
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(start: u32, end: u32) -> AddressRange {
        AddressRange::new(start, end)
    }

    #[test]
    fn test_parse_all() {
        let expr = parse_expression("all/all/@all").unwrap();
        assert_eq!(expr, AddressExpression::everything());
    }

    #[test]
    fn test_parse_per_measure_groups() {
        let expr = parse_expression("1,3/1+2,2/@1-2@4+@all,@start-2").unwrap();

        assert_eq!(expr.measure_ranges, vec![AddressRange::single(1), AddressRange::single(3)]);
        assert_eq!(
            expr.staff_ranges,
            vec![
                vec![AddressRange::single(1), AddressRange::single(2)],
                vec![AddressRange::single(2)],
            ]
        );
        assert_eq!(
            expr.beat_ranges,
            vec![
                vec![vec![r(1, 2), AddressRange::single(4)], vec![AddressRange::all_beats()]],
                vec![vec![AddressRange::new(Bound::Start, 2)]],
            ]
        );
    }

    #[test]
    fn test_end_means_end_of_measure_on_beats() {
        let expr = parse_expression("2-end/1-end/@3-end").unwrap();
        assert_eq!(expr.measure_ranges[0].end, Bound::End);
        assert_eq!(expr.staff_ranges[0][0].end, Bound::End);
        assert_eq!(expr.beat_ranges[0][0][0].end, Bound::EndOfMeasure);
    }

    #[test]
    fn test_segment_count() {
        assert_eq!(
            parse_expression("1-3/all"),
            Err(ExpressionError::SegmentCount { found: 2 })
        );
    }

    #[test]
    fn test_errors_report_offsets() {
        assert_eq!(
            parse_expression("1-x/all/@all"),
            Err(ExpressionError::UnknownToken {
                text: "x".into(),
                offset: 2
            })
        );
        assert_eq!(
            parse_expression("1/all/1-2"),
            Err(ExpressionError::MissingBeatMarker {
                text: "1-2".into(),
                offset: 6
            })
        );
        assert_eq!(
            parse_expression("1,/all/@all"),
            Err(ExpressionError::Empty {
                axis: Axis::Measure,
                offset: 2
            })
        );
        assert!(matches!(
            parse_expression("99999999999/all/@all"),
            Err(ExpressionError::InvalidNumber { .. })
        ));
    }
}
