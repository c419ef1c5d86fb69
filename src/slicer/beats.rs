//! Fractional beat positions and beat-window matching

use crate::models::AddressRange;
use crate::musicxml::ScoreError;
use num_rational::Rational64;

/// Position or length in beats; beats are numbered from 1
pub type Beat = Rational64;

/// Beat-length of a duration given in divisions
///
/// `duration / (beat_factor * divisions)` with
/// `beat_factor = numerator / denominator`. Callers guarantee a non-zero
/// numerator and divisions. Products too large for `i64` are rejected.
pub fn beat_length(
    duration: i64,
    divisions: i64,
    numerator: i64,
    denominator: i64,
) -> Result<Beat, ScoreError> {
    let top = duration
        .checked_mul(denominator)
        .ok_or_else(|| overflow("duration", duration))?;
    let bottom = numerator
        .checked_mul(divisions)
        .ok_or_else(|| overflow("divisions", divisions))?;
    Ok(Beat::new(top, bottom))
}

fn overflow(element: &str, value: i64) -> ScoreError {
    ScoreError::InvalidValue {
        element: element.to_string(),
        value: value.to_string(),
    }
}

/// True if `value` lies inside the window; symbolic bounds are open
pub fn window_contains(window: &AddressRange, value: Beat) -> bool {
    let after_start = window
        .start
        .value()
        .map_or(true, |s| value >= Beat::from_integer(s as i64));
    let before_end = window
        .end
        .value()
        .map_or(true, |e| value <= Beat::from_integer(e as i64));
    after_start && before_end
}

/// Window whose concrete end lies before `value`
fn ends_before(window: &AddressRange, value: Beat) -> bool {
    window
        .end
        .value()
        .map_or(false, |e| Beat::from_integer(e as i64) < value)
}

/// Cursor over one staff's ascending beat windows within a measure
///
/// Advances past windows that end before the note being tested and never
/// moves backwards, except through [`BeatWindows::rewind`]. The index stops at
/// the last window.
#[derive(Debug)]
pub struct BeatWindows<'a> {
    windows: &'a [AddressRange],
    index: usize,
}

impl<'a> BeatWindows<'a> {
    pub fn new(windows: &'a [AddressRange]) -> Self {
        Self { windows, index: 0 }
    }

    /// Does a note spanning `start..=end` touch the current window?
    pub fn admits(&mut self, start: Beat, end: Beat) -> bool {
        while self.index + 1 < self.windows.len() && ends_before(&self.windows[self.index], start) {
            self.index += 1;
        }
        match self.windows.get(self.index) {
            Some(window) => window_contains(window, start) || window_contains(window, end),
            None => false,
        }
    }

    /// Restart from the first window (after a `<backup>`)
    pub fn rewind(&mut self) {
        self.index = 0;
    }

    pub fn current(&self) -> Option<&AddressRange> {
        self.windows.get(self.index)
    }
}
