//! Gap injection: every item after the first is pushed back by one more
//! step than the item before it, keeping its duration.
//!
//! The same offsets can be applied to a draft before rendering or to SRT
//! text after rendering, and both give the same timings for segment-level
//! cues.

use crate::draft::Draft;
use crate::timecode::{self, MICROS_PER_MILLI, MILLIS_PER_SECOND};

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3}) --> ([0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3})")
        .unwrap()
});

/// Largest gap the command line accepts: one day per step.
pub const MAX_GAP_SECS: u64 = 86_400;

/// The pause added per position, held in whole milliseconds so that the
/// draft and cue representations see exactly the same offsets. Offsets
/// saturate instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    millis: i64,
}

impl Gap {
    pub fn from_secs(secs: u64) -> Self {
        let secs = i64::try_from(secs).unwrap_or(i64::MAX);
        Self::from_millis(secs.saturating_mul(MILLIS_PER_SECOND))
    }

    pub fn from_millis(millis: i64) -> Self {
        Gap { millis }
    }

    pub fn offset_millis(self, position: usize) -> i64 {
        let position = i64::try_from(position).unwrap_or(i64::MAX);
        self.millis.saturating_mul(position)
    }

    pub fn offset_micros(self, position: usize) -> i64 {
        self.offset_millis(position).saturating_mul(MICROS_PER_MILLI)
    }
}

/// Moves the start of every segment but the first in each text track.
///
/// Offsets restart for every track. Durations are left alone and starts
/// never go below zero. Returns the number of segments that were moved.
pub fn shift_draft(draft: &mut Draft, gap: Gap) -> usize {
    let mut shifted = 0;
    for track in draft.text_tracks_mut() {
        for (position, segment) in track.segments.iter_mut().enumerate().skip(1) {
            if let Some(range) = segment.target_timerange.as_mut() {
                range.start = range.start.saturating_add(gap.offset_micros(position)).max(0);
                shifted += 1;
            }
        }
    }
    shifted
}

/// Re-times the `start --> end` lines of rendered SRT text.
///
/// The n-th timing line (counting from zero) is moved by `n` steps. Lines
/// without a timing pair, and timing lines whose end lies before their start,
/// are copied unchanged and do not count.
pub fn shift_cues(input: &str, gap: Gap) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 4);
    let mut position = 0;

    for line in input.split_inclusive('\n') {
        match retime(line, gap.offset_millis(position)) {
            Some(retimed) => {
                out.push_str(&retimed);
                position += 1;
            }
            None => out.push_str(line),
        }
    }

    out
}

fn retime(line: &str, offset: i64) -> Option<String> {
    let caps = TIMING_REGEX.captures(line)?;
    let span = caps.get(0)?;
    let start = timecode::parse_millis(&caps[1]);
    let end = timecode::parse_millis(&caps[2]);

    let duration = end - start;
    if duration < 0 {
        debug!("Leaving timing line with negative duration as is: {}", line.trim_end());
        return None;
    }
    let new_start = start.saturating_add(offset).max(0);

    Some(format!(
        "{}{} --> {}{}",
        &line[..span.start()],
        timecode::format_millis(new_start),
        timecode::format_millis(new_start.saturating_add(duration)),
        &line[span.end()..]
    ))
}
