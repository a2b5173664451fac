//! Conversion between integer time values and `HH:MM:SS,mmm` cue timestamps.
//!
//! Drafts count time in microseconds while cue timestamps only resolve
//! milliseconds. Going from one to the other truncates; anything below zero
//! is written as `00:00:00,000`.

pub const MICROS_PER_MILLI: i64 = 1_000;
pub const MILLIS_PER_SECOND: i64 = 1_000;

const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;

pub fn micros_to_millis(micros: i64) -> i64 {
    micros / MICROS_PER_MILLI
}

pub fn millis_to_micros(millis: i64) -> i64 {
    millis * MICROS_PER_MILLI
}

/// Formats a microsecond value as a cue timestamp.
pub fn format_micros(micros: i64) -> String {
    format_millis(micros_to_millis(micros))
}

/// Formats `millis` as `HH:MM:SS,mmm`. Hours past 99 widen the hour field
/// instead of wrapping.
pub fn format_millis(millis: i64) -> String {
    let millis = millis.max(0);
    let hours = millis / MILLIS_PER_HOUR;
    let minutes = (millis % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE;
    let seconds = (millis % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND;
    let millis = millis % MILLIS_PER_SECOND;
    format!(
        "{:02}:{:02}:{:02},{:03}",
        hours, minutes, seconds, millis
    )
}

/// Reads a `HH:MM:SS,mmm` timestamp back into milliseconds.
///
/// Digits are taken from fixed byte offsets and decoded as `byte - b'0'`;
/// separators are not checked. Input shorter than twelve bytes reads the
/// missing positions as zero.
pub fn parse_millis(ts: &str) -> i64 {
    let bytes = ts.as_bytes();
    let digit = |i: usize| bytes.get(i).map_or(0, |&b| i64::from(b) - i64::from(b'0'));

    let hours = digit(0) * 10 + digit(1);
    let minutes = digit(3) * 10 + digit(4);
    let seconds = digit(6) * 10 + digit(7);
    let millis = digit(9) * 100 + digit(10) * 10 + digit(11);

    hours * MILLIS_PER_HOUR + minutes * MILLIS_PER_MINUTE + seconds * MILLIS_PER_SECOND + millis
}
