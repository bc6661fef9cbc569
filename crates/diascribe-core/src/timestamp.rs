//! Subtitle timestamp parsing

use chrono::{NaiveTime, Timelike};

use crate::error::SubtitleError;

/// Clock layout once the SRT comma has been swapped for a dot
const CLOCK_FORMAT: &str = "%H:%M:%S%.f";

/// Longest fraction accepted; the digits are read as microseconds
const MAX_FRACTION_DIGITS: usize = 6;

/// Convert an SRT timestamp (`HH:MM:SS,fff`) into seconds.
///
/// The fraction is left-aligned, so `,5`, `,500` and `,500000` all mean
/// half a second.
pub fn timestamp_to_seconds(timestamp: &str) -> Result<f64, SubtitleError> {
    let invalid = || SubtitleError::InvalidTimestamp(timestamp.to_string());

    let (clock, fraction) = timestamp.split_once(',').ok_or_else(invalid)?;
    if fraction.is_empty()
        || fraction.len() > MAX_FRACTION_DIGITS
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let time = NaiveTime::parse_from_str(&format!("{}.{}", clock, fraction), CLOCK_FORMAT)
        .map_err(|_| invalid())?;
    // chrono represents a leap second as an extra second of nanoseconds
    if time.nanosecond() >= 1_000_000_000 {
        return Err(invalid());
    }

    let whole_seconds = time.num_seconds_from_midnight();
    let microseconds = time.nanosecond() / 1_000;

    Ok(f64::from(whole_seconds) + f64::from(microseconds) / 1_000_000.0)
}
