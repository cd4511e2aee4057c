//! Value encodings required by the MSP XML schema.

use chrono::NaiveDateTime;

/// Format of every date/time field. No offset is written.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn format_timestamp(time: NaiveDateTime) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Split seconds into hours, minutes and seconds.
fn split_seconds(seconds: i64) -> (i64, i64, i64) {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    (hours, minutes, secs)
}

/// Encode a duration as `PT{h}H{m}M{s}S`. Hours are not folded into days.
pub fn duration_to_msp(seconds: i64) -> String {
    let (hours, minutes, secs) = split_seconds(seconds);
    format!("PT{hours}H{minutes}M{secs}S")
}

/// Inverse of [`duration_to_msp`].
pub fn msp_to_duration(text: &str) -> Option<i64> {
    let rest = text.strip_prefix("PT")?;
    let (hours, rest) = rest.split_once('H')?;
    let (minutes, rest) = rest.split_once('M')?;
    let secs = rest.strip_suffix('S')?;
    let hours: i64 = hours.parse().ok()?;
    let minutes: i64 = minutes.parse().ok()?;
    let secs: i64 = secs.parse().ok()?;
    Some(hours * 3600 + minutes * 60 + secs)
}

/// Whole seconds of a computed figure, truncated toward zero.
///
/// This is not plain truncation: the value is first snapped to the nearest
/// microsecond, so `499.99999999999994` yields 500 rather than 499. Genuine
/// fractions of a second are still cut off and never rounded up.
pub fn whole_seconds(value: f64) -> i64 {
    ((value * 1e6).round() / 1e6).trunc() as i64
}

/// Seconds since midnight as `HH:MM:SS`.
pub fn daytime_to_string(seconds: u32) -> String {
    let (hours, minutes, secs) = split_seconds(i64::from(seconds));
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Decimal rendering with at least one fractional digit (`100.0`, `0.25`).
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
