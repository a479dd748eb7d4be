use crate::error::{Result, ScheduleError};
use chrono::{DateTime, Datelike, Local, NaiveDateTime, Timelike};
use serde::Deserialize;
use serde_json::Number;
use std::str::FromStr;
use tracing::warn;

/// Zone used to render wall-clock times in the output file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTimeZone {
    /// Timezone of the machine running the export
    #[default]
    Local,
    Utc,
}

impl FromStr for OutputTimeZone {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(OutputTimeZone::Local),
            "utc" => Ok(OutputTimeZone::Utc),
            other => Err(ScheduleError::Config(format!(
                "unknown timezone '{}', expected 'local' or 'utc'",
                other
            ))),
        }
    }
}

/// Converts epoch milliseconds to `YYYY-MM-DDTHH:MM:SS[.ffffff]`.
///
/// `None` stays `None`. Values that cannot be represented are logged and
/// yield `None` instead of an error.
pub fn timestamp_to_iso8601(timestamp_ms: Option<&Number>, zone: OutputTimeZone) -> Option<String> {
    let timestamp_ms = timestamp_ms?;
    match millis_to_iso8601(timestamp_ms, zone) {
        Ok(iso) => Some(iso),
        Err(e) => {
            warn!("Error converting timestamp: {}", e);
            None
        }
    }
}

pub fn millis_to_iso8601(timestamp_ms: &Number, zone: OutputTimeZone) -> Result<String> {
    let micros = to_micros(timestamp_ms)?;
    let secs = micros.div_euclid(1_000_000);
    let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;

    let instant = DateTime::from_timestamp(secs, nanos)
        .ok_or_else(|| invalid(timestamp_ms, "outside the representable date range"))?;
    // Reject before shifting into the local zone, which can overflow near the limits
    if !(1..=9999).contains(&instant.year()) {
        return Err(invalid(timestamp_ms, "year is out of range"));
    }
    let wall = match zone {
        OutputTimeZone::Local => instant.with_timezone(&Local).naive_local(),
        OutputTimeZone::Utc => instant.naive_utc(),
    };

    if !(1..=9999).contains(&wall.year()) {
        return Err(invalid(timestamp_ms, "year is out of range"));
    }
    Ok(format_iso8601(&wall))
}

/// Fraction is only written when there is a sub-second component.
fn format_iso8601(wall: &NaiveDateTime) -> String {
    let base = wall.format("%Y-%m-%dT%H:%M:%S").to_string();
    let micros = wall.nanosecond() / 1_000;
    if micros == 0 {
        base
    } else {
        format!("{}.{:06}", base, micros)
    }
}

fn to_micros(timestamp_ms: &Number) -> Result<i64> {
    if let Some(ms) = timestamp_ms.as_i64() {
        return ms
            .checked_mul(1_000)
            .ok_or_else(|| invalid(timestamp_ms, "overflow"));
    }
    let ms = timestamp_ms
        .as_f64()
        .ok_or_else(|| invalid(timestamp_ms, "not a number"))?;
    let micros = (ms * 1_000.0).round();
    if !micros.is_finite() || micros.abs() >= i64::MAX as f64 {
        return Err(invalid(timestamp_ms, "overflow"));
    }
    Ok(micros as i64)
}

fn invalid(value: &Number, reason: &str) -> ScheduleError {
    ScheduleError::Timestamp {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
