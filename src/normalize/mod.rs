//! Turns the raw `schedules` payload into performances grouped by stage.
//!
//! Items are processed one at a time; a malformed item is logged and skipped
//! without affecting the rest of the run.

pub mod localized;
pub mod timestamp;

use crate::constants::UNKNOWN_STAGE;
use crate::error::{Result, ScheduleError};
use crate::types::{PerformanceRecord, RawScheduleData, RawScheduleItem, StageSchedule};
use localized::{resolve_localized, resolve_stage_name};
use metrics::counter;
use serde::Deserialize;
use serde_json::Value;
use timestamp::{timestamp_to_iso8601, OutputTimeZone};
use tracing::{debug, error, info, warn};

/// Counters collected while grouping a payload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub items: usize,
    pub kept: usize,
    pub dropped: usize,
    pub errors: usize,
}

/// Result of processing a single schedule item
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    Keep {
        stage: String,
        record: PerformanceRecord,
    },
    Skip,
}

/// Groups the raw payload by stage. Missing or invalid input yields an empty map.
pub fn extract_schedule_info(data: Option<&RawScheduleData>, zone: OutputTimeZone) -> StageSchedule {
    extract_schedule_with_stats(data, zone).0
}

pub fn extract_schedule_with_stats(
    data: Option<&RawScheduleData>,
    zone: OutputTimeZone,
) -> (StageSchedule, ExtractionStats) {
    let mut stages = StageSchedule::new();
    let mut stats = ExtractionStats::default();

    let items = match schedule_items(data) {
        Ok(items) => items,
        Err(e) => {
            warn!("Invalid data format received: {}", e);
            return (stages, stats);
        }
    };

    for item in items {
        stats.items += 1;
        match process_item(item, zone) {
            Ok(ItemOutcome::Keep { stage, record }) => {
                stages.entry(stage).or_default().push(record);
                stats.kept += 1;
            }
            Ok(ItemOutcome::Skip) => {
                stats.dropped += 1;
            }
            Err(e) => {
                error!(
                    "Error processing schedule item ID {}: {}",
                    item_id_label(item),
                    e
                );
                stats.errors += 1;
            }
        }
    }

    counter!("festival_schedule_items_total").increment(stats.items as u64);
    counter!("festival_schedule_records_kept_total").increment(stats.kept as u64);
    counter!("festival_schedule_items_dropped_total").increment(stats.dropped as u64);
    counter!("festival_schedule_item_errors_total").increment(stats.errors as u64);

    info!(
        "Grouped {} of {} items into {} stages ({} dropped, {} errors)",
        stats.kept,
        stats.items,
        stages.len(),
        stats.dropped,
        stats.errors
    );
    (stages, stats)
}

fn schedule_items(data: Option<&RawScheduleData>) -> Result<&Vec<Value>> {
    data.and_then(|d| d.get("schedules"))
        .and_then(Value::as_array)
        .ok_or_else(|| ScheduleError::MissingField("schedules list not found".into()))
}

/// Normalizes one raw item.
///
/// Returns `Skip` when `id`, `date_from` or a non-empty artist name is missing,
/// and an error when the item does not have the expected shape at all.
pub fn process_item(item: &Value, zone: OutputTimeZone) -> Result<ItemOutcome> {
    if !item.is_object() {
        return Err(ScheduleError::MalformedItem(format!(
            "expected an object, found {}",
            json_kind(item)
        )));
    }
    let raw = RawScheduleItem::deserialize(item)
        .map_err(|e| ScheduleError::MalformedItem(e.to_string()))?;

    let stage = match resolve_stage_name(raw.stage.as_ref()) {
        Some(name) => name.to_string(),
        None => {
            warn!(
                "Could not determine stage name for schedule ID {}. Using '{}'.",
                raw.id.map_or_else(|| "Unknown".to_string(), |id| id.to_string()),
                UNKNOWN_STAGE
            );
            UNKNOWN_STAGE.to_string()
        }
    };

    let artist_name = raw
        .artist
        .as_ref()
        .and_then(|artist| artist.name.as_deref())
        .filter(|name| !name.is_empty());
    let genre = raw
        .artist
        .as_ref()
        .and_then(|artist| resolve_localized(artist.localized.as_deref()))
        .and_then(|info| info.genre.clone());

    let (Some(id), Some(date_from), Some(artist_name)) =
        (raw.id, raw.date_from.as_ref(), artist_name)
    else {
        debug!("Skipping schedule item with missing id, date_from or artist name");
        return Ok(ItemOutcome::Skip);
    };

    let Some(date_from_iso8601) = timestamp_to_iso8601(Some(date_from), zone) else {
        warn!("Skipping schedule ID {}: start time could not be converted", id);
        return Ok(ItemOutcome::Skip);
    };
    let date_to_iso8601 = timestamp_to_iso8601(raw.date_to.as_ref(), zone);

    Ok(ItemOutcome::Keep {
        stage,
        record: PerformanceRecord {
            id,
            date_from_iso8601: Some(date_from_iso8601),
            date_to_iso8601,
            artist_name: artist_name.to_string(),
            genre,
        },
    })
}

fn item_id_label(item: &Value) -> String {
    match item.get("id") {
        None | Some(Value::Null) => "Unknown".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
