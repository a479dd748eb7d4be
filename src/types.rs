use crate::error::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Raw schedule payload as returned by the festival API
pub type RawScheduleData = serde_json::Value;

/// Stage display name -> performances, in the order stages were first seen
pub type StageSchedule = IndexMap<String, Vec<PerformanceRecord>>;

/// One entry of the `schedules` list. Every field is optional; the API is third-party.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawScheduleItem {
    pub id: Option<i64>,
    pub date_from: Option<Number>,
    pub date_to: Option<Number>,
    pub stage: Option<RawStage>,
    pub artist: Option<RawArtist>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStage {
    pub localized: Option<Vec<LocalizedName>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalizedName {
    pub language: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArtist {
    pub name: Option<String>,
    pub localized: Option<Vec<LocalizedArtistInfo>>,
}

/// Language-specific artist metadata; only `genre` is used downstream
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalizedArtistInfo {
    pub language: Option<String>,
    pub genre: Option<String>,
}

/// Normalized, output-ready performance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub id: i64,
    pub date_from_iso8601: Option<String>,
    pub date_to_iso8601: Option<String>,
    pub artist_name: String,
    pub genre: Option<String>,
}

/// A source of raw festival schedule data
#[async_trait::async_trait]
pub trait ScheduleApi: Send + Sync {
    /// Unique identifier for this source
    fn api_name(&self) -> &'static str;

    /// Location the schedule is fetched from, used in diagnostics
    fn url(&self) -> &str;

    /// Fetch and decode the raw schedule
    async fn fetch_schedule(&self) -> Result<RawScheduleData>;
}
