use crate::apis::best4fest::fetch_schedule_data;
use crate::error::Result;
use crate::normalize::extract_schedule_with_stats;
use crate::normalize::timestamp::OutputTimeZone;
use crate::types::{ScheduleApi, StageSchedule};
use std::fs;
use std::path::Path;
use tracing::{error, info, instrument, warn};

/// Summary of a run that produced an output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineResult {
    pub api_name: String,
    pub total_items: usize,
    pub kept_records: usize,
    pub dropped_items: usize,
    pub failed_items: usize,
    pub stages: usize,
    pub output_file: String,
}

/// How a run ended. None of these are panics or propagated errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Nothing usable came back from the API; no file written
    FetchFailed,
    /// Payload fetched but no item passed the inclusion gate; no file written
    NoValidSchedule,
    Saved(PipelineResult),
    /// Grouping succeeded but the destination could not be written
    WriteFailed(String),
}

impl PipelineOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, PipelineOutcome::FetchFailed | PipelineOutcome::WriteFailed(_))
    }
}

pub struct Pipeline;

impl Pipeline {
    /// Fetch, group by stage, and write the result to `destination`.
    #[instrument(skip(api), fields(api_name = %api.api_name()))]
    pub async fn run(
        api: &dyn ScheduleApi,
        destination: &Path,
        zone: OutputTimeZone,
    ) -> PipelineOutcome {
        info!("Fetching schedule data...");
        println!("📡 Fetching schedule data...");
        let Some(raw_data) = fetch_schedule_data(api).await else {
            error!("Failed to retrieve or parse schedule data.");
            println!("❌ Failed to retrieve or parse schedule data.");
            return PipelineOutcome::FetchFailed;
        };

        info!("Extracting information...");
        println!("🔧 Extracting information...");
        let (stages, stats) = extract_schedule_with_stats(Some(&raw_data), zone);

        if stages.is_empty() {
            warn!("No valid schedule information extracted.");
            println!("⚠️  No valid schedule information extracted.");
            return PipelineOutcome::NoValidSchedule;
        }
        println!("✅ Extracted data for {} stages.", stages.len());

        if let Err(e) = write_schedule(&stages, destination) {
            error!("Failed to write {}: {}", destination.display(), e);
            println!("❌ Failed to write '{}': {}", destination.display(), e);
            return PipelineOutcome::WriteFailed(e.to_string());
        }

        let output_file = destination.to_string_lossy().to_string();
        info!("Data saved to '{}'", output_file);
        println!("💾 Data saved to '{}'", output_file);

        PipelineOutcome::Saved(PipelineResult {
            api_name: api.api_name().to_string(),
            total_items: stats.items,
            kept_records: stats.kept,
            dropped_items: stats.dropped,
            failed_items: stats.errors,
            stages: stages.len(),
            output_file,
        })
    }
}

/// Pretty-prints the mapping as UTF-8 JSON, replacing any existing file.
pub fn write_schedule(stages: &StageSchedule, destination: &Path) -> Result<()> {
    let json_content = serde_json::to_string_pretty(stages)?;
    fs::write(destination, json_content)?;
    Ok(())
}
