/// Source and output constants shared across the crate

// Source API
pub const BEST4FEST_API: &str = "best4fest_ba2025";
pub const SCHEDULE_URL: &str = "https://admin.best4fest.app/api/v3/ba2025/schedule";

// Output defaults
pub const DEFAULT_DESTINATION: &str = "schedule_by_stage.json";
pub const UNKNOWN_STAGE: &str = "Unknown Stage";

/// Language tag preferred when resolving localized names
pub const PREFERRED_LANGUAGE: &str = "EN";

/// Default tracing filter when RUST_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "festival_schedule=info";
