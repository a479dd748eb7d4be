use crate::constants::{BEST4FEST_API, SCHEDULE_URL};
use crate::error::{Result, ScheduleError};
use crate::types::{RawScheduleData, ScheduleApi};
use metrics::histogram;
use tracing::{debug, error, info, instrument};

/// Client for the best4fest schedule endpoint
pub struct Best4FestApi {
    client: reqwest::Client,
    url: String,
}

impl Default for Best4FestApi {
    fn default() -> Self {
        Self::new()
    }
}

impl Best4FestApi {
    pub fn new() -> Self {
        Self::with_url(SCHEDULE_URL)
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        // Default client: no request timeout, single attempt
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait::async_trait]
impl ScheduleApi for Best4FestApi {
    fn api_name(&self) -> &'static str {
        BEST4FEST_API
    }

    fn url(&self) -> &str {
        &self.url
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_schedule(&self) -> Result<RawScheduleData> {
        debug!("Requesting schedule");
        let t_fetch = std::time::Instant::now();

        let resp = self.client.get(&self.url).send().await?.error_for_status()?;
        let payload = resp.bytes().await?;

        histogram!("festival_schedule_fetch_duration_seconds", "api" => BEST4FEST_API)
            .record(t_fetch.elapsed().as_secs_f64());
        debug!("Received {} bytes", payload.len());

        let data: RawScheduleData = serde_json::from_slice(&payload)?;
        Ok(data)
    }
}

/// Fetches the schedule, converting any failure into `None` after logging it.
pub async fn fetch_schedule_data(api: &dyn ScheduleApi) -> Option<RawScheduleData> {
    match api.fetch_schedule().await {
        Ok(data) => {
            info!("Fetched schedule from {}", api.url());
            Some(data)
        }
        Err(ScheduleError::Json(e)) => {
            error!("Error decoding JSON: {}", e);
            None
        }
        Err(e) => {
            error!("Error fetching data from {}: {}", api.url(), e);
            None
        }
    }
}
