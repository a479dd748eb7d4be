use clap::Parser;
use festival_schedule::apis::best4fest::Best4FestApi;
use festival_schedule::config::Config;
use festival_schedule::constants::DEFAULT_DESTINATION;
use festival_schedule::logging;
use festival_schedule::pipeline::{Pipeline, PipelineOutcome};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info};

#[derive(Parser)]
#[command(name = "festival_schedule")]
#[command(about = "Fetch and process festival schedule data.")]
#[command(version)]
struct Cli {
    /// Destination filename for the output JSON
    #[arg(short, long, default_value = DEFAULT_DESTINATION)]
    destination: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let (config, config_problems) = Config::load();
    // Dropped at the end of main, flushing the file log
    let _log_guard = logging::init_logging(config.log_dir.as_deref());
    for problem in &config_problems {
        error!("Ignoring invalid configuration: {}", problem);
    }
    debug!("Using {:?}", config);

    let api = Best4FestApi::with_url(config.schedule_url.clone());
    let outcome = Pipeline::run(&api, &cli.destination, config.timezone).await;

    if let PipelineOutcome::Saved(result) = &outcome {
        info!(
            "{}: {} stages written to {}",
            result.api_name, result.stages, result.output_file
        );
        println!(
            "   Items: {}  Kept: {}  Dropped: {}  Errors: {}",
            result.total_items, result.kept_records, result.dropped_items, result.failed_items
        );
    }

    if outcome.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
