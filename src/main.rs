use std::process::ExitCode;

use chrono::Local;
use tracing_subscriber::EnvFilter;

use growth::completion::DeepSeekClient;
use growth::config::{self, GrowthConfig};
use growth::pipeline::INTER_CALL_PAUSE;
use growth::render::StyleSheet;
use growth::scheduler::DailySchedule;
use growth::{run_once, scheduler};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER)),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    // Missing credential is the one fatal error: no run happens without it.
    let config = match GrowthConfig::load() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "Configuration error");
            return ExitCode::FAILURE;
        }
    };

    let client = DeepSeekClient::new(&config.base_url, &config.api_key);
    let styles = StyleSheet::default();
    let variant = config.catalog;

    tracing::info!(
        run_time = %config.run_time.format("%H:%M"),
        output_dir = %config.output_dir.display(),
        catalog = ?variant,
        "Content will be generated daily"
    );

    let run = || {
        if let Err(e) = run_once(&client, variant, &config.output_dir, &styles, INTER_CALL_PAUSE)
        {
            tracing::error!(error = %e, "Run failed");
        }
    };

    // One immediate run, then the daily loop until externally terminated.
    // Arming after the run means a post-trigger start does not fire twice.
    run();
    scheduler::run_loop(DailySchedule::new(config.run_time, Local::now()), run)
}
