#![cfg(not(tarpaulin_include))]

use survey_studio::app;
use survey_studio::config::Config;

/// Main entry point for the survey web server
///
/// Initializes logging from `RUST_LOG` (default `info`), reads the
/// configuration from the environment and serves the survey API.
///
/// # Returns
/// * `Result<(), Box<dyn std::error::Error>>` - Success or error object
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load()?;
    app::run(config).await
}
