#![cfg(not(tarpaulin_include))]

use std::env;
use std::sync::Arc;

use survey_studio::api::{HttpBackend, LocalBackend, SurveyBackend};
use survey_studio::config::Config;
use survey_studio::export::ExportSession;
use survey_studio::store::SurveyStore;

async fn export<B: SurveyBackend>(
    backend: &B,
    config: &Config,
    survey_id: u64,
    title: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let session =
        ExportSession::with_release_delay(config.download_dir.clone(), config.export_release);
    let saved = session.export(backend, survey_id, title).await?;
    println!("Saved {}", saved.display());
    Ok(())
}

/// Export a survey's results workbook from the command line.
///
/// `export` goes through the server at `SURVEY_API_URL`; `export-local` reads
/// the store in `SURVEY_DATABASE_DIR` directly.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        eprintln!("Usage: {} <export|export-local> <survey_id> <title>", args[0]);
        return Ok(());
    }

    let survey_id: u64 = match args[2].parse() {
        Ok(id) => id,
        Err(_) => {
            eprintln!("Error: Invalid survey id {:?}", args[2]);
            return Ok(());
        }
    };
    let title = &args[3];
    let config = Config::load()?;

    match args[1].as_str() {
        "export" => {
            let backend = HttpBackend::new(&config.api_url)?;
            export(&backend, &config, survey_id, title).await
        }
        "export-local" => {
            let store = Arc::new(SurveyStore::open(&config.database_dir)?);
            export(&LocalBackend::new(store), &config, survey_id, title).await
        }
        other => {
            eprintln!("Error: Unknown command {other:?}");
            Ok(())
        }
    }
}
