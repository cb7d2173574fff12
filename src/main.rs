use dotenvy::dotenv;
use feedback_bot::{
    bot::{self, BotData},
    config::{self, Settings},
    errors::Result,
    logging,
    shutdown::{self, Shutdown},
};
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    // 1. Load .env file (non-fatal, env vars can be set externally)
    let dotenv_loaded = dotenv().is_ok();

    // 2. Load settings; the log file path comes from here, so errors go to stderr
    let settings = match Settings::load_from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Critical error loading settings: {e}");
            return ExitCode::FAILURE;
        }
    };

    // 3. Initialize logging (as early as possible)
    if let Err(e) = logging::init(&settings.log_file, &settings.log_filter) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }
    info!("====== Feedback Bot starting ======");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Loaded .env file: {}", dotenv_loaded);
    let settings_path = config::settings::config_path(|key| std::env::var(key).ok());
    if settings_path.exists() {
        info!("Settings loaded from {:?}", settings_path);
    } else {
        info!("No settings file at {:?}, using defaults", settings_path);
    }
    info!(
        "Token file: {:?}, log file: {:?}",
        settings.token_file, settings.log_file
    );

    match run(&settings).await {
        Ok(shutdown) => {
            info!("Exiting with code {}", shutdown.exit_code());
            shutdown.process_exit_code()
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(settings: &Settings) -> Result<Shutdown> {
    // The token is loaded directly before use and never stored in the settings
    let token = config::load_token(&settings.token_file)?;

    let shutdown = Shutdown::new();
    shutdown::install(&shutdown)?;

    let data = BotData::new(settings.routing());
    bot::run_bot(&token, data, shutdown.clone()).await?;
    Ok(shutdown)
}
