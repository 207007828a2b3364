use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod claims;
mod controller;
mod domain;
mod inputter;
mod model;
mod ui;

use claims::{ClaimSet, sample_claims};
use controller::Controller;
use domain::{ClaimsError, Config};
use model::{Model, Status};
use ui::ClaimsUI;

#[derive(Parser, Debug)]
#[command(version, about = "A tui based claims management dashboard.")]
struct Cli {
    /// Event poll interval in milliseconds
    #[arg(long, default_value_t = 100)]
    poll_interval: u64,

    /// Base URL claim detail links are built from
    #[arg(long, default_value = "https://claims.example.com/claims")]
    detail_base: String,

    /// Append logs to this file. Without it nothing is logged, the
    /// terminal belongs to the dashboard.
    #[arg(long)]
    log_file: Option<String>,
}

fn main() -> ExitCode {
    match run() {
        Err(e) => {
            ratatui::restore();
            eprintln!("Error: {:?}", e);
            ExitCode::FAILURE
        }
        Ok(_) => {
            ratatui::restore();
            ExitCode::SUCCESS
        }
    }
}

fn run() -> Result<(), ClaimsError> {
    let cli = Cli::parse();
    if let Some(path) = cli.log_file.as_deref() {
        init_logging(path)?;
    }

    let config = Config::default()
        .event_poll_time(cli.poll_interval)
        .detail_base(cli.detail_base);

    let claims = ClaimSet::ingest(sample_claims())?;

    let mut terminal = ratatui::init();
    let size = terminal.size()?;
    let mut model = Model::init(&config, claims, size.width as usize, size.height as usize)?;
    let ui = ClaimsUI::new(&config);
    let controller = Controller::new(&config);

    while model.status != Status::QUITTING {
        // Render the current view
        terminal.draw(|f| ui.draw(&model, f))?;

        // Handle events and map to a Message
        if let Some(message) = controller.handle_event(&model)? {
            model.update(message)?;
        }
    }

    Ok(())
}

fn init_logging(path: &str) -> Result<(), ClaimsError> {
    let path = shellexpand::full(path)
        .map_err(|e| ClaimsError::LoggingSetup(e.to_string()))?;
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_ref())?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(ErrorLayer::default())
        .try_init()
        .map_err(|e| ClaimsError::LoggingSetup(e.to_string()))?;
    Ok(())
}
