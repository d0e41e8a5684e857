use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;
use target_locator::{
    AuthorizationStatus, DisplayReadout, JsonFormatter, LocationEvent, MockLocationService, PositionTracker,
    TextFormatter, TrackerConfig,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "target_locator")]
#[command(about = "Replay location and heading updates against a target coordinate", long_about = None)]
struct Cli {
    /// Scenario file (JSON) with the target and the update sequence
    scenario: PathBuf,

    /// Tracker configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format for each readout
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Compact,
    Json,
}

fn default_authorization() -> AuthorizationStatus {
    AuthorizationStatus::AuthorizedWhenInUse
}

/// Recorded session: what the user typed and what the platform delivered
#[derive(Deserialize)]
struct Scenario {
    target_latitude: Option<String>,
    target_longitude: Option<String>,
    #[serde(default = "default_authorization")]
    authorization: AuthorizationStatus,
    #[serde(default)]
    events: Vec<LocationEvent>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into())
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => TrackerConfig::from_file(path)?,
        None => TrackerConfig::default(),
    };

    let content = std::fs::read_to_string(&cli.scenario)
        .with_context(|| format!("Failed to read scenario {}", cli.scenario.display()))?;
    let scenario: Scenario = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse scenario {}", cli.scenario.display()))?;

    tracing::info!("Replaying {} events", scenario.events.len());

    let service = MockLocationService::with_authorization(scenario.authorization);
    let mut tracker = PositionTracker::new(service, config);

    let format = cli.format;
    tracker.register_readout_callback(Box::new(move |display: &DisplayReadout| match format {
        Format::Text => println!("{}", TextFormatter::new().format_text(display)),
        Format::Compact => println!("{}", TextFormatter::compact().format_text(display)),
        Format::Json => match JsonFormatter::new().format_json(display) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!("Failed to serialize readout: {e}"),
        },
    }));

    tracker.start()?;
    tracker.set_target(
        scenario.target_latitude.as_deref(),
        scenario.target_longitude.as_deref(),
    );

    for event in scenario.events {
        tracker.service_mut().push_event(event);
    }
    let handled = tracker.process()?;

    let status = tracker.status().clone();
    tracing::info!(
        "Handled {} events: {} fixes, {} headings, {} rejected",
        handled, status.location_updates, status.heading_updates, status.rejected_samples
    );
    if !status.authorization.allows_location() {
        tracing::warn!("Location access was {:?}; no distance was computed", status.authorization);
    }

    tracker.shutdown()?;
    Ok(())
}
