//! Headless Divine Flow run: starts the simulator and location service, then
//! logs crowd state until the duration elapses or Ctrl-C.
//!
//! Run with: RUST_LOG=info cargo run -p flow_demo -- --seed 7 --duration-secs 30

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use clap::Parser;
use flow_core::advisor::CrowdAdvisor;
use flow_core::config::{FlowConfig, PositionOptions};
use flow_core::error::PositionError;
use flow_core::location::{LocationService, LoggingNavigationHandler, PositionProvider};
use flow_core::model::{
    FacilityKind, IncidentKind, IncidentStatus, Location, NewIncident, PredictionKind, Priority,
    TransportType,
};
use flow_core::simulator::CrowdSimulator;

#[derive(Parser, Debug)]
#[command(name = "flow_demo", about = "Run the Divine Flow crowd simulation headless")]
struct Args {
    /// JSON config file; built-in seed data when omitted
    #[arg(long, env = "FLOW_CONFIG")]
    config: Option<PathBuf>,

    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// How long to run before stopping
    #[arg(long, default_value_t = 30)]
    duration_secs: u64,

    /// Fixed device latitude; with --longitude, stands in for the platform provider
    #[arg(long, requires = "longitude", allow_negative_numbers = true)]
    latitude: Option<f64>,

    #[arg(long, requires = "latitude", allow_negative_numbers = true)]
    longitude: Option<f64>,

    /// Catalog key to navigate to at the end of the run
    #[arg(long, default_value = "somnath")]
    destination: String,
}

/// Answers every query with the location given on the command line.
struct StaticPositionProvider(Location);

#[async_trait]
impl PositionProvider for StaticPositionProvider {
    async fn current_position(&self, options: &PositionOptions) -> Result<Location, PositionError> {
        log::debug!(
            "position requested (high accuracy: {})",
            options.high_accuracy
        );
        Ok(self.0)
    }
}

fn log_areas(sim: &CrowdSimulator) {
    for area in sim.areas() {
        log::info!(
            "{:<18} {:>5}/{:<5} {:>5.1}%  {:?}  wait {}",
            area.name,
            area.current,
            area.capacity,
            area.occupancy_percent(),
            area.status,
            area.wait_time
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => FlowConfig::from_json_file(path)?,
        None => FlowConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.simulator.seed = Some(seed);
    }
    let seed = config.simulator.seed;

    let provider: Option<Arc<dyn PositionProvider>> = match (args.latitude, args.longitude) {
        (Some(lat), Some(lng)) => Some(Arc::new(StaticPositionProvider(Location::new(
            lat, lng, 10.0,
        )))),
        _ => None,
    };
    let fallback_delay = config.location.native_fallback_delay();
    let location = LocationService::start(
        provider,
        Arc::new(LoggingNavigationHandler),
        config.location,
    )
    .await;
    match (location.current_location(), location.location_error()) {
        (Some(here), _) => log::info!("device at {:.4},{:.4}", here.latitude, here.longitude),
        (None, Some(err)) => log::warn!("no device location: {err}"),
        (None, None) => {}
    }
    let target = location.destination(&args.destination)?;
    log::info!("navigating to {} at the end of the run", target.name);
    for destination in location.destinations() {
        if let Some(km) = location.distance_to_destination(&destination.key)? {
            log::info!("{} is {km:.1} km away", destination.name);
        }
    }
    if let Some(parking) = location.first_available_facility(FacilityKind::Parking) {
        log::info!(
            "nearest open parking: {} ({})",
            parking.name,
            parking.walking_time
        );
    }

    let sim = CrowdSimulator::new(config.simulator);
    let advisor = CrowdAdvisor::new(seed);
    sim.start()?;
    log_areas(&sim);

    sim.book_darshan_slot("6:00 AM");
    let incident = sim.add_incident(NewIncident {
        kind: IncidentKind::Crowd,
        description: "Queue spilling onto the road".to_string(),
        location: "Entry Gate".to_string(),
        priority: Priority::High,
        status: IncidentStatus::Reported,
    });

    let run = tokio::time::sleep(Duration::from_secs(args.duration_secs));
    tokio::pin!(run);
    let mut report = tokio::time::interval(Duration::from_secs(10));
    report.tick().await;
    loop {
        tokio::select! {
            _ = &mut run => break,
            _ = tokio::signal::ctrl_c() => {
                log::info!("interrupted");
                break;
            }
            _ = report.tick() => {
                log_areas(&sim);
                for notification in sim.notifications() {
                    log::info!("[{:?}] {}", notification.kind, notification.message);
                }
            }
        }
    }

    sim.update_incident_status(&incident, IncidentStatus::Responding);
    log::info!("{} active incidents", sim.active_incidents().len());

    let optimization = advisor.generate_crowd_optimization(&sim.areas()).await;
    log::info!("optimization: {}", optimization.predicted_impact);
    for action in &optimization.suggested_actions {
        log::info!("  - {action}");
    }
    let prediction = advisor.generate_prediction(PredictionKind::CrowdSurge);
    log::info!(
        "prediction ({}%): {}",
        prediction.confidence,
        prediction.message
    );
    advisor.update_prediction(prediction);

    let route = location.get_navigation_route(&args.destination, TransportType::Driving)?;
    log::info!(
        "route to {}: {} in {}",
        route.destination,
        route.distance,
        route.duration
    );
    location.open_external_navigation(args.destination.as_str())?;

    sim.stop();
    // let the web fallback fire before the runtime shuts down
    tokio::time::sleep(fallback_delay + Duration::from_millis(100)).await;
    Ok(())
}
