use std::sync::Arc;

use flow_core::config::LocationConfig;
use flow_core::error::PositionError;
use flow_core::location::LocationService;
use flow_core::model::Location;
use flow_core::test_helpers::{FixedPositionProvider, RecordingNavigationHandler};

/// A fix just outside Somnath Temple.
pub fn somnath_gate() -> Location {
    Location::new(20.8885, 70.4020, 12.0)
}

pub struct LocationHarness {
    pub service: LocationService,
    pub provider: Arc<FixedPositionProvider>,
    pub navigator: Arc<RecordingNavigationHandler>,
}

/// Start a service whose provider always answers with `outcome`.
pub async fn started_service(outcome: Result<Location, PositionError>) -> LocationHarness {
    let provider = Arc::new(FixedPositionProvider::new(outcome));
    let navigator = Arc::new(RecordingNavigationHandler::default());
    let service = LocationService::start(
        Some(provider.clone()),
        navigator.clone(),
        LocationConfig::default(),
    )
    .await;
    LocationHarness {
        service,
        provider,
        navigator,
    }
}
