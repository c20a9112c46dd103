//! Facility/location service.
//!
//! Wraps the platform position provider and the navigation handoff behind
//! traits, and answers catalog queries (destinations, nearby facilities,
//! canned routes). Location failures are stored as a display message and are
//! never returned to the caller.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::catalog::canned_route;
use crate::config::{LocationConfig, PositionOptions};
use crate::error::{FlowError, PositionError};
use crate::model::{
    Destination, FacilityKind, Location, NavigationRoute, NearbyFacility, TransportType,
};
use crate::sync::{lock, BusyCounter};

/// Platform position query (GPS, browser geolocation, a fixed fix in demos).
#[async_trait]
pub trait PositionProvider: Send + Sync {
    async fn current_position(&self, options: &PositionOptions) -> Result<Location, PositionError>;
}

/// Hands coordinates off to something that can navigate to them.
pub trait NavigationHandler: Send + Sync {
    /// Native maps application handoff.
    fn open_native(&self, url: &str);
    /// Web map fallback.
    fn open_web(&self, url: &str);
}

/// Navigation handler that only logs the URLs it is given.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNavigationHandler;

impl NavigationHandler for LoggingNavigationHandler {
    fn open_native(&self, url: &str) {
        log::info!("native navigation: {url}");
    }

    fn open_web(&self, url: &str) {
        log::info!("web navigation: {url}");
    }
}

pub fn native_navigation_url(latitude: f64, longitude: f64) -> String {
    format!("maps://app?daddr={latitude},{longitude}")
}

pub fn web_navigation_url(latitude: f64, longitude: f64) -> String {
    format!("https://www.google.com/maps/dir/?api=1&destination={latitude},{longitude}")
}

/// Where an external navigation handoff should point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavigationTarget<'a> {
    /// A key of the destination catalog.
    Destination(&'a str),
    Location(Location),
}

impl<'a> From<&'a str> for NavigationTarget<'a> {
    fn from(key: &'a str) -> Self {
        NavigationTarget::Destination(key)
    }
}

impl From<Location> for NavigationTarget<'_> {
    fn from(location: Location) -> Self {
        NavigationTarget::Location(location)
    }
}

#[derive(Debug, Default)]
struct LocationState {
    current: Option<Location>,
    error: Option<String>,
}

pub struct LocationService {
    provider: Option<Arc<dyn PositionProvider>>,
    navigator: Arc<dyn NavigationHandler>,
    config: LocationConfig,
    state: Mutex<LocationState>,
    busy: BusyCounter,
}

impl LocationService {
    /// Build without querying the provider. `provider: None` models a
    /// platform without geolocation support.
    pub fn new(
        provider: Option<Arc<dyn PositionProvider>>,
        navigator: Arc<dyn NavigationHandler>,
        config: LocationConfig,
    ) -> Self {
        Self {
            provider,
            navigator,
            config,
            state: Mutex::new(LocationState::default()),
            busy: BusyCounter::default(),
        }
    }

    /// Build and resolve the current location once.
    pub async fn start(
        provider: Option<Arc<dyn PositionProvider>>,
        navigator: Arc<dyn NavigationHandler>,
        config: LocationConfig,
    ) -> Self {
        let service = Self::new(provider, navigator, config);
        service.resolve_current_location().await;
        service
    }

    /// Query the provider and store either the location or an error message.
    ///
    /// The provider call is bounded by the configured timeout. A failure
    /// leaves any previously resolved location in place.
    pub async fn resolve_current_location(&self) {
        let _busy = self.busy.engage();
        lock(&self.state).error = None;

        let Some(provider) = self.provider.as_ref() else {
            self.record_failure(PositionError::Unsupported);
            return;
        };

        let options = self.config.position_options;
        let outcome = tokio::time::timeout(options.timeout(), provider.current_position(&options))
            .await
            .unwrap_or(Err(PositionError::Timeout));

        match outcome {
            Ok(location) => {
                log::debug!(
                    "resolved location {:.4},{:.4} (±{} m)",
                    location.latitude,
                    location.longitude,
                    location.accuracy
                );
                lock(&self.state).current = Some(location);
            }
            Err(err) => self.record_failure(err),
        }
    }

    fn record_failure(&self, err: PositionError) {
        match &err {
            PositionError::Other(detail) => log::warn!("location lookup failed: {detail}"),
            _ => log::warn!("location lookup failed: {err}"),
        }
        lock(&self.state).error = Some(err.to_string());
    }

    pub fn current_location(&self) -> Option<Location> {
        lock(&self.state).current
    }

    pub fn location_error(&self) -> Option<String> {
        lock(&self.state).error.clone()
    }

    /// True while any resolve is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.config.destinations
    }

    pub fn destination(&self, key: &str) -> Result<&Destination, FlowError> {
        self.config
            .destinations
            .iter()
            .find(|destination| destination.key == key)
            .ok_or_else(|| FlowError::UnknownDestination(key.to_string()))
    }

    /// Canned route to catalog destination `key` for `transport`.
    pub fn get_navigation_route(
        &self,
        key: &str,
        transport: TransportType,
    ) -> Result<NavigationRoute, FlowError> {
        let destination = self.destination(key)?;
        Ok(canned_route(&destination.name, transport))
    }

    /// Facilities of `kind`, or all of them, in catalog order.
    pub fn get_nearby_facilities(&self, kind: Option<FacilityKind>) -> Vec<&NearbyFacility> {
        self.config
            .facilities
            .iter()
            .filter(|facility| kind.is_none_or(|kind| facility.kind == kind))
            .collect()
    }

    /// First facility of `kind` flagged as available.
    pub fn first_available_facility(&self, kind: FacilityKind) -> Option<&NearbyFacility> {
        self.config
            .facilities
            .iter()
            .find(|facility| facility.kind == kind && facility.available == Some(true))
    }

    /// Distance from the resolved location to destination `key`; `None`
    /// until a location has been resolved.
    pub fn distance_to_destination(&self, key: &str) -> Result<Option<f64>, FlowError> {
        let destination = self.destination(key)?;
        let target = Location::new(destination.latitude, destination.longitude, 0.0);
        Ok(self
            .current_location()
            .map(|here| here.distance_km_to(&target)))
    }

    /// Best-effort handoff: native navigation now, web map after the
    /// configured delay regardless of whether the native handler took over.
    ///
    /// Fails only when the target cannot be resolved or no runtime is
    /// available to schedule the fallback; nothing is handed off in that case.
    pub fn open_external_navigation<'a>(
        &self,
        target: impl Into<NavigationTarget<'a>>,
    ) -> Result<(), FlowError> {
        let (latitude, longitude) = match target.into() {
            NavigationTarget::Destination(key) => {
                let destination = self.destination(key)?;
                (destination.latitude, destination.longitude)
            }
            NavigationTarget::Location(location) => (location.latitude, location.longitude),
        };
        let runtime = tokio::runtime::Handle::try_current()?;

        self.navigator.open_native(&native_navigation_url(latitude, longitude));

        let navigator = Arc::clone(&self.navigator);
        let delay = self.config.native_fallback_delay();
        let web_url = web_navigation_url(latitude, longitude);
        runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.open_web(&web_url);
        });
        Ok(())
    }
}
