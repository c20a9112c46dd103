//! Crowd and pilgrimage management core.
//!
//! - [simulator::CrowdSimulator]: live areas, darshan slots, incidents and
//!   notifications, perturbed on a recurring timer.
//! - [location::LocationService]: position lookup, destination and facility
//!   catalog, canned routes and the external navigation handoff.
//! - [advisor::CrowdAdvisor]: canned predictions and crowd optimizations.

pub mod advisor;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod geo;
pub mod location;
pub mod model;
pub mod random;
mod runner;
pub mod simulator;
mod sync;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use error::{FlowError, PositionError};
