//! Domain records shared by the simulator, the location service and the advisor.
//!
//! Quantities such as wait times, distances and durations are display strings
//! and are never parsed back into numbers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Crowd classification of a monitored area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaStatus {
    Normal,
    High,
    Crowded,
}

/// A monitored zone of the venue.
///
/// `status` is seeded once and is not derived from the occupancy ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub name: String,
    pub current: u32,
    pub capacity: u32,
    pub status: AreaStatus,
    pub wait_time: String,
    pub last_updated: DateTime<Utc>,
}

impl Area {
    /// Occupancy as a percentage of capacity; 0 when capacity is 0.
    pub fn occupancy_percent(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        f64::from(self.current) / f64::from(self.capacity) * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    Filling,
    Full,
}

/// A bookable darshan time window, keyed by its time label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DarshanSlot {
    pub time: String,
    pub status: SlotStatus,
    pub wait: String,
    pub capacity: u32,
    pub booked: u32,
}

impl DarshanSlot {
    pub fn is_full(&self) -> bool {
        self.status == SlotStatus::Full
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentKind {
    Medical,
    Crowd,
    Security,
    Fire,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    Reported,
    Responding,
    Resolved,
}

/// An operational event under tracking. Incidents are never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: IncidentKind,
    pub description: String,
    pub location: String,
    pub priority: Priority,
    /// Display label such as "5 min ago"; not sortable.
    pub time: String,
    pub status: IncidentStatus,
}

/// Incident fields supplied by a reporter; id and time label are generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIncident {
    #[serde(rename = "type")]
    pub kind: IncidentKind,
    pub description: String,
    pub location: String,
    pub priority: Priority,
    pub status: IncidentStatus,
}

impl NewIncident {
    pub(crate) fn into_incident(self, id: String, time: impl Into<String>) -> Incident {
        Incident {
            id,
            kind: self.kind,
            description: self.description,
            location: self.location,
            priority: self.priority,
            time: time.into(),
            status: self.status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Warning,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub time: String,
}

/// A point with an uncertainty radius in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64, accuracy: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy,
        }
    }

    /// Great-circle distance to `other` in kilometres.
    pub fn distance_km_to(&self, other: &Location) -> f64 {
        crate::geo::haversine_distance_km(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacilityKind {
    Parking,
    Restaurant,
    Medical,
    Accommodation,
    Atm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyFacility {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FacilityKind,
    pub distance: String,
    pub walking_time: String,
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportType {
    Walking,
    #[default]
    Driving,
    Transit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRoute {
    pub destination: String,
    pub distance: String,
    pub duration: String,
    pub steps: Vec<String>,
    #[serde(rename = "type")]
    pub transport: TransportType,
}

/// Named reference point of the destination catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub key: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionKind {
    CrowdSurge,
    WeatherImpact,
    SafetyRisk,
    OptimalTiming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(rename = "type")]
    pub kind: PredictionKind,
    pub message: String,
    /// Percent, 0-100.
    pub confidence: u32,
    pub timeframe: String,
    pub recommendations: Vec<String>,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrowdOptimization {
    pub suggested_actions: Vec<String>,
    pub predicted_impact: String,
    pub estimated_improvement: String,
}
