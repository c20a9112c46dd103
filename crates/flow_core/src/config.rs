//! Service configuration with the mock seed data as defaults.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{default_destinations, default_facilities};
use crate::error::FlowError;
use crate::model::{
    Area, AreaStatus, DarshanSlot, Destination, Incident, IncidentKind, IncidentStatus,
    NearbyFacility, Priority, SlotStatus,
};

/// Simulator tick period.
pub const TICK_INTERVAL_SECS: u64 = 5;

/// Position query timeout.
pub const POSITION_TIMEOUT_MS: u64 = 10_000;

/// Maximum age of a cached position the provider may return: 5 minutes.
pub const POSITION_MAXIMUM_AGE_MS: u64 = 5 * 60 * 1000;

/// Delay between the native navigation handoff and the web fallback.
pub const NATIVE_FALLBACK_DELAY_MS: u64 = 1_000;

/// Seed for a monitored area; `last_updated` is stamped when the simulator is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaSeed {
    pub name: String,
    pub current: u32,
    pub capacity: u32,
    pub status: AreaStatus,
    pub wait_time: String,
}

impl AreaSeed {
    pub fn new(
        name: &str,
        current: u32,
        capacity: u32,
        status: AreaStatus,
        wait_time: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            current,
            capacity,
            status,
            wait_time: wait_time.to_string(),
        }
    }

    pub fn into_area(self, last_updated: DateTime<Utc>) -> Area {
        Area {
            name: self.name,
            current: self.current,
            capacity: self.capacity,
            status: self.status,
            wait_time: self.wait_time,
            last_updated,
        }
    }
}

fn slot(time: &str, status: SlotStatus, wait: &str, capacity: u32, booked: u32) -> DarshanSlot {
    DarshanSlot {
        time: time.to_string(),
        status,
        wait: wait.to_string(),
        capacity,
        booked,
    }
}

/// Crowd/booking simulator parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub tick_interval_secs: u64,
    /// Seed for RNG (for reproducibility). Entropy-seeded when `None`.
    pub seed: Option<u64>,
    pub areas: Vec<AreaSeed>,
    pub darshan_slots: Vec<DarshanSlot>,
    /// Most recent first.
    pub incidents: Vec<Incident>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: TICK_INTERVAL_SECS,
            seed: None,
            areas: vec![
                AreaSeed::new("Main Sanctum", 245, 300, AreaStatus::Normal, "12 min"),
                AreaSeed::new("Pradakshina Path", 890, 1000, AreaStatus::High, "25 min"),
                AreaSeed::new("Entry Gate", 156, 200, AreaStatus::Crowded, "35 min"),
                AreaSeed::new("Prasadam Hall", 78, 150, AreaStatus::Normal, "5 min"),
                AreaSeed::new("Parking Area", 420, 500, AreaStatus::High, "N/A"),
            ],
            darshan_slots: vec![
                slot("6:00 AM", SlotStatus::Available, "5 min", 200, 45),
                slot("8:00 AM", SlotStatus::Filling, "15 min", 300, 245),
                slot("10:00 AM", SlotStatus::Full, "45 min", 300, 300),
                slot("12:00 PM", SlotStatus::Available, "8 min", 400, 120),
                slot("2:00 PM", SlotStatus::Available, "12 min", 300, 89),
                slot("4:00 PM", SlotStatus::Filling, "25 min", 500, 420),
            ],
            incidents: vec![
                Incident {
                    id: "INC001".to_string(),
                    kind: IncidentKind::Medical,
                    description: "Elderly pilgrim feeling dizzy near main gate".to_string(),
                    location: "Main Entrance".to_string(),
                    priority: Priority::Medium,
                    time: "5 min ago".to_string(),
                    status: IncidentStatus::Responding,
                },
                Incident {
                    id: "INC002".to_string(),
                    kind: IncidentKind::Crowd,
                    description: "Minor crowd buildup at prasadam counter".to_string(),
                    location: "Prasadam Hall".to_string(),
                    priority: Priority::Low,
                    time: "12 min ago".to_string(),
                    status: IncidentStatus::Reported,
                },
            ],
        }
    }
}

impl SimulatorConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_tick_interval_secs(mut self, secs: u64) -> Self {
        self.tick_interval_secs = secs;
        self
    }

    pub fn with_areas(mut self, areas: Vec<AreaSeed>) -> Self {
        self.areas = areas;
        self
    }

    pub fn with_darshan_slots(mut self, slots: Vec<DarshanSlot>) -> Self {
        self.darshan_slots = slots;
        self
    }

    pub fn with_incidents(mut self, incidents: Vec<Incident>) -> Self {
        self.incidents = incidents;
        self
    }

    /// Tick period; a zero setting is raised to one second.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs.max(1))
    }

    /// Check the seed data against the model rules: unique area names, slot
    /// labels and incident ids, non-zero area capacity, `booked` within
    /// capacity and a slot at capacity marked full.
    pub fn validate(&self) -> Result<(), FlowError> {
        ensure_unique("area name", self.areas.iter().map(|a| a.name.as_str()))?;
        ensure_unique(
            "darshan slot",
            self.darshan_slots.iter().map(|s| s.time.as_str()),
        )?;
        ensure_unique("incident id", self.incidents.iter().map(|i| i.id.as_str()))?;

        if let Some(area) = self.areas.iter().find(|area| area.capacity == 0) {
            return Err(invalid(format!("area {} has zero capacity", area.name)));
        }
        for slot in &self.darshan_slots {
            if slot.booked > slot.capacity {
                return Err(invalid(format!(
                    "darshan slot {} has {} booked over a capacity of {}",
                    slot.time, slot.booked, slot.capacity
                )));
            }
            if slot.booked == slot.capacity && !slot.is_full() {
                return Err(invalid(format!(
                    "darshan slot {} is at capacity but marked {:?}",
                    slot.time, slot.status
                )));
            }
        }
        Ok(())
    }
}

fn invalid(reason: String) -> FlowError {
    FlowError::InvalidConfig(reason)
}

fn ensure_unique<'a>(what: &str, keys: impl Iterator<Item = &'a str>) -> Result<(), FlowError> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(invalid(format!("duplicate {what} {key}")));
        }
    }
    Ok(())
}

/// Options passed to the platform position provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout_ms: u64,
    pub maximum_age_ms: u64,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout_ms: POSITION_TIMEOUT_MS,
            maximum_age_ms: POSITION_MAXIMUM_AGE_MS,
        }
    }
}

impl PositionOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn maximum_age(&self) -> Duration {
        Duration::from_millis(self.maximum_age_ms)
    }
}

/// Facility/location service parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub destinations: Vec<Destination>,
    pub facilities: Vec<NearbyFacility>,
    pub position_options: PositionOptions,
    pub native_fallback_delay_ms: u64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            destinations: default_destinations(),
            facilities: default_facilities(),
            position_options: PositionOptions::default(),
            native_fallback_delay_ms: NATIVE_FALLBACK_DELAY_MS,
        }
    }
}

impl LocationConfig {
    pub fn native_fallback_delay(&self) -> Duration {
        Duration::from_millis(self.native_fallback_delay_ms)
    }

    /// Destination keys must be unique.
    pub fn validate(&self) -> Result<(), FlowError> {
        ensure_unique(
            "destination key",
            self.destinations.iter().map(|d| d.key.as_str()),
        )
    }
}

/// Top-level configuration file layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    pub simulator: SimulatorConfig,
    pub location: LocationConfig,
}

impl FlowConfig {
    /// Parse and validate; fields left out take their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, FlowError> {
        let config: Self = serde_json::from_str(raw)?;
        config.simulator.validate()?;
        config.location.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, FlowError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| FlowError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}
