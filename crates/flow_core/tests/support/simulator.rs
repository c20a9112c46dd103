use std::sync::Arc;

use flow_core::config::{AreaSeed, SimulatorConfig};
use flow_core::model::{AreaStatus, DarshanSlot, SlotStatus};
use flow_core::simulator::CrowdSimulator;
use flow_core::test_helpers::{ManualClock, ScriptedRandom};

/// Fixed start time for simulator tests (2023-11-14T22:13:20Z).
pub const START_MS: i64 = 1_700_000_000_000;

/// Simulator over the default seed data, replaying `draws` then `fallback`.
pub fn scripted_simulator(draws: Vec<f64>, fallback: f64) -> CrowdSimulator {
    scripted_simulator_with(SimulatorConfig::default(), draws, fallback).0
}

/// Like [scripted_simulator] but with a custom config, also returning the clock.
pub fn scripted_simulator_with(
    config: SimulatorConfig,
    draws: Vec<f64>,
    fallback: f64,
) -> (CrowdSimulator, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::at_millis(START_MS));
    let rng = ScriptedRandom::new(draws).with_fallback(fallback);
    let sim = CrowdSimulator::with_sources(config, Box::new(rng), clock.clone());
    (sim, clock)
}

pub fn single_area(name: &str, current: u32, capacity: u32) -> SimulatorConfig {
    SimulatorConfig::default().with_areas(vec![AreaSeed::new(
        name,
        current,
        capacity,
        AreaStatus::Normal,
        "10 min",
    )])
}

pub fn single_slot(time: &str, status: SlotStatus, capacity: u32, booked: u32) -> SimulatorConfig {
    SimulatorConfig::default().with_darshan_slots(vec![DarshanSlot {
        time: time.to_string(),
        status,
        wait: "5 min".to_string(),
        capacity,
        booked,
    }])
}

pub fn slot(sim: &CrowdSimulator, time: &str) -> DarshanSlot {
    sim.darshan_slots()
        .into_iter()
        .find(|slot| slot.time == time)
        .expect("slot present")
}
