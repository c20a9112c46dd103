mod support;

use std::collections::HashSet;

use flow_core::config::SimulatorConfig;
use flow_core::model::{IncidentKind, IncidentStatus, NewIncident, Priority, SlotStatus};

use support::simulator::{scripted_simulator, scripted_simulator_with, single_slot, slot};

fn draft(description: &str) -> NewIncident {
    NewIncident {
        kind: IncidentKind::Security,
        description: description.to_string(),
        location: "North Gate".to_string(),
        priority: Priority::Medium,
        status: IncidentStatus::Reported,
    }
}

#[test]
fn booking_a_full_slot_changes_nothing() {
    let sim = scripted_simulator(Vec::new(), 0.1);
    let before = sim.darshan_slots();
    assert!(!sim.book_darshan_slot("10:00 AM"));
    assert_eq!(sim.darshan_slots(), before);
    assert_eq!(slot(&sim, "10:00 AM").booked, 300);
}

#[test]
fn last_place_marks_slot_full() {
    let (sim, _) = scripted_simulator_with(
        single_slot("6:00 AM", SlotStatus::Available, 200, 199),
        Vec::new(),
        0.1,
    );
    assert!(sim.book_darshan_slot("6:00 AM"));
    let booked = slot(&sim, "6:00 AM");
    assert_eq!(booked.booked, 200);
    assert_eq!(booked.status, SlotStatus::Full);
}

#[test]
fn booking_until_capacity_then_one_more_is_a_no_op() {
    let sim = scripted_simulator(Vec::new(), 0.1);
    let mut calls = 0;
    while slot(&sim, "4:00 PM").status != SlotStatus::Full {
        assert!(sim.book_darshan_slot("4:00 PM"));
        calls += 1;
        assert!(calls <= 80, "slot never filled");
    }
    assert_eq!(calls, 80);
    let full = slot(&sim, "4:00 PM");
    assert_eq!(full.booked, full.capacity);

    assert!(!sim.book_darshan_slot("4:00 PM"));
    assert_eq!(slot(&sim, "4:00 PM"), full);
}

#[test]
fn booking_leaves_other_slots_alone() {
    let sim = scripted_simulator(Vec::new(), 0.1);
    let before = sim.darshan_slots();
    sim.book_darshan_slot("2:00 PM");
    for (b, a) in before.iter().zip(sim.darshan_slots()) {
        if b.time == "2:00 PM" {
            assert_eq!(a.booked, 90);
            assert_eq!(a.status, SlotStatus::Available);
        } else {
            assert_eq!(*b, a);
        }
    }
}

#[test]
fn unknown_incident_update_is_a_no_op() {
    let sim = scripted_simulator(Vec::new(), 0.1);
    let before = sim.incidents();
    assert!(!sim.update_incident_status("INC999", IncidentStatus::Resolved));
    assert_eq!(sim.incidents(), before);
}

#[test]
fn incident_update_touches_only_the_status_of_its_target() {
    let sim = scripted_simulator(Vec::new(), 0.1);
    let before = sim.incidents();
    assert!(sim.update_incident_status("INC002", IncidentStatus::Responding));
    let after = sim.incidents();
    assert_eq!(after[0], before[0]);
    let mut expected = before[1].clone();
    expected.status = IncidentStatus::Responding;
    assert_eq!(after[1], expected);
}

#[test]
fn added_incidents_are_prepended_with_fresh_ids() {
    // clock never advances, so every id is minted in the same millisecond
    let (sim, _) = scripted_simulator_with(SimulatorConfig::default(), Vec::new(), 0.1);
    let mut ids = HashSet::new();
    for i in 0..10 {
        let before = sim.incidents();
        let id = sim.add_incident(draft(&format!("unattended bag #{i}")));
        let after = sim.incidents();
        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(after[0].id, id);
        assert_eq!(after[0].time, "Just now");
        assert_eq!(&after[1..], &before[..]);
        assert!(before.iter().all(|incident| incident.id != id));
        assert!(id.starts_with("INC"));
        assert!(ids.insert(id));
    }
}

#[test]
fn resolved_incidents_are_kept() {
    let sim = scripted_simulator(Vec::new(), 0.1);
    sim.update_incident_status("INC001", IncidentStatus::Resolved);
    assert_eq!(sim.incidents().len(), 2);
    assert_eq!(sim.active_incidents().len(), 1);
}
