use std::io::Write;

use flow_core::config::FlowConfig;
use flow_core::error::FlowError;
use flow_core::model::{FacilityKind, SlotStatus};
use flow_core::simulator::CrowdSimulator;

#[test]
fn config_file_overrides_seed_data() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"{{
            "simulator": {{
                "seed": 11,
                "darshan_slots": [
                    {{ "time": "7:00 PM", "status": "available", "wait": "2 min", "capacity": 1, "booked": 0 }}
                ]
            }},
            "location": {{
                "facilities": [
                    {{
                        "name": "Shoe Stand",
                        "type": "atm",
                        "distance": "50m",
                        "walking_time": "1 min",
                        "location": {{ "latitude": 20.888, "longitude": 70.401, "accuracy": 5 }}
                    }}
                ]
            }}
        }}"#
    )
    .expect("write");

    let config = FlowConfig::from_json_file(file.path()).expect("load");
    assert_eq!(config.simulator.seed, Some(11));
    assert_eq!(config.simulator.areas.len(), 5);
    assert_eq!(config.location.facilities.len(), 1);
    assert_eq!(config.location.facilities[0].kind, FacilityKind::Atm);
    assert_eq!(config.location.destinations.len(), 4);

    let sim = CrowdSimulator::new(config.simulator);
    assert!(sim.book_darshan_slot("7:00 PM"));
    assert_eq!(sim.darshan_slots()[0].status, SlotStatus::Full);
}

#[test]
fn missing_config_file_reports_its_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.json");
    let err = FlowConfig::from_json_file(&path).unwrap_err();
    match err {
        FlowError::ConfigRead { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn overbooked_slot_in_file_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"{{ "simulator": {{ "darshan_slots": [
            {{ "time": "9:00 PM", "status": "filling", "wait": "5 min", "capacity": 3, "booked": 4 }}
        ] }} }}"#
    )
    .expect("write");

    match FlowConfig::from_json_file(file.path()).unwrap_err() {
        FlowError::InvalidConfig(reason) => assert!(reason.contains("9:00 PM"), "{reason}"),
        other => panic!("unexpected error: {other}"),
    }
}
