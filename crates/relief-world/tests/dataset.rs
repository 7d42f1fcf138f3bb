//! Integration tests for JSON dataset loading.
//!
//! Loads the sample dataset shipped in `data/` and checks the resulting
//! [`World`] field by field.

// Integration tests use expect/unwrap extensively for clarity -- panicking
// on failure is the correct behavior in test code.
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::float_cmp)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use relief_types::{NodeId, Position, SupplyType, Transportation, VehicleId, WeatherCondition};
use relief_world::{Dataset, World, WorldError, load_dataset};

fn sample_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/coastal-district.json")
}

fn load_sample() -> World {
    load_dataset(&sample_path()).expect("sample dataset should load")
}

#[test]
fn sample_dataset_builds_graph() {
    let world = load_sample();
    assert_eq!(world.graph.node_count(), 6);
    assert_eq!(world.graph.edge_count(), 6);
    assert_eq!(
        world.graph.position_of(NodeId(5)),
        Some(Position::new(6.0, 2.0))
    );

    let harbour = world.graph.node_by_id(NodeId(5)).unwrap();
    assert!(!harbour.can_access_terrain(Transportation::Land));
    assert!(harbour.can_access_terrain(Transportation::Sea));

    // Edge 2-4 starts closed, on both sides.
    assert_eq!(world.graph.closed_edge_count(Position::new(4.0, 0.0)), 1);
    assert_eq!(world.graph.closed_edge_count(Position::new(4.0, 2.0)), 1);
}

#[test]
fn sample_dataset_sites_and_fleet() {
    let world = load_sample();
    assert_eq!(world.depot.position, Position::new(0.0, 0.0));
    assert_eq!(world.depot.available(SupplyType::Medicine), 20.0);

    assert_eq!(world.demand_points.len(), 2);
    let clinic = world.demand_point(Position::new(4.0, 2.0)).unwrap();
    assert!(clinic.is_urgent());
    assert_eq!(clinic.needed(SupplyType::Water), 30.0);
    let harbour = world.demand_point(Position::new(6.0, 2.0)).unwrap();
    assert!(!harbour.is_urgent());

    assert_eq!(world.vehicles.len(), 3);
    let first = world.vehicle(VehicleId(1)).unwrap();
    let second = world.vehicle(VehicleId(2)).unwrap();
    assert!(Arc::ptr_eq(&first.vehicle_type, &second.vehicle_type));
    assert!(first.is_idle());
}

#[test]
fn sample_dataset_weather() {
    let world = load_sample();
    let env = &world.environment;
    assert_eq!(env.condition(Position::new(0.0, 0.0)), Some(WeatherCondition::Sunny));
    assert_eq!(env.condition(Position::new(2.0, 2.0)), Some(WeatherCondition::Rainy));
    assert!(env.is_blocked_position(Position::new(4.0, 0.0)));
}

#[test]
fn dataset_survives_a_json_round_trip() {
    let text = std::fs::read_to_string(sample_path()).unwrap();
    let dataset = Dataset::parse(&text).unwrap();
    let again = Dataset::parse(&serde_json::to_string(&dataset).unwrap()).unwrap();
    assert_eq!(dataset, again);
}

#[test]
fn weather_for_unknown_node_is_rejected() {
    let json = r#"{
        "nodes": [{"id": 0, "position": [0, 0]}],
        "start_point": {"position": [0, 0], "supplies": []},
        "weather": [{"node": 3, "condition": "Storm"}]
    }"#;
    let result = Dataset::parse(json).and_then(Dataset::into_world);
    assert!(matches!(result, Err(WorldError::NodeIdNotFound(NodeId(3)))));
}

#[test]
fn duplicate_node_position_is_rejected() {
    let json = r#"{
        "nodes": [{"id": 0, "position": [1, 1]}, {"id": 1, "position": [1, 1]}],
        "start_point": {"position": [1, 1], "supplies": []}
    }"#;
    let result = Dataset::parse(json).and_then(Dataset::into_world);
    assert!(matches!(result, Err(WorldError::DuplicateNode(_))));
}
