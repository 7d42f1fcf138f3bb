//! Built-in demonstration world.
//!
//! A 3x3 grid of crossroads one unit apart, with the depot in the south-west
//! corner and two demand points on the east side:
//!
//! ```text
//!   6 --- 7 --- 8   <- field hospital (urgent)
//!   |     |     |
//!   3 --- 4 --- 5
//!   |     |  x  |      x: edge 4-5 closed (flooded bridge)
//!   0 --- 1 --- 2   <- shelter
//!   ^ depot
//! ```
//!
//! Node 4 sits under snow, node 7 under rain. The fleet has two trucks and a
//! drone; node 2 accepts air and sea traffic only, so only the drone can
//! serve the shelter.

use std::collections::BTreeMap;
use std::sync::Arc;

use relief_types::{
    NodeId, Position, Supply, SupplyType, Transportation, Vehicle, VehicleId, VehicleStatus,
    VehicleType, WeatherCondition,
};

use crate::environment::Environment;
use crate::error::WorldError;
use crate::graph::{Graph, Node};
use crate::site::{DemandPoint, Depot};
use crate::world::World;

/// Positions of the interesting sites in [`demo_world`].
#[derive(Debug, Clone, Copy)]
pub struct DemoSites {
    /// The depot (node 0).
    pub depot: Position,
    /// The shelter (node 2).
    pub shelter: Position,
    /// The field hospital (node 8).
    pub field_hospital: Position,
}

/// Grid coordinate of node `id` in the 3x3 layout.
fn grid(id: u32) -> Position {
    Position::new(f64::from(id % 3), f64::from(id / 3))
}

/// Helper to build a vehicle parked at the depot.
fn parked(id: u32, vehicle_type: &Arc<VehicleType>, depot: Position) -> Vehicle {
    Vehicle {
        id: VehicleId(id),
        position: depot,
        vehicle_type: Arc::clone(vehicle_type),
        current_fuel: vehicle_type.fuel_capacity,
        current_weight: 0.0,
        current_volume: 0.0,
        status: VehicleStatus::Idle,
    }
}

/// Create the demonstration world.
///
/// # Errors
///
/// Returns [`WorldError`] if map construction fails (should not happen
/// with valid hard-coded data).
pub fn demo_world() -> Result<(World, DemoSites), WorldError> {
    let mut graph = Graph::new();
    for id in 0..9 {
        let node = if id == 2 {
            Node::with_terrains(NodeId(id), grid(id), [Transportation::Air, Transportation::Sea])
        } else {
            Node::new(NodeId(id), grid(id))
        };
        graph.insert_node(node)?;
    }

    // Horizontal then vertical streets.
    for (a, b, open) in [
        (0, 1, true),
        (1, 2, true),
        (3, 4, true),
        (4, 5, false),
        (6, 7, true),
        (7, 8, true),
        (0, 3, true),
        (3, 6, true),
        (1, 4, true),
        (4, 7, true),
        (2, 5, true),
        (5, 8, true),
    ] {
        graph.add_edge_by_id(NodeId(a), NodeId(b), open)?;
    }

    let sites = DemoSites {
        depot: grid(0),
        shelter: grid(2),
        field_hospital: grid(8),
    };

    let depot = Depot::new(
        sites.depot,
        vec![
            Supply::new(SupplyType::Water, 60.0),
            Supply::new(SupplyType::Food, 40.0),
            Supply::new(SupplyType::Medicine, 15.0),
        ],
    );

    let hospital_needs: BTreeMap<SupplyType, f64> = [
        (SupplyType::Water, 20.0),
        (SupplyType::Medicine, 10.0),
    ]
    .into_iter()
    .collect();
    let shelter_needs: BTreeMap<SupplyType, f64> = [
        (SupplyType::Water, 10.0),
        (SupplyType::Food, 25.0),
    ]
    .into_iter()
    .collect();
    let demand_points = vec![
        DemandPoint::new(sites.field_hospital, hospital_needs, 1),
        DemandPoint::new(sites.shelter, shelter_needs, 0),
    ];

    let truck = Arc::new(VehicleType {
        name: "Truck".to_owned(),
        transportation: Transportation::Land,
        fuel_capacity: 12.0,
        weight_capacity: 25.0,
        volume_capacity: 30.0,
        average_velocity: 1.0,
    });
    let drone = Arc::new(VehicleType {
        name: "Drone".to_owned(),
        transportation: Transportation::Air,
        fuel_capacity: 6.0,
        weight_capacity: 12.0,
        volume_capacity: 12.0,
        average_velocity: 3.0,
    });
    let vehicles = vec![
        parked(1, &truck, sites.depot),
        parked(2, &truck, sites.depot),
        parked(3, &drone, sites.depot),
    ];

    let mut world = World::new(graph, depot, demand_points, vehicles, Environment::new());
    world.set_weather_everywhere(WeatherCondition::Sunny);
    world.set_weather_for_node(NodeId(4), WeatherCondition::Snowy)?;
    world.set_weather_for_node(NodeId(7), WeatherCondition::Rainy)?;

    Ok((world, sites))
}
