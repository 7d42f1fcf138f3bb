//! Commit step applied after a successful search and allocation.
//!
//! Settlement is the only place the planner writes to the [`World`]. It runs
//! after every check has passed, so a delivery either settles completely or
//! leaves the world untouched.

use std::collections::BTreeMap;

use relief_types::{Position, Supply, SupplyType, VehicleId, VehicleStatus, VehicleType};
use relief_world::{Environment, World};

use crate::allocator::{Allocation, VehicleLoad};
use crate::search::Route;

/// What a settlement committed.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    /// Sum of the per-vehicle travel times.
    pub time: f64,
    /// Travel time of each delivering vehicle.
    pub vehicle_times: BTreeMap<VehicleId, f64>,
    /// Supply types each delivering vehicle carried, one entry per record.
    pub manifest: BTreeMap<VehicleId, Vec<SupplyType>>,
    /// Final load of each delivering vehicle.
    pub loads: Vec<VehicleLoad>,
}

/// Time for a vehicle of `vehicle_type` to drive `path`.
///
/// Each segment takes its Manhattan length divided by the velocity under the
/// weather at the segment's start. A zero velocity makes the segment, and
/// so the whole trip, take forever.
pub fn travel_time(
    vehicle_type: &VehicleType,
    path: &[Position],
    environment: &Environment,
) -> f64 {
    path.windows(2)
        .map(|segment| {
            let &[from, to] = segment else { return 0.0 };
            let velocity = vehicle_type.adjusted_velocity(environment.condition(from));
            if velocity <= 0.0 {
                f64::INFINITY
            } else {
                from.manhattan(to) / velocity
            }
        })
        .sum()
}

/// Apply a delivery to the world.
///
/// Every vehicle with a non-empty assignment moves to the destination, goes
/// Busy, burns fuel equal to the route distance and keeps its allocated load.
/// Then each `consumed` record is withdrawn from the depot and credited to
/// the destination's needs.
pub fn settle(
    world: &mut World,
    destination: Position,
    route: &Route,
    allocation: &Allocation,
    consumed: &[Supply],
) -> Settlement {
    let mut vehicle_times = BTreeMap::new();
    let mut manifest = BTreeMap::new();
    let mut loads = Vec::new();

    for (load, supplies) in allocation.loaded() {
        let Some(vehicle) = world.vehicles.iter_mut().find(|v| v.id == load.vehicle) else {
            continue;
        };
        vehicle.position = destination;
        vehicle.status = VehicleStatus::Busy;
        vehicle.current_fuel -= route.distance;
        vehicle.current_weight = load.weight;
        vehicle.current_volume = load.volume;

        let time = travel_time(&vehicle.vehicle_type, &route.path, &world.environment);
        vehicle_times.insert(vehicle.id, time);
        manifest.insert(
            vehicle.id,
            supplies.iter().map(|s| s.supply_type).collect::<Vec<_>>(),
        );
        loads.push(*load);
    }

    let target = world
        .demand_points
        .iter_mut()
        .find(|d| d.position == destination);
    let depot = &mut world.depot;
    if let Some(target) = target {
        for supply in consumed {
            for drawn in depot.withdraw(supply.supply_type, supply.quantity) {
                target.satisfy(&Supply::new(supply.supply_type, drawn));
            }
        }
    }

    Settlement {
        time: vehicle_times.values().sum(),
        vehicle_times,
        manifest,
        loads,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use relief_types::{NodeId, Transportation, Vehicle, WeatherCondition};
    use relief_world::{DemandPoint, Depot, Graph};

    use super::*;
    use crate::allocator::allocate;

    fn p(x: f64) -> Position {
        Position::new(x, 0.0)
    }

    fn van() -> Arc<VehicleType> {
        Arc::new(VehicleType {
            name: "Van".to_owned(),
            transportation: Transportation::Land,
            fuel_capacity: 10.0,
            weight_capacity: 10.0,
            volume_capacity: 10.0,
            average_velocity: 2.0,
        })
    }

    fn make_world() -> World {
        let mut graph = Graph::new();
        for id in 0..3 {
            let _ = graph.add_node(NodeId(id), p(f64::from(id)));
        }
        let depot = Depot::new(
            p(0.0),
            vec![
                Supply::new(SupplyType::Water, 2.0),
                Supply::new(SupplyType::Water, 6.0),
            ],
        );
        let needs = [(SupplyType::Water, 5.0)].into_iter().collect();
        let vehicles = vec![Vehicle {
            id: VehicleId(7),
            position: p(0.0),
            vehicle_type: van(),
            current_fuel: 10.0,
            current_weight: 0.0,
            current_volume: 0.0,
            status: VehicleStatus::Idle,
        }];
        World::new(
            graph,
            depot,
            vec![DemandPoint::new(p(2.0), needs, 0)],
            vehicles,
            Environment::new(),
        )
    }

    fn route() -> Route {
        Route {
            path: vec![p(0.0), p(1.0), p(2.0)],
            distance: 2.0,
        }
    }

    #[test]
    fn travel_time_uses_weather_at_segment_start() {
        let mut environment = Environment::new();
        environment.set_condition(p(1.0), WeatherCondition::Snowy);
        let time = travel_time(&van(), &route().path, &environment);
        // 1 / 2.0 + 1 / (2.0 * 0.8)
        assert!((time - 1.125).abs() < 1e-9);
    }

    #[test]
    fn storm_makes_time_infinite() {
        let mut environment = Environment::new();
        environment.set_condition(p(0.0), WeatherCondition::Storm);
        assert!(travel_time(&van(), &route().path, &environment).is_infinite());
    }

    #[test]
    fn single_point_path_takes_no_time() {
        assert_eq!(travel_time(&van(), &[p(0.0)], &Environment::new()), 0.0);
    }

    #[test]
    fn settle_commits_vehicle_depot_and_demand() {
        let mut world = make_world();
        let consumed = [Supply::new(SupplyType::Water, 5.0)];
        let loads = world.vehicles.iter().map(VehicleLoad::of).collect();
        let allocation = allocate(loads, &consumed);

        let settled = settle(&mut world, p(2.0), &route(), &allocation, &consumed);

        let vehicle = world.vehicle(VehicleId(7));
        assert_eq!(vehicle.map(|v| v.position), Some(p(2.0)));
        assert_eq!(vehicle.map(|v| v.status), Some(VehicleStatus::Busy));
        assert_eq!(vehicle.map(|v| v.current_fuel), Some(8.0));
        assert_eq!(vehicle.map(|v| v.current_weight), Some(5.0));

        assert_eq!(world.depot.available(SupplyType::Water), 3.0);
        assert_eq!(
            world.depot.supplies.iter().map(|s| s.quantity).collect::<Vec<_>>(),
            vec![0.0, 3.0]
        );
        assert_eq!(world.demand_point(p(2.0)).map(|d| d.needed(SupplyType::Water)), Some(0.0));

        assert_eq!(settled.manifest.get(&VehicleId(7)), Some(&vec![SupplyType::Water]));
        assert_eq!(settled.time, 1.0);
        assert_eq!(settled.loads.len(), 1);
    }

    #[test]
    fn idle_vehicles_without_cargo_stay_put() {
        let mut world = make_world();
        let allocation = allocate(Vec::new(), &[]);
        let settled = settle(&mut world, p(2.0), &route(), &allocation, &[]);
        assert!(settled.manifest.is_empty());
        assert_eq!(settled.time, 0.0);
        assert_eq!(world.vehicle(VehicleId(7)).map(|v| v.position), Some(p(0.0)));
    }
}
