//! One delivery from the depot to a demand point.
//!
//! [`deliver`] runs the whole pipeline:
//!
//! 1. work out what to send: for every type the destination still needs,
//!    the smaller of the need and the depot's stock;
//! 2. search for a route from the depot;
//! 3. pick the vehicles that can drive it: idle, parked at the depot, with
//!    enough fuel and (when the terrain filter is on) of the right class;
//! 4. pack the supplies onto them first-fit;
//! 5. settle.
//!
//! Steps 1 to 4 only read the world. If any of them fails the world is
//! returned exactly as it came in.

use std::collections::BTreeMap;

use relief_types::{Position, Supply, SupplyType, Vehicle, VehicleId};
use relief_world::{DemandPoint, Depot, World};

use crate::allocator::{VehicleLoad, allocate};
use crate::error::PlannerError;
use crate::search::{SearchRequest, find_route};
use crate::settlement::settle;

/// Result of a committed delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryOutcome {
    /// Positions from the depot to the destination.
    pub path: Vec<Position>,
    /// Weather-adjusted route length.
    pub distance: f64,
    /// Sum of the delivering vehicles' travel times. Infinite when one of
    /// them cannot move under the weather on its route.
    pub time: f64,
    /// Travel time of each delivering vehicle.
    pub vehicle_times: BTreeMap<VehicleId, f64>,
    /// Supply types each delivering vehicle carried.
    pub manifest: BTreeMap<VehicleId, Vec<SupplyType>>,
    /// Final load of each delivering vehicle.
    pub loads: Vec<VehicleLoad>,
    /// Records no vehicle had room for.
    pub dropped: Vec<Supply>,
}

/// Supplies to send to `destination`, one record per needed type.
///
/// Types the depot has none of still produce a zero-quantity record.
pub fn plan_supplies(depot: &Depot, destination: &DemandPoint) -> Vec<Supply> {
    destination
        .supplies_needed()
        .map(|(supply_type, needed)| {
            Supply::new(supply_type, needed.min(depot.available(supply_type)))
        })
        .collect()
}

/// Whether `vehicle` can drive a `distance`-long route from the depot.
pub fn is_eligible(
    vehicle: &Vehicle,
    depot: Position,
    distance: f64,
    request: &SearchRequest,
) -> bool {
    vehicle.is_idle()
        && vehicle.position == depot
        && vehicle.current_fuel >= distance
        && (!request.rules.terrain_filter
            || vehicle.vehicle_type.can_access_terrain(request.terrain))
}

/// Run one delivery to the demand point at `destination`.
///
/// # Errors
///
/// - [`PlannerError::UnknownDemandPoint`] if no demand point sits there.
/// - [`PlannerError::NoPathFound`] if the search exhausts its frontier.
/// - [`PlannerError::NoAvailableVehicle`] if no eligible vehicle has room
///   for any of the supplies.
///
/// The world is only modified when `Ok` is returned.
pub fn deliver(
    world: &mut World,
    destination: Position,
    request: &SearchRequest,
) -> Result<DeliveryOutcome, PlannerError> {
    let target = world
        .demand_point(destination)
        .ok_or(PlannerError::UnknownDemandPoint(destination))?;
    let depot = world.depot.position;
    let shipments = plan_supplies(&world.depot, target);

    let route = find_route(world, depot, target, request).ok_or(PlannerError::NoPathFound {
        from: depot,
        to: destination,
    })?;

    let candidates: Vec<VehicleLoad> = world
        .vehicles
        .iter()
        .filter(|v| is_eligible(v, depot, route.distance, request))
        .map(VehicleLoad::of)
        .collect();
    let allocation = allocate(candidates, &shipments);
    if !allocation.any_assigned() {
        tracing::warn!(
            strategy = %request.strategy,
            destination = %destination,
            distance = route.distance,
            "Route found but no vehicle available"
        );
        return Err(PlannerError::NoAvailableVehicle {
            distance: route.distance,
        });
    }

    let settled = settle(world, destination, &route, &allocation, &shipments);

    tracing::info!(
        strategy = %request.strategy,
        destination = %destination,
        hops = route.hops(),
        distance = route.distance,
        time = settled.time,
        vehicles = settled.manifest.len(),
        dropped = allocation.dropped.len(),
        "Delivery committed"
    );

    Ok(DeliveryOutcome {
        path: route.path,
        distance: route.distance,
        time: settled.time,
        vehicle_times: settled.vehicle_times,
        manifest: settled.manifest,
        loads: settled.loads,
        dropped: allocation.dropped,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use relief_types::{Transportation, VehicleStatus, VehicleType};

    use super::*;

    fn p(x: f64) -> Position {
        Position::new(x, 0.0)
    }

    fn truck(fuel: f64, position: Position) -> Vehicle {
        Vehicle {
            id: VehicleId(1),
            position,
            vehicle_type: Arc::new(VehicleType {
                name: "Truck".to_owned(),
                transportation: Transportation::Land,
                fuel_capacity: 10.0,
                weight_capacity: 10.0,
                volume_capacity: 10.0,
                average_velocity: 1.0,
            }),
            current_fuel: fuel,
            current_weight: 0.0,
            current_volume: 0.0,
            status: VehicleStatus::Idle,
        }
    }

    #[test]
    fn plan_supplies_takes_the_smaller_side() {
        let depot = Depot::new(
            p(0.0),
            vec![
                Supply::new(SupplyType::Water, 3.0),
                Supply::new(SupplyType::Food, 20.0),
            ],
        );
        let needs = [
            (SupplyType::Water, 5.0),
            (SupplyType::Food, 4.0),
            (SupplyType::Medicine, 2.0),
        ]
        .into_iter()
        .collect();
        let point = DemandPoint::new(p(1.0), needs, 0);
        assert_eq!(
            plan_supplies(&depot, &point),
            vec![
                Supply::new(SupplyType::Water, 3.0),
                Supply::new(SupplyType::Food, 4.0),
                Supply::new(SupplyType::Medicine, 0.0),
            ]
        );
    }

    #[test]
    fn plan_supplies_skips_met_needs() {
        let depot = Depot::new(p(0.0), vec![Supply::new(SupplyType::Water, 3.0)]);
        let needs = [(SupplyType::Water, 0.0)].into_iter().collect();
        let point = DemandPoint::new(p(1.0), needs, 0);
        assert!(plan_supplies(&depot, &point).is_empty());
    }

    #[test]
    fn eligibility_checks_each_condition() {
        let request = SearchRequest::default();
        assert!(is_eligible(&truck(2.0, p(0.0)), p(0.0), 2.0, &request));
        assert!(!is_eligible(&truck(1.0, p(0.0)), p(0.0), 2.0, &request));
        assert!(!is_eligible(&truck(5.0, p(1.0)), p(0.0), 2.0, &request));

        let mut busy = truck(5.0, p(0.0));
        busy.status = VehicleStatus::Busy;
        assert!(!is_eligible(&busy, p(0.0), 2.0, &request));

        let by_air = SearchRequest {
            terrain: Transportation::Air,
            ..SearchRequest::default()
        };
        assert!(!is_eligible(&truck(5.0, p(0.0)), p(0.0), 2.0, &by_air));
        let mut unfiltered = by_air;
        unfiltered.rules.terrain_filter = false;
        assert!(is_eligible(&truck(5.0, p(0.0)), p(0.0), 2.0, &unfiltered));
    }
}
