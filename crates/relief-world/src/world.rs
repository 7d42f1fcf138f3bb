//! The world aggregate: graph, overlays, depot, demand points and fleet.
//!
//! A [`World`] is owned by the calling orchestration layer between
//! deliveries. The planner borrows it mutably for one delivery at a time.

use relief_types::{NodeId, Position, Vehicle, VehicleId, VehicleStatus, WeatherCondition};

use crate::environment::Environment;
use crate::error::WorldError;
use crate::graph::Graph;
use crate::site::{DemandPoint, Depot};

/// One simulation snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    /// The road graph.
    pub graph: Graph,
    /// The supply source.
    pub depot: Depot,
    /// Destinations with outstanding needs.
    pub demand_points: Vec<DemandPoint>,
    /// The fleet.
    pub vehicles: Vec<Vehicle>,
    /// Weather and route-block overlays.
    pub environment: Environment,
}

impl World {
    /// Assemble a world from its parts.
    pub const fn new(
        graph: Graph,
        depot: Depot,
        demand_points: Vec<DemandPoint>,
        vehicles: Vec<Vehicle>,
        environment: Environment,
    ) -> Self {
        Self {
            graph,
            depot,
            demand_points,
            vehicles,
            environment,
        }
    }

    /// The demand point at a position.
    pub fn demand_point(&self, position: Position) -> Option<&DemandPoint> {
        self.demand_points.iter().find(|d| d.position == position)
    }

    /// A vehicle by id.
    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    /// Set the weather at the node carrying `id`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NodeIdNotFound`] if no node carries the id.
    pub fn set_weather_for_node(
        &mut self,
        id: NodeId,
        condition: WeatherCondition,
    ) -> Result<(), WorldError> {
        let position = self
            .graph
            .position_of(id)
            .ok_or(WorldError::NodeIdNotFound(id))?;
        self.environment.set_condition(position, condition);
        Ok(())
    }

    /// Record `condition` at every node position, as datasets do on load.
    pub fn set_weather_everywhere(&mut self, condition: WeatherCondition) {
        let positions: Vec<Position> = self.graph.nodes().map(|n| n.position).collect();
        for position in positions {
            self.environment.set_condition(position, condition);
        }
    }

    /// Send every vehicle back to the depot, idle and empty. Fuel is kept.
    pub fn reposition_vehicles_to_start(&mut self) {
        let start = self.depot.position;
        for vehicle in &mut self.vehicles {
            vehicle.position = start;
            vehicle.status = VehicleStatus::Idle;
            vehicle.current_weight = 0.0;
            vehicle.current_volume = 0.0;
        }
        tracing::debug!(
            vehicles = self.vehicles.len(),
            depot = %start,
            "Vehicles repositioned to depot"
        );
    }
}
