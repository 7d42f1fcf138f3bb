//! JSON dataset loading.
//!
//! A dataset describes the whole delivery scenario in one document:
//!
//! ```json
//! {
//!   "nodes": [{"id": 0, "position": [0, 0], "terrains": ["Land"]}],
//!   "edges": [{"from": 0, "to": 1, "open": true}],
//!   "start_point": {"position": [0, 0], "supplies": [{"type": "Water", "quantity": 10}]},
//!   "end_points": [{"position": [2, 0], "needs_supplies": {"Water": 5}, "priority": 1}],
//!   "vehicles": [{"id": 1, "position": [0, 0], "type": {...}, "current_fuel": 10,
//!                 "current_weight": 0, "current_volume": 0, "status": "Idle"}],
//!   "weather": [{"node": 1, "condition": "Snowy"}]
//! }
//! ```
//!
//! Every node starts Sunny; `weather` entries override individual nodes.
//! Vehicles whose embedded type descriptions are identical share one
//! [`VehicleType`] allocation.

use std::path::Path;
use std::sync::Arc;

use relief_types::{NodeId, Position, Transportation, Vehicle, VehicleType, WeatherCondition};
use serde::{Deserialize, Serialize};

use crate::environment::Environment;
use crate::error::WorldError;
use crate::graph::{Graph, Node};
use crate::site::{DemandPoint, Depot};
use crate::world::World;

/// Top-level dataset document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Graph nodes.
    pub nodes: Vec<NodeRecord>,
    /// Undirected edges between node ids.
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
    /// The depot.
    pub start_point: Depot,
    /// Demand points.
    #[serde(default)]
    pub end_points: Vec<DemandPoint>,
    /// The fleet.
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    /// Per-node weather overrides.
    #[serde(default)]
    pub weather: Vec<WeatherRecord>,
}

/// A node entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Node id.
    pub id: NodeId,
    /// Node position.
    pub position: Position,
    /// Accepted terrain categories; all of them when omitted.
    #[serde(default = "all_terrains")]
    pub terrains: Vec<Transportation>,
}

/// An edge entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// One endpoint id.
    pub from: NodeId,
    /// The other endpoint id.
    pub to: NodeId,
    /// Whether the edge starts open.
    #[serde(default = "default_true")]
    pub open: bool,
}

/// A weather override entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// Node id.
    pub node: NodeId,
    /// Condition at that node.
    pub condition: WeatherCondition,
}

impl Dataset {
    /// Parse a dataset from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Dataset`] if the JSON does not match the schema.
    pub fn parse(json: &str) -> Result<Self, WorldError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a dataset file.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Io`] if the file cannot be read, or
    /// [`WorldError::Dataset`] if it does not match the schema.
    pub fn from_file(path: &Path) -> Result<Self, WorldError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Build the [`World`] this dataset describes.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] for duplicate nodes or edges and weather
    /// entries that reference unknown node ids.
    pub fn into_world(self) -> Result<World, WorldError> {
        let mut graph = Graph::new();
        for record in self.nodes {
            graph.insert_node(Node::with_terrains(record.id, record.position, record.terrains))?;
        }
        for edge in &self.edges {
            graph.add_edge_by_id(edge.from, edge.to, edge.open)?;
        }

        let mut world = World::new(
            graph,
            self.start_point,
            self.end_points,
            share_vehicle_types(self.vehicles),
            Environment::new(),
        );
        world.set_weather_everywhere(WeatherCondition::Sunny);
        for record in &self.weather {
            world.set_weather_for_node(record.node, record.condition)?;
        }

        tracing::debug!(
            nodes = world.graph.node_count(),
            edges = world.graph.edge_count(),
            demand_points = world.demand_points.len(),
            vehicles = world.vehicles.len(),
            "Dataset loaded"
        );
        Ok(world)
    }
}

/// Load a dataset file straight into a [`World`].
///
/// # Errors
///
/// See [`Dataset::from_file`] and [`Dataset::into_world`].
pub fn load_dataset(path: &Path) -> Result<World, WorldError> {
    Dataset::from_file(path)?.into_world()
}

/// Point vehicles with identical type descriptions at one shared template.
fn share_vehicle_types(mut vehicles: Vec<Vehicle>) -> Vec<Vehicle> {
    let mut templates: Vec<Arc<VehicleType>> = Vec::new();
    for vehicle in &mut vehicles {
        if let Some(shared) = templates.iter().find(|t| **t == vehicle.vehicle_type) {
            vehicle.vehicle_type = Arc::clone(shared);
        } else {
            templates.push(Arc::clone(&vehicle.vehicle_type));
        }
    }
    vehicles
}

fn all_terrains() -> Vec<Transportation> {
    Transportation::ALL.to_vec()
}

const fn default_true() -> bool {
    true
}
