//! Value structs shared across the planner.
//!
//! [`Position`] doubles as a geometric point and as the key of the road
//! graph, so it carries total ordering and hashing over its coordinate bits.
//! Vehicles reference a shared, immutable [`VehicleType`] template.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::enums::{SupplyType, Transportation, VehicleStatus, WeatherCondition};
use crate::ids::VehicleId;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A point on the map. Serialized as a two-element `[x, y]` array.
///
/// Equality, ordering and hashing compare the coordinate pair with
/// [`f64::total_cmp`], so positions are usable as map keys.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Position {
    /// Horizontal coordinate (longitude for imported maps).
    pub x: f64,
    /// Vertical coordinate (latitude for imported maps).
    pub y: f64,
}

impl Position {
    /// Create a position from its coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Manhattan distance `|dx| + |dy|` to another position.
    pub fn manhattan(self, other: Self) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Position {}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

impl From<[f64; 2]> for Position {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Position> for [f64; 2] {
    fn from(p: Position) -> Self {
        [p.x, p.y]
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Supply
// ---------------------------------------------------------------------------

/// A quantity of one supply type.
///
/// A record is atomic once created: it is loaded onto exactly one vehicle or
/// not at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Supply {
    /// Number of units (non-negative).
    pub quantity: f64,
    /// What is being carried.
    #[serde(rename = "type")]
    pub supply_type: SupplyType,
}

impl Supply {
    /// Create a supply record.
    pub const fn new(supply_type: SupplyType, quantity: f64) -> Self {
        Self {
            quantity,
            supply_type,
        }
    }

    /// Total weight of the record.
    pub fn weight(&self) -> f64 {
        self.supply_type.unit_weight() * self.quantity
    }

    /// Total volume of the record.
    pub fn volume(&self) -> f64 {
        self.supply_type.unit_volume() * self.quantity
    }
}

// ---------------------------------------------------------------------------
// Vehicles
// ---------------------------------------------------------------------------

/// Immutable template shared by every vehicle of one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleType {
    /// Display name of the class (e.g. "Truck").
    pub name: String,
    /// How the class moves.
    pub transportation: Transportation,
    /// Fuel tank size, in distance units.
    pub fuel_capacity: f64,
    /// Maximum carried weight.
    pub weight_capacity: f64,
    /// Maximum carried volume.
    pub volume_capacity: f64,
    /// Cruising speed in fair weather.
    pub average_velocity: f64,
}

impl VehicleType {
    /// Whether the class may travel over the given terrain category.
    pub fn can_access_terrain(&self, terrain: Transportation) -> bool {
        self.transportation == terrain
    }

    /// Average velocity scaled by the weather at the current position.
    /// Unrecorded weather leaves the velocity unchanged.
    pub fn adjusted_velocity(&self, weather: Option<WeatherCondition>) -> f64 {
        weather.map_or(self.average_velocity, |w| {
            self.average_velocity * w.velocity_factor()
        })
    }
}

/// A single vehicle of the fleet.
///
/// Position, fuel, load and status only change when a delivery settles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Fleet-unique identifier.
    pub id: VehicleId,
    /// Where the vehicle is parked.
    pub position: Position,
    /// The class template.
    #[serde(rename = "type")]
    pub vehicle_type: Arc<VehicleType>,
    /// Remaining fuel, in distance units.
    pub current_fuel: f64,
    /// Weight currently loaded.
    pub current_weight: f64,
    /// Volume currently loaded.
    pub current_volume: f64,
    /// Dispatch status.
    pub status: VehicleStatus,
}

impl Vehicle {
    /// Whether the vehicle is free for a new delivery.
    pub fn is_idle(&self) -> bool {
        self.status == VehicleStatus::Idle
    }

    /// Weight the vehicle can still take on.
    pub fn spare_weight(&self) -> f64 {
        self.vehicle_type.weight_capacity - self.current_weight
    }

    /// Volume the vehicle can still take on.
    pub fn spare_volume(&self) -> f64 {
        self.vehicle_type.volume_capacity - self.current_volume
    }
}
