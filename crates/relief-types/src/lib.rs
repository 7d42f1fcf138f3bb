//! Shared value types for the relief supply planner.
//!
//! This crate is the single source of truth for the plain data used across
//! the workspace: coordinates, identifiers, supply and vehicle descriptions,
//! and the weather conditions that constrain travel.
//!
//! # Modules
//!
//! - [`ids`] -- Integer identifier wrappers for graph nodes and vehicles
//! - [`enums`] -- Closed enumerations (supply types, transport modes, weather)
//! - [`structs`] -- Value structs (positions, supplies, vehicles)

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{ParseEnumError, SupplyType, Transportation, VehicleStatus, WeatherCondition};
pub use ids::{NodeId, VehicleId};
pub use structs::{Position, Supply, Vehicle, VehicleType};
