//! Route search, supply allocation and settlement for the relief planner.
//!
//! One call to [`deliver`] plans and commits a single delivery from the
//! depot to a demand point: it searches a route with the requested
//! [`Strategy`], packs the supplies onto eligible vehicles and, if anything
//! was loaded, applies the result to the [`World`](relief_world::World).
//! Failures leave the world untouched.
//!
//! # Modules
//!
//! - [`allocator`] -- First-fit packing of supply records onto vehicles.
//! - [`delivery`] -- The search, allocate and settle pipeline.
//! - [`error`] -- Error types for delivery planning.
//! - [`frontier`] -- FIFO, LIFO and min-priority frontiers.
//! - [`heuristics`] -- The heuristic catalog used by greedy and A* search.
//! - [`search`] -- The strategy catalog and the shared traversal.
//! - [`settlement`] -- Travel times and the commit step.

pub mod allocator;
pub mod delivery;
pub mod error;
pub mod frontier;
pub mod heuristics;
pub mod search;
pub mod settlement;

// Re-export primary types at crate root.
pub use allocator::{Allocation, VehicleLoad, allocate};
pub use delivery::{DeliveryOutcome, deliver, plan_supplies};
pub use error::PlannerError;
pub use heuristics::{Heuristic, HeuristicFn};
pub use search::{
    DEFAULT_MAX_DEPTH_LIMIT, Route, SearchRequest, Strategy, TraversalRules, find_route,
    find_route_with,
};
pub use settlement::{Settlement, settle, travel_time};
