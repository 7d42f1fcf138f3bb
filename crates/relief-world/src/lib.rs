//! Road graph, environment overlays, and supply sites for the relief planner.
//!
//! This crate models everything a delivery is planned against: the road
//! graph with open/closed edges and per-node terrain, the weather and
//! route-block overlays, the depot and demand points, and the fleet, all
//! gathered in one [`World`] snapshot.
//!
//! # Modules
//!
//! - [`dataset`] -- JSON dataset loading into a [`World`].
//! - [`demo_world`] -- Small hard-coded world for demos and smoke tests.
//! - [`environment`] -- Weather by position and order-independent route blocks.
//! - [`error`] -- Error types for world construction and edits.
//! - [`graph`] -- The road graph: nodes keyed by position, symmetric edges.
//! - [`site`] -- [`Depot`] stock and [`DemandPoint`] deficits.
//! - [`world`] -- The [`World`] aggregate and caller-side edits
//!   (weather changes, fleet repositioning).

pub mod dataset;
pub mod demo_world;
pub mod environment;
pub mod error;
pub mod graph;
pub mod site;
pub mod world;

// Re-export primary types at crate root.
pub use dataset::{Dataset, load_dataset};
pub use demo_world::{DemoSites, demo_world};
pub use environment::{Environment, RouteBlock};
pub use error::WorldError;
pub use graph::{Edge, Graph, Node};
pub use site::{DemandPoint, Depot};
pub use world::World;
