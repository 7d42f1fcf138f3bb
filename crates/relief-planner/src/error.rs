//! Error types for the `relief-planner` crate.
//!
//! [`PlannerError::NoPathFound`] and [`PlannerError::NoAvailableVehicle`] are
//! expected outcomes of normal operation: a delivery that returns either of
//! them has left the world untouched. The remaining variants reject a
//! malformed request before any search runs.

use relief_types::Position;

/// Errors that can occur while planning a delivery.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlannerError {
    /// The frontier was exhausted without reaching the destination.
    #[error("no path found from {from} to {to}")]
    NoPathFound {
        /// The depot.
        from: Position,
        /// The demand point.
        to: Position,
    },

    /// A path exists but no idle, fuelled, compatible vehicle at the depot
    /// could take any of the supplies.
    #[error("no available vehicles for a {distance}-unit route")]
    NoAvailableVehicle {
        /// Length of the path that was found.
        distance: f64,
    },

    /// The strategy name is not registered.
    #[error("unknown search strategy: {0}")]
    UnknownStrategy(String),

    /// The heuristic name is not registered.
    #[error("unknown heuristic: {0}")]
    UnknownHeuristic(String),

    /// The destination is not a demand point of the world.
    #[error("no demand point at {0}")]
    UnknownDemandPoint(Position),
}

impl PlannerError {
    /// Whether this is a recoverable delivery outcome rather than a bad
    /// request.
    pub const fn is_delivery_failure(&self) -> bool {
        matches!(self, Self::NoPathFound { .. } | Self::NoAvailableVehicle { .. })
    }
}
