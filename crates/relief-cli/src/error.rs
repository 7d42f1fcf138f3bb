//! Error types for the relief CLI binary.
//!
//! [`CliError`] is the top-level error type that wraps every failure mode
//! between reading the config and reporting the delivery.

use crate::config::ConfigError;

/// Top-level error for the relief CLI binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// World loading or editing failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: relief_world::WorldError,
    },

    /// The request was malformed.
    #[error("planner error: {source}")]
    Planner {
        /// The underlying planner error.
        #[from]
        source: relief_planner::PlannerError,
    },

    /// The configured destination index is out of range.
    #[error("destination {index} out of range: the world has {count} demand points")]
    Destination {
        /// The configured index.
        index: usize,
        /// Number of demand points in the world.
        count: usize,
    },
}
