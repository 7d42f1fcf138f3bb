//! Error types for the `relief-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`].

use relief_types::{NodeId, Position};

/// Errors that can occur while building or editing a world.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// No node sits at the given position.
    #[error("node not found at {0}")]
    NodeNotFound(Position),

    /// No node carries the given id.
    #[error("node not found: {0}")]
    NodeIdNotFound(NodeId),

    /// A node already occupies the position.
    #[error("duplicate node position: {0}")]
    DuplicateNode(Position),

    /// A node already uses the id.
    #[error("duplicate node id: {0}")]
    DuplicateNodeId(NodeId),

    /// The two positions are not adjacent in the graph.
    #[error("no edge between {from} and {to}")]
    EdgeNotFound {
        /// One endpoint.
        from: Position,
        /// The other endpoint.
        to: Position,
    },

    /// A route-block token is not of the form `"idA,idB"`.
    #[error("invalid route block {0:?}, expected \"idA,idB\"")]
    InvalidRouteBlock(String),

    /// The dataset document could not be parsed.
    #[error("failed to parse dataset: {source}")]
    Dataset {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// The dataset file could not be read.
    #[error("failed to read dataset: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
