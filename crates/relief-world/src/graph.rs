//! Road graph: positions as nodes, undirected edges with an open flag.
//!
//! The [`Graph`] is the spatial backbone of a delivery world. It owns no
//! search logic; it stores [`Node`]s keyed by [`Position`] and answers
//! adjacency queries for the planner.
//!
//! Every edge is stored on both endpoints with the same `is_open` value.
//! [`Graph::add_edge`] and [`Graph::set_edge_open`] maintain that symmetry;
//! callers that edit [`Node::neighbours`] directly are responsible for it.

use std::collections::{BTreeMap, BTreeSet};

use relief_types::{NodeId, Position, Transportation};

use crate::error::WorldError;

/// One side of an undirected edge, as seen from the node that lists it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Position of the neighbouring node.
    pub to: Position,
    /// Whether the edge is currently passable.
    pub is_open: bool,
}

/// A graph node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Dataset identifier, used by route-block tokens.
    pub id: NodeId,
    /// Where the node sits. Unique within a graph.
    pub position: Position,
    /// Adjacent nodes in insertion order.
    pub neighbours: Vec<Edge>,
    /// Terrain categories a vehicle may use to enter this node.
    pub accessible_terrains: BTreeSet<Transportation>,
}

impl Node {
    /// Create an isolated node accepting every terrain category.
    pub fn new(id: NodeId, position: Position) -> Self {
        Self::with_terrains(id, position, Transportation::ALL)
    }

    /// Create an isolated node accepting only the given terrain categories.
    pub fn with_terrains(
        id: NodeId,
        position: Position,
        terrains: impl IntoIterator<Item = Transportation>,
    ) -> Self {
        Self {
            id,
            position,
            neighbours: Vec::new(),
            accessible_terrains: terrains.into_iter().collect(),
        }
    }

    /// Whether vehicles of the given class may enter this node.
    pub fn can_access_terrain(&self, terrain: Transportation) -> bool {
        self.accessible_terrains.contains(&terrain)
    }

    /// Number of incident edges that are closed.
    pub fn closed_edge_count(&self) -> usize {
        self.neighbours.iter().filter(|e| !e.is_open).count()
    }
}

/// The road graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    /// All nodes indexed by their position.
    nodes: BTreeMap<Position, Node>,
    /// Id index: node id -> position.
    ids: BTreeMap<NodeId, Position>,
}

impl Graph {
    /// Create an empty graph.
    pub const fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            ids: BTreeMap::new(),
        }
    }

    // -------------------------------------------------------------------
    // Node operations
    // -------------------------------------------------------------------

    /// Add a node that accepts every terrain category.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateNode`] if the position is taken, or
    /// [`WorldError::DuplicateNodeId`] if the id is taken.
    pub fn add_node(&mut self, id: NodeId, position: Position) -> Result<(), WorldError> {
        self.insert_node(Node::new(id, position))
    }

    /// Add a fully described node. Its neighbour list is discarded; edges
    /// must go through [`Graph::add_edge`].
    ///
    /// # Errors
    ///
    /// Same as [`Graph::add_node`].
    pub fn insert_node(&mut self, mut node: Node) -> Result<(), WorldError> {
        if self.nodes.contains_key(&node.position) {
            return Err(WorldError::DuplicateNode(node.position));
        }
        if self.ids.contains_key(&node.id) {
            return Err(WorldError::DuplicateNodeId(node.id));
        }
        node.neighbours.clear();
        self.ids.insert(node.id, node.position);
        self.nodes.insert(node.position, node);
        Ok(())
    }

    /// Get the node at a position.
    pub fn node(&self, position: Position) -> Option<&Node> {
        self.nodes.get(&position)
    }

    /// Get the node at a position mutably (e.g. to edit its terrains).
    pub fn node_mut(&mut self, position: Position) -> Option<&mut Node> {
        self.nodes.get_mut(&position)
    }

    /// Get the node carrying an id.
    pub fn node_by_id(&self, id: NodeId) -> Option<&Node> {
        self.ids.get(&id).and_then(|p| self.nodes.get(p))
    }

    /// Position of the node carrying an id.
    pub fn position_of(&self, id: NodeId) -> Option<Position> {
        self.ids.get(&id).copied()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over all nodes in position order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    // -------------------------------------------------------------------
    // Edge operations
    // -------------------------------------------------------------------

    /// Connect two nodes with an undirected edge, listed on both sides.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NodeNotFound`] if either endpoint is missing.
    pub fn add_edge(&mut self, a: Position, b: Position, is_open: bool) -> Result<(), WorldError> {
        if !self.nodes.contains_key(&a) {
            return Err(WorldError::NodeNotFound(a));
        }
        if !self.nodes.contains_key(&b) {
            return Err(WorldError::NodeNotFound(b));
        }
        if let Some(node) = self.nodes.get_mut(&a) {
            node.neighbours.push(Edge { to: b, is_open });
        }
        if let Some(node) = self.nodes.get_mut(&b) {
            node.neighbours.push(Edge { to: a, is_open });
        }
        Ok(())
    }

    /// Connect two nodes by id.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NodeIdNotFound`] if either id is unknown.
    pub fn add_edge_by_id(
        &mut self,
        a: NodeId,
        b: NodeId,
        is_open: bool,
    ) -> Result<(), WorldError> {
        let pa = self.position_of(a).ok_or(WorldError::NodeIdNotFound(a))?;
        let pb = self.position_of(b).ok_or(WorldError::NodeIdNotFound(b))?;
        self.add_edge(pa, pb, is_open)
    }

    /// Open or close every edge between two nodes, on both sides.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EdgeNotFound`] if the nodes are not adjacent.
    pub fn set_edge_open(
        &mut self,
        a: Position,
        b: Position,
        is_open: bool,
    ) -> Result<(), WorldError> {
        let mut touched = false;
        for (from, to) in [(a, b), (b, a)] {
            if let Some(node) = self.nodes.get_mut(&from) {
                for edge in node.neighbours.iter_mut().filter(|e| e.to == to) {
                    edge.is_open = is_open;
                    touched = true;
                }
            }
        }
        if touched {
            Ok(())
        } else {
            Err(WorldError::EdgeNotFound { from: a, to: b })
        }
    }

    /// Edges leaving a position, in insertion order. Empty for unknown
    /// positions.
    pub fn neighbours(&self, position: Position) -> &[Edge] {
        match self.nodes.get(&position) {
            Some(node) => &node.neighbours,
            None => &[],
        }
    }

    /// Number of closed edges at a position (zero for unknown positions).
    pub fn closed_edge_count(&self, position: Position) -> usize {
        self.nodes.get(&position).map_or(0, Node::closed_edge_count)
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.neighbours.len()).sum::<usize>() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Position {
        Position::new(x, y)
    }

    fn make_line_graph() -> Graph {
        let mut graph = Graph::new();
        let _ = graph.add_node(NodeId(0), p(0.0, 0.0));
        let _ = graph.add_node(NodeId(1), p(1.0, 0.0));
        let _ = graph.add_node(NodeId(2), p(2.0, 0.0));
        let _ = graph.add_edge(p(0.0, 0.0), p(1.0, 0.0), true);
        let _ = graph.add_edge(p(1.0, 0.0), p(2.0, 0.0), true);
        graph
    }

    #[test]
    fn add_nodes_and_edges() {
        let graph = make_line_graph();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn edges_are_symmetric() {
        let graph = make_line_graph();
        let from_a: Vec<Position> = graph.neighbours(p(0.0, 0.0)).iter().map(|e| e.to).collect();
        let from_b: Vec<Position> = graph.neighbours(p(1.0, 0.0)).iter().map(|e| e.to).collect();
        assert_eq!(from_a, vec![p(1.0, 0.0)]);
        assert_eq!(from_b, vec![p(0.0, 0.0), p(2.0, 0.0)]);
    }

    #[test]
    fn duplicate_position_rejected() {
        let mut graph = make_line_graph();
        assert!(matches!(
            graph.add_node(NodeId(9), p(1.0, 0.0)),
            Err(WorldError::DuplicateNode(_))
        ));
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut graph = make_line_graph();
        assert!(matches!(
            graph.add_node(NodeId(1), p(5.0, 5.0)),
            Err(WorldError::DuplicateNodeId(NodeId(1)))
        ));
    }

    #[test]
    fn edge_requires_both_endpoints() {
        let mut graph = make_line_graph();
        assert!(graph.add_edge(p(0.0, 0.0), p(7.0, 7.0), true).is_err());
        assert!(graph.add_edge_by_id(NodeId(0), NodeId(42), true).is_err());
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn closing_an_edge_updates_both_sides() {
        let mut graph = make_line_graph();
        assert!(graph.set_edge_open(p(2.0, 0.0), p(1.0, 0.0), false).is_ok());
        assert_eq!(graph.closed_edge_count(p(1.0, 0.0)), 1);
        assert_eq!(graph.closed_edge_count(p(2.0, 0.0)), 1);
        assert_eq!(graph.closed_edge_count(p(0.0, 0.0)), 0);
    }

    #[test]
    fn closing_missing_edge_fails() {
        let mut graph = make_line_graph();
        assert!(matches!(
            graph.set_edge_open(p(0.0, 0.0), p(2.0, 0.0), false),
            Err(WorldError::EdgeNotFound { .. })
        ));
    }

    #[test]
    fn lookup_by_id() {
        let graph = make_line_graph();
        assert_eq!(graph.position_of(NodeId(2)), Some(p(2.0, 0.0)));
        assert_eq!(graph.node_by_id(NodeId(1)).map(|n| n.position), Some(p(1.0, 0.0)));
        assert!(graph.node_by_id(NodeId(5)).is_none());
    }

    #[test]
    fn unknown_position_has_no_neighbours() {
        let graph = make_line_graph();
        assert!(graph.neighbours(p(9.0, 9.0)).is_empty());
        assert_eq!(graph.closed_edge_count(p(9.0, 9.0)), 0);
    }

    #[test]
    fn terrain_restrictions() {
        let mut graph = Graph::new();
        let lake = Node::with_terrains(
            NodeId(0),
            p(0.0, 0.0),
            [Transportation::Sea, Transportation::Air],
        );
        assert!(graph.insert_node(lake).is_ok());
        let node = graph.node(p(0.0, 0.0));
        assert_eq!(node.map(|n| n.can_access_terrain(Transportation::Land)), Some(false));
        assert_eq!(node.map(|n| n.can_access_terrain(Transportation::Sea)), Some(true));
    }
}
