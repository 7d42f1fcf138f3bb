//! Route search.
//!
//! All six strategies run one traversal and differ only
//! in the frontier they use and the key a candidate is filed under:
//!
//! | Strategy              | Frontier   | Key                         |
//! |-----------------------|------------|-----------------------------|
//! | `bfs`                 | FIFO       | none                        |
//! | `dfs`                 | LIFO       | none                        |
//! | `ids`                 | LIFO       | none, depth-limited         |
//! | `ucs`                 | priority   | accumulated distance        |
//! | `greedy`              | priority   | heuristic                   |
//! | `a_star`              | priority   | distance + heuristic        |
//!
//! A position is marked visited when it is expanded and is never expanded
//! again, even if a cheaper path to it turns up later. Entering a neighbour
//! costs the Manhattan length of the edge, scaled by the weather at the
//! neighbour when weather costs are enabled. Storm positions are never
//! entered.

use std::collections::BTreeSet;

use relief_types::{Position, Transportation};
use relief_world::{DemandPoint, World};

use crate::error::PlannerError;
use crate::frontier::{Candidate, FifoFrontier, Frontier, LifoFrontier, PriorityFrontier};
use crate::heuristics::{Heuristic, HeuristicFn};

/// Default ceiling for iterative deepening.
pub const DEFAULT_MAX_DEPTH_LIMIT: usize = 50;

/// The strategy catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Strategy {
    /// Breadth-first: fewest hops.
    #[default]
    BreadthFirst,
    /// Depth-first: first-listed neighbour first.
    DepthFirst,
    /// Depth-first with limits 0, 1, 2, ... up to the configured maximum.
    IterativeDeepening,
    /// Lowest accumulated distance first.
    UniformCost,
    /// Lowest heuristic first.
    Greedy,
    /// Lowest distance plus heuristic first.
    AStar,
}

impl Strategy {
    /// Every strategy in catalog order.
    pub const ALL: [Self; 6] = [
        Self::BreadthFirst,
        Self::DepthFirst,
        Self::IterativeDeepening,
        Self::UniformCost,
        Self::Greedy,
        Self::AStar,
    ];

    /// Caller-facing name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::BreadthFirst => "bfs",
            Self::DepthFirst => "dfs",
            Self::IterativeDeepening => "ids",
            Self::UniformCost => "ucs",
            Self::Greedy => "greedy",
            Self::AStar => "a_star",
        }
    }

    /// Whether the strategy consults a heuristic.
    pub const fn is_informed(self) -> bool {
        matches!(self, Self::Greedy | Self::AStar)
    }

    /// Heuristic used when the request names none.
    pub const fn default_heuristic(self) -> Heuristic {
        match self {
            Self::AStar => Heuristic::Combined,
            _ => Heuristic::Manhattan,
        }
    }
}

impl core::fmt::Display for Strategy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for Strategy {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|st| st.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PlannerError::UnknownStrategy(s.to_owned()))
    }
}

/// Edge-filter toggles applied uniformly to every strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalRules {
    /// Only enter nodes that accept the requested terrain, and only send
    /// vehicles of that terrain.
    pub terrain_filter: bool,
    /// Scale edge costs by the weather at the entered node.
    pub weather_costs: bool,
}

impl Default for TraversalRules {
    fn default() -> Self {
        Self {
            terrain_filter: true,
            weather_costs: true,
        }
    }
}

/// Everything a caller chooses for one delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRequest {
    /// Frontier discipline.
    pub strategy: Strategy,
    /// Heuristic override for informed strategies.
    pub heuristic: Option<Heuristic>,
    /// Terrain the delivering vehicles travel on.
    pub terrain: Transportation,
    /// Edge-filter toggles.
    pub rules: TraversalRules,
    /// Iterative deepening tries every depth limit below this one.
    pub max_depth_limit: usize,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            heuristic: None,
            terrain: Transportation::Land,
            rules: TraversalRules::default(),
            max_depth_limit: DEFAULT_MAX_DEPTH_LIMIT,
        }
    }
}

impl SearchRequest {
    /// A default request for `strategy`.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// The heuristic this request resolves to.
    pub fn resolved_heuristic(&self) -> Heuristic {
        self.heuristic
            .unwrap_or_else(|| self.strategy.default_heuristic())
    }
}

/// A path found by a search.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Positions from origin to destination inclusive.
    pub path: Vec<Position>,
    /// Weather-adjusted length.
    pub distance: f64,
}

impl Route {
    /// Number of edges on the path.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Search from `origin` to `destination` using the request's resolved
/// heuristic.
pub fn find_route(
    world: &World,
    origin: Position,
    destination: &DemandPoint,
    request: &SearchRequest,
) -> Option<Route> {
    let heuristic = request.resolved_heuristic();
    find_route_with(world, origin, destination, request, heuristic.function())
}

/// Search with an explicit heuristic function.
///
/// Uninformed strategies ignore `heuristic`.
pub fn find_route_with(
    world: &World,
    origin: Position,
    destination: &DemandPoint,
    request: &SearchRequest,
    heuristic: HeuristicFn,
) -> Option<Route> {
    let search = Search {
        world,
        destination,
        request,
        heuristic,
    };

    let route = match request.strategy {
        Strategy::BreadthFirst => {
            search.traverse(FifoFrontier::default(), origin, Key::Unordered, None)
        }
        Strategy::DepthFirst => {
            search.traverse(LifoFrontier::default(), origin, Key::Unordered, None)
        }
        Strategy::IterativeDeepening => (0..request.max_depth_limit).find_map(|limit| {
            tracing::debug!(limit, "Deepening search");
            search.traverse(LifoFrontier::default(), origin, Key::Unordered, Some(limit))
        }),
        Strategy::UniformCost => {
            search.traverse(PriorityFrontier::default(), origin, Key::Distance, None)
        }
        Strategy::Greedy => {
            search.traverse(PriorityFrontier::default(), origin, Key::Heuristic, None)
        }
        Strategy::AStar => search.traverse(
            PriorityFrontier::default(),
            origin,
            Key::DistancePlusHeuristic,
            None,
        ),
    };

    if route.is_none() {
        tracing::debug!(
            strategy = %request.strategy,
            from = %origin,
            to = %destination.position,
            "Frontier exhausted"
        );
    }
    route
}

// ---------------------------------------------------------------------------
// Traversal
// ---------------------------------------------------------------------------

/// What a candidate is filed under on a priority frontier.
#[derive(Debug, Clone, Copy)]
enum Key {
    Unordered,
    Distance,
    Heuristic,
    DistancePlusHeuristic,
}

struct Search<'a> {
    world: &'a World,
    destination: &'a DemandPoint,
    request: &'a SearchRequest,
    heuristic: HeuristicFn,
}

impl Search<'_> {
    fn key(&self, candidate: &Candidate, key: Key) -> f64 {
        let estimate = || {
            (self.heuristic)(
                candidate.position,
                self.destination.position,
                self.world,
                self.destination,
            )
        };
        match key {
            Key::Unordered => 0.0,
            Key::Distance => candidate.distance,
            Key::Heuristic => estimate(),
            Key::DistancePlusHeuristic => candidate.distance + estimate(),
        }
    }

    /// Eligible moves out of `position`, in adjacency order, with their cost.
    fn moves(&self, position: Position, visited: &BTreeSet<Position>) -> Vec<(Position, f64)> {
        let graph = &self.world.graph;
        let environment = &self.world.environment;
        let rules = self.request.rules;
        let Some(here) = graph.node(position) else {
            return Vec::new();
        };

        here.neighbours
            .iter()
            .filter(|edge| edge.is_open && !visited.contains(&edge.to))
            .filter_map(|edge| {
                let next = graph.node(edge.to)?;
                if rules.terrain_filter && !next.can_access_terrain(self.request.terrain) {
                    return None;
                }
                if environment.is_route_blocked(here.id, next.id) {
                    return None;
                }
                let multiplier = environment.entry_multiplier(edge.to)?;
                let base = position.manhattan(edge.to);
                let cost = if rules.weather_costs {
                    base * multiplier
                } else {
                    base
                };
                Some((edge.to, cost))
            })
            .collect()
    }

    fn traverse<F: Frontier>(
        &self,
        mut frontier: F,
        origin: Position,
        key: Key,
        depth_limit: Option<usize>,
    ) -> Option<Route> {
        let goal = self.destination.position;
        let mut visited = BTreeSet::new();
        let start = Candidate::origin(origin);
        let start_key = self.key(&start, key);
        frontier.push(start, start_key);

        while let Some(current) = frontier.pop() {
            if visited.contains(&current.position) {
                continue;
            }
            if current.position == goal {
                return Some(Route {
                    path: current.path,
                    distance: current.distance,
                });
            }
            if depth_limit.is_some_and(|limit| current.depth() >= limit) {
                continue;
            }
            visited.insert(current.position);

            let mut moves = self.moves(current.position, &visited);
            if F::REVERSE_PUSH {
                moves.reverse();
            }
            for (next, cost) in moves {
                let candidate = current.extend(next, cost);
                let candidate_key = self.key(&candidate, key);
                frontier.push(candidate, candidate_key);
            }
        }
        None
    }
}
