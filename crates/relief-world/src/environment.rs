//! Environment overlays consulted during route search.
//!
//! Two layers sit on top of the [`Graph`](crate::graph::Graph):
//!
//! - **Weather** -- at most one [`WeatherCondition`] per position. A position
//!   with no recorded condition is unconstrained.
//! - **Route blocks** -- order-independent bans on the edge between two node
//!   ids, written as `"idA,idB"` tokens by the caller.
//!
//! The planner only reads these overlays; edits come from the caller between
//! deliveries.

use std::collections::{BTreeMap, BTreeSet};

use relief_types::{NodeId, Position, WeatherCondition};

use crate::error::WorldError;

/// A ban on travelling the edge between two nodes, in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouteBlock {
    /// First endpoint as written.
    pub a: NodeId,
    /// Second endpoint as written.
    pub b: NodeId,
}

impl RouteBlock {
    /// Create a block between two node ids.
    pub const fn new(a: NodeId, b: NodeId) -> Self {
        Self { a, b }
    }

    /// The same block written the other way round.
    pub const fn reversed(self) -> Self {
        Self {
            a: self.b,
            b: self.a,
        }
    }
}

impl core::str::FromStr for RouteBlock {
    type Err = WorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || WorldError::InvalidRouteBlock(s.to_owned());
        let (a, b) = s.split_once(',').ok_or_else(invalid)?;
        let a = a.parse().map_err(|_e| invalid())?;
        let b = b.parse().map_err(|_e| invalid())?;
        Ok(Self { a, b })
    }
}

impl core::fmt::Display for RouteBlock {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{},{}", self.a, self.b)
    }
}

/// Weather and route-block overlays for one world.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    /// Current weather by position.
    weather: BTreeMap<Position, WeatherCondition>,
    /// Blocked routes, stored as written.
    blocked_routes: BTreeSet<RouteBlock>,
}

impl Environment {
    /// Create an environment with no weather and no blocks.
    pub const fn new() -> Self {
        Self {
            weather: BTreeMap::new(),
            blocked_routes: BTreeSet::new(),
        }
    }

    // -------------------------------------------------------------------
    // Weather
    // -------------------------------------------------------------------

    /// Record the weather at a position, replacing any previous condition.
    pub fn set_condition(&mut self, position: Position, condition: WeatherCondition) {
        self.weather.insert(position, condition);
    }

    /// The weather recorded at a position, if any.
    pub fn condition(&self, position: Position) -> Option<WeatherCondition> {
        self.weather.get(&position).copied()
    }

    /// Whether the weather closes a position to traffic.
    pub fn is_blocked_position(&self, position: Position) -> bool {
        self.condition(position)
            .is_some_and(WeatherCondition::is_impassable)
    }

    /// Distance multiplier for a segment entering `position`: `None` when
    /// the position is impassable, `1.0` when no weather is recorded.
    pub fn entry_multiplier(&self, position: Position) -> Option<f64> {
        self.condition(position)
            .map_or(Some(1.0), WeatherCondition::distance_multiplier)
    }

    // -------------------------------------------------------------------
    // Route blocks
    // -------------------------------------------------------------------

    /// Ban the route between two nodes.
    pub fn block_route(&mut self, block: RouteBlock) {
        self.blocked_routes.insert(block);
    }

    /// Lift a ban, whichever direction it was written in. Returns whether
    /// anything was removed.
    pub fn unblock_route(&mut self, block: RouteBlock) -> bool {
        let forward = self.blocked_routes.remove(&block);
        let backward = self.blocked_routes.remove(&block.reversed());
        forward || backward
    }

    /// Replace all route blocks with the parsed `"idA,idB"` tokens.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidRouteBlock`] for the first malformed
    /// token; the existing blocks are left untouched in that case.
    pub fn set_blocked_routes<I, S>(&mut self, tokens: I) -> Result<(), WorldError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = tokens
            .into_iter()
            .map(|t| t.as_ref().parse::<RouteBlock>())
            .collect::<Result<BTreeSet<_>, _>>()?;
        self.blocked_routes = parsed;
        Ok(())
    }

    /// Whether the route between two nodes is banned in either direction.
    pub fn is_route_blocked(&self, a: NodeId, b: NodeId) -> bool {
        let block = RouteBlock::new(a, b);
        self.blocked_routes.contains(&block) || self.blocked_routes.contains(&block.reversed())
    }
}
