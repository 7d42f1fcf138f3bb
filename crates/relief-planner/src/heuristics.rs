//! Cost estimates for the informed searches.
//!
//! Every heuristic has the same shape, [`HeuristicFn`]: it scores moving from
//! one position towards another given the current world and the demand point
//! being served. Scores are engineered penalties rather than lower bounds on
//! the remaining distance, so A* driven by them is not guaranteed to return
//! the shortest route.
//!
//! | Name                           | Score                                                  |
//! |--------------------------------|--------------------------------------------------------|
//! | `manhattan`                    | `|dx| + |dy|`                                          |
//! | `time_estimate`                | fastest idle vehicle's travel time, `inf` if none idle |
//! | `blocked_route_penalty`        | manhattan + 10 per closed edge at the current node     |
//! | `dynamic_supply_priority`      | manhattan + 5 per unit of need the depot cannot cover  |
//! | `delivery_success_probability` | `(1 - p) * 100`, `p` the best vehicle's demand share   |
//! | `combined`                     | sum of the five above                                  |

use relief_types::Position;
use relief_world::{DemandPoint, World};

use crate::error::PlannerError;

/// Signature shared by all heuristics: `(from, to, world, destination)`.
pub type HeuristicFn = fn(Position, Position, &World, &DemandPoint) -> f64;

/// Penalty per closed edge at the current node.
const CLOSED_EDGE_PENALTY: f64 = 10.0;

/// Penalty per unit of need the depot cannot cover.
const SHORTFALL_PENALTY: f64 = 5.0;

/// Scale of the delivery-failure penalty.
const FAILURE_PENALTY: f64 = 100.0;

/// The heuristic catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Heuristic {
    /// Plain Manhattan distance.
    Manhattan,
    /// Minimum travel time over idle vehicles.
    TimeEstimate,
    /// Manhattan plus a penalty for closed edges.
    BlockedRoutePenalty,
    /// Manhattan plus a penalty for depot shortfalls.
    DynamicSupplyPriority,
    /// Penalty for a low chance that one vehicle can carry the demand.
    DeliverySuccessProbability,
    /// Sum of all of the above.
    Combined,
}

impl Heuristic {
    /// Every heuristic in catalog order.
    pub const ALL: [Self; 6] = [
        Self::Manhattan,
        Self::TimeEstimate,
        Self::BlockedRoutePenalty,
        Self::DynamicSupplyPriority,
        Self::DeliverySuccessProbability,
        Self::Combined,
    ];

    /// Caller-facing name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Manhattan => "manhattan",
            Self::TimeEstimate => "time_estimate",
            Self::BlockedRoutePenalty => "blocked_route_penalty",
            Self::DynamicSupplyPriority => "dynamic_supply_priority",
            Self::DeliverySuccessProbability => "delivery_success_probability",
            Self::Combined => "combined",
        }
    }

    /// The scoring function behind this entry.
    pub const fn function(self) -> HeuristicFn {
        match self {
            Self::Manhattan => manhattan,
            Self::TimeEstimate => time_estimate,
            Self::BlockedRoutePenalty => blocked_route_penalty,
            Self::DynamicSupplyPriority => dynamic_supply_priority,
            Self::DeliverySuccessProbability => delivery_success_probability,
            Self::Combined => combined,
        }
    }

    /// Score a move from `from` towards `to`.
    pub fn cost(
        self,
        from: Position,
        to: Position,
        world: &World,
        destination: &DemandPoint,
    ) -> f64 {
        (self.function())(from, to, world, destination)
    }
}

impl core::fmt::Display for Heuristic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for Heuristic {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|h| h.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PlannerError::UnknownHeuristic(s.to_owned()))
    }
}

/// `|dx| + |dy|`.
pub fn manhattan(from: Position, to: Position, _world: &World, _destination: &DemandPoint) -> f64 {
    from.manhattan(to)
}

/// Shortest time any idle vehicle would need to cover the Manhattan
/// distance at its average velocity. Infinite when no vehicle is idle.
pub fn time_estimate(
    from: Position,
    to: Position,
    world: &World,
    _destination: &DemandPoint,
) -> f64 {
    let distance = from.manhattan(to);
    world
        .vehicles
        .iter()
        .filter(|v| v.is_idle())
        .map(|v| {
            let velocity = v.vehicle_type.average_velocity;
            if velocity > 0.0 {
                distance / velocity
            } else {
                f64::INFINITY
            }
        })
        .fold(f64::INFINITY, f64::min)
}

/// Manhattan distance plus a fixed penalty for each closed edge at `from`.
pub fn blocked_route_penalty(
    from: Position,
    to: Position,
    world: &World,
    _destination: &DemandPoint,
) -> f64 {
    let closed = world.graph.closed_edge_count(from) as f64;
    CLOSED_EDGE_PENALTY.mul_add(closed, from.manhattan(to))
}

/// Manhattan distance plus a penalty for every unit the destination needs
/// beyond what the depot holds.
pub fn dynamic_supply_priority(
    from: Position,
    to: Position,
    world: &World,
    destination: &DemandPoint,
) -> f64 {
    let shortfall: f64 = destination
        .supplies_needed()
        .map(|(supply_type, needed)| (needed - world.depot.available(supply_type)).max(0.0))
        .sum();
    SHORTFALL_PENALTY.mul_add(shortfall, from.manhattan(to))
}

/// Penalty that grows as the best single vehicle covers less of the
/// destination's demand.
///
/// Each idle vehicle with enough fuel for the Manhattan distance covers the
/// fraction `weight_share * volume_share` of the demand, each share capped
/// to `[0, 1]`. The best fraction is the success probability `p`.
pub fn delivery_success_probability(
    from: Position,
    to: Position,
    world: &World,
    destination: &DemandPoint,
) -> f64 {
    let (weight_needed, volume_needed) = destination.supplies_needed().fold(
        (0.0, 0.0),
        |(weight, volume), (supply_type, quantity)| {
            (
                supply_type.unit_weight().mul_add(quantity, weight),
                supply_type.unit_volume().mul_add(quantity, volume),
            )
        },
    );
    let distance = from.manhattan(to);

    let probability = world
        .vehicles
        .iter()
        .filter(|v| v.is_idle() && v.current_fuel >= distance)
        .map(|v| share(v.spare_weight(), weight_needed) * share(v.spare_volume(), volume_needed))
        .fold(0.0, f64::max);

    (1.0 - probability) * FAILURE_PENALTY
}

/// Sum of the five individual heuristics.
pub fn combined(from: Position, to: Position, world: &World, destination: &DemandPoint) -> f64 {
    manhattan(from, to, world, destination)
        + time_estimate(from, to, world, destination)
        + blocked_route_penalty(from, to, world, destination)
        + dynamic_supply_priority(from, to, world, destination)
        + delivery_success_probability(from, to, world, destination)
}

/// Fraction of `needed` that `available` covers, capped to `[0, 1]`.
/// Nothing needed counts as fully covered.
fn share(available: f64, needed: f64) -> f64 {
    if needed <= 0.0 {
        1.0
    } else {
        (available / needed).clamp(0.0, 1.0)
    }
}
