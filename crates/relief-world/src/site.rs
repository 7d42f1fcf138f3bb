//! Supply sites: the depot that ships and the demand points that receive.
//!
//! Depot stock only ever decreases and a demand point's outstanding need
//! only ever decreases; both are clamped at zero.

use std::collections::BTreeMap;

use relief_types::{Position, Supply, SupplyType};
use serde::{Deserialize, Serialize};

/// The single source of supplies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depot {
    /// Where supplies are loaded.
    pub position: Position,
    /// Stock records. Several records of one type are allowed and are
    /// drawn down in order.
    pub supplies: Vec<Supply>,
}

impl Depot {
    /// Create a depot.
    pub const fn new(position: Position, supplies: Vec<Supply>) -> Self {
        Self { position, supplies }
    }

    /// Total stock of one supply type across all records.
    pub fn available(&self, supply_type: SupplyType) -> f64 {
        self.supplies
            .iter()
            .filter(|s| s.supply_type == supply_type)
            .map(|s| s.quantity)
            .sum()
    }

    /// Total stock of every type.
    pub fn total_quantity(&self) -> f64 {
        self.supplies.iter().map(|s| s.quantity).sum()
    }

    /// Draw `quantity` units of a type from the stock records in order,
    /// never driving a record below zero. Returns the quantity actually
    /// taken from each record touched, in draw order.
    pub fn withdraw(&mut self, supply_type: SupplyType, quantity: f64) -> Vec<f64> {
        let mut remaining = quantity;
        let mut drawn = Vec::new();
        for record in self
            .supplies
            .iter_mut()
            .filter(|s| s.supply_type == supply_type)
        {
            if remaining <= 0.0 {
                break;
            }
            if record.quantity >= remaining {
                record.quantity -= remaining;
                drawn.push(remaining);
                remaining = 0.0;
            } else {
                remaining -= record.quantity;
                drawn.push(record.quantity);
                record.quantity = 0.0;
            }
        }
        drawn
    }
}

/// A destination with an outstanding supply deficit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandPoint {
    /// Where the supplies must arrive.
    pub position: Position,
    /// Quantity still needed per supply type. Never negative.
    #[serde(rename = "needs_supplies")]
    pub needed: BTreeMap<SupplyType, f64>,
    /// Priority tier: 0 normal, 1 urgent. Display only.
    #[serde(default)]
    pub priority: u8,
}

impl DemandPoint {
    /// Create a demand point.
    pub const fn new(position: Position, needed: BTreeMap<SupplyType, f64>, priority: u8) -> Self {
        Self {
            position,
            needed,
            priority,
        }
    }

    /// Supply types still needed, with their positive outstanding quantity.
    pub fn supplies_needed(&self) -> impl Iterator<Item = (SupplyType, f64)> + '_ {
        self.needed
            .iter()
            .filter(|(_, q)| **q > 0.0)
            .map(|(t, q)| (*t, *q))
    }

    /// Outstanding quantity of one type (zero if never needed).
    pub fn needed(&self, supply_type: SupplyType) -> f64 {
        self.needed.get(&supply_type).copied().unwrap_or(0.0)
    }

    /// Record a delivery, reducing the outstanding need and clamping at zero.
    /// Types the point never asked for are ignored.
    pub fn satisfy(&mut self, supply: &Supply) {
        if let Some(q) = self.needed.get_mut(&supply.supply_type) {
            *q = (*q - supply.quantity).max(0.0);
        }
    }

    /// Whether every need has been met.
    pub fn is_satisfied(&self) -> bool {
        self.supplies_needed().next().is_none()
    }

    /// Whether the point is in the urgent tier.
    pub const fn is_urgent(&self) -> bool {
        self.priority >= 1
    }
}
