//! First-fit supply allocation across vehicles.
//!
//! Supplies are taken in order; each whole record goes to the first vehicle
//! whose running weight and volume still admit it. A record that fits no
//! vehicle is dropped and never offered again. Records are never split
//! across vehicles.
//!
//! The running loads live in an explicit [`VehicleLoad`] state that the
//! caller seeds from the fleet and receives back updated inside the
//! [`Allocation`], so settlement can commit exactly what was packed.

use relief_types::{Supply, Vehicle, VehicleId};

/// Running load of one candidate vehicle during allocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleLoad {
    /// The vehicle being packed.
    pub vehicle: VehicleId,
    /// Weight loaded so far.
    pub weight: f64,
    /// Volume loaded so far.
    pub volume: f64,
    /// Weight limit from the vehicle type.
    pub weight_capacity: f64,
    /// Volume limit from the vehicle type.
    pub volume_capacity: f64,
}

impl VehicleLoad {
    /// Seed a load from a vehicle's current state.
    pub fn of(vehicle: &Vehicle) -> Self {
        Self {
            vehicle: vehicle.id,
            weight: vehicle.current_weight,
            volume: vehicle.current_volume,
            weight_capacity: vehicle.vehicle_type.weight_capacity,
            volume_capacity: vehicle.vehicle_type.volume_capacity,
        }
    }

    /// Whether the whole record still fits.
    pub fn fits(&self, supply: &Supply) -> bool {
        self.weight + supply.weight() <= self.weight_capacity
            && self.volume + supply.volume() <= self.volume_capacity
    }

    fn take(&mut self, supply: &Supply) {
        self.weight += supply.weight();
        self.volume += supply.volume();
    }
}

/// Result of packing supplies onto a list of vehicles.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    /// Supplies assigned to each vehicle, parallel to `loads`.
    pub assignments: Vec<Vec<Supply>>,
    /// Final running load of each vehicle.
    pub loads: Vec<VehicleLoad>,
    /// Records that fit no vehicle.
    pub dropped: Vec<Supply>,
}

impl Allocation {
    /// Whether at least one vehicle received something.
    pub fn any_assigned(&self) -> bool {
        self.assignments.iter().any(|a| !a.is_empty())
    }

    /// Vehicles that received something, with their load and supplies.
    pub fn loaded(&self) -> impl Iterator<Item = (&VehicleLoad, &[Supply])> {
        self.loads
            .iter()
            .zip(&self.assignments)
            .filter(|(_, supplies)| !supplies.is_empty())
            .map(|(load, supplies)| (load, supplies.as_slice()))
    }
}

/// Pack `supplies` onto `loads` first-fit, in input order on both sides.
///
/// With no vehicles every record is dropped. A zero-quantity record fits
/// the first vehicle and is assigned to it.
pub fn allocate(mut loads: Vec<VehicleLoad>, supplies: &[Supply]) -> Allocation {
    let mut assignments: Vec<Vec<Supply>> = vec![Vec::new(); loads.len()];
    let mut dropped = Vec::new();

    for supply in supplies {
        let slot = loads
            .iter_mut()
            .zip(assignments.iter_mut())
            .find(|(load, _)| load.fits(supply));
        match slot {
            Some((load, assigned)) => {
                load.take(supply);
                assigned.push(*supply);
            }
            None => dropped.push(*supply),
        }
    }

    tracing::debug!(
        vehicles = loads.len(),
        supplies = supplies.len(),
        dropped = dropped.len(),
        "Supplies allocated"
    );

    Allocation {
        assignments,
        loads,
        dropped,
    }
}
