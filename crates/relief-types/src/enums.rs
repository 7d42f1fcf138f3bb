//! Enumeration types for supplies, vehicles, and the environment.
//!
//! Every enum here is a small closed catalog. Names round-trip through
//! [`core::fmt::Display`] and [`core::str::FromStr`] using the variant name,
//! which is also the serde representation used by datasets.

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a variant of a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    /// Which enum was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Supplies
// ---------------------------------------------------------------------------

/// A category of relief supply.
///
/// Each category has a fixed weight and volume per unit:
///
/// | Type     | Weight | Volume |
/// |----------|--------|--------|
/// | Water    | 1.0    | 1.0    |
/// | Food     | 1.2    | 1.2    |
/// | Medicine | 0.5    | 0.5    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SupplyType {
    /// Drinking water.
    Water,
    /// Food rations.
    Food,
    /// Medical supplies.
    Medicine,
}

impl SupplyType {
    /// All supply types in declaration order.
    pub const ALL: [Self; 3] = [Self::Water, Self::Food, Self::Medicine];

    /// Weight of one unit of this supply.
    pub const fn unit_weight(self) -> f64 {
        match self {
            Self::Water => 1.0,
            Self::Food => 1.2,
            Self::Medicine => 0.5,
        }
    }

    /// Volume of one unit of this supply.
    pub const fn unit_volume(self) -> f64 {
        match self {
            Self::Water => 1.0,
            Self::Food => 1.2,
            Self::Medicine => 0.5,
        }
    }

    /// The variant name, as used in datasets and manifests.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Water => "Water",
            Self::Food => "Food",
            Self::Medicine => "Medicine",
        }
    }
}

impl core::fmt::Display for SupplyType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for SupplyType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError::new("supply type", s))
    }
}

// ---------------------------------------------------------------------------
// Vehicles
// ---------------------------------------------------------------------------

/// How a vehicle class moves, which is also the terrain category a graph
/// node must accept for that vehicle to enter it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Transportation {
    /// Road vehicles.
    #[default]
    Land,
    /// Aircraft and drones.
    Air,
    /// Boats.
    Sea,
}

impl Transportation {
    /// All transportation modes in declaration order.
    pub const ALL: [Self; 3] = [Self::Land, Self::Air, Self::Sea];

    /// The variant name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Land => "Land",
            Self::Air => "Air",
            Self::Sea => "Sea",
        }
    }
}

impl core::fmt::Display for Transportation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for Transportation {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError::new("transportation mode", s))
    }
}

/// Whether a vehicle can be dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum VehicleStatus {
    /// Parked and available for a delivery.
    #[default]
    Idle,
    /// Committed to a delivery.
    Busy,
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// Weather at a single graph position.
///
/// Effects on travel:
/// - Sunny: no modifier
/// - Rainy: entering costs 1.10x distance, velocity 0.9x
/// - Snowy: entering costs 1.25x distance, velocity 0.8x
/// - Storm: position is impassable, velocity 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum WeatherCondition {
    /// Clear skies.
    #[default]
    Sunny,
    /// Rain slows traffic.
    Rainy,
    /// Snow slows traffic further.
    Snowy,
    /// Nothing moves.
    Storm,
}

impl WeatherCondition {
    /// All weather conditions in declaration order.
    pub const ALL: [Self; 4] = [Self::Sunny, Self::Rainy, Self::Snowy, Self::Storm];

    /// Multiplier applied to the distance of a segment entering a position
    /// with this weather, or `None` when the position cannot be entered.
    pub const fn distance_multiplier(self) -> Option<f64> {
        match self {
            Self::Sunny => Some(1.0),
            Self::Rainy => Some(1.10),
            Self::Snowy => Some(1.25),
            Self::Storm => None,
        }
    }

    /// Factor applied to a vehicle's average velocity on a segment that
    /// starts at a position with this weather.
    pub const fn velocity_factor(self) -> f64 {
        match self {
            Self::Sunny => 1.0,
            Self::Rainy => 0.9,
            Self::Snowy => 0.8,
            Self::Storm => 0.0,
        }
    }

    /// Whether the position is closed to traffic.
    pub const fn is_impassable(self) -> bool {
        matches!(self, Self::Storm)
    }

    /// The variant name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sunny => "Sunny",
            Self::Rainy => "Rainy",
            Self::Snowy => "Snowy",
            Self::Storm => "Storm",
        }
    }
}

impl core::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for WeatherCondition {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|w| w.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError::new("weather condition", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supply_unit_sizes() {
        assert_eq!(SupplyType::Water.unit_weight(), 1.0);
        assert_eq!(SupplyType::Food.unit_volume(), 1.2);
        assert_eq!(SupplyType::Medicine.unit_weight(), 0.5);
    }

    #[test]
    fn names_round_trip_case_insensitively() {
        assert_eq!("medicine".parse::<SupplyType>(), Ok(SupplyType::Medicine));
        assert_eq!("AIR".parse::<Transportation>(), Ok(Transportation::Air));
        assert_eq!("Snowy".parse::<WeatherCondition>(), Ok(WeatherCondition::Snowy));
        for weather in WeatherCondition::ALL {
            assert_eq!(weather.to_string().parse::<WeatherCondition>(), Ok(weather));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "Fuel".parse::<SupplyType>();
        assert_eq!(
            err,
            Err(ParseEnumError {
                kind: "supply type",
                value: "Fuel".to_owned(),
            })
        );
    }

    #[test]
    fn storm_blocks_and_stops() {
        assert!(WeatherCondition::Storm.is_impassable());
        assert_eq!(WeatherCondition::Storm.distance_multiplier(), None);
        assert_eq!(WeatherCondition::Storm.velocity_factor(), 0.0);
    }

    #[test]
    fn snow_costs_more_than_rain() {
        let rain = WeatherCondition::Rainy.distance_multiplier().unwrap_or_default();
        let snow = WeatherCondition::Snowy.distance_multiplier().unwrap_or_default();
        assert!(snow > rain);
        assert!(rain > 1.0);
    }

    #[test]
    fn enums_serialize_by_variant_name() {
        let json = serde_json::to_string(&SupplyType::Food).unwrap_or_default();
        assert_eq!(json, "\"Food\"");
    }
}
