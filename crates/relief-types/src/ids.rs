//! Type-safe identifier wrappers around `u32`.
//!
//! Graph nodes and vehicles both carry small integer ids in datasets. The
//! newtypes keep them from being mixed at compile time while serializing as
//! plain numbers.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around `u32` with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
            Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Create an identifier from its raw value.
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Return the inner `u32` value.
            pub const fn into_inner(self) -> u32 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl core::str::FromStr for $name {
            type Err = core::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Identifier of a node in the road graph.
    NodeId
}

define_id! {
    /// Identifier of a vehicle in the fleet.
    VehicleId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_as_raw_numbers() {
        assert_eq!(NodeId::new(7).to_string(), "7");
        assert_eq!(VehicleId::from(12).into_inner(), 12);
    }

    #[test]
    fn ids_parse_with_surrounding_whitespace() {
        let parsed: Result<NodeId, _> = " 42 ".parse();
        assert_eq!(parsed.ok(), Some(NodeId(42)));
        assert!("x".parse::<NodeId>().is_err());
    }

    #[test]
    fn ids_serialize_transparently() {
        let json = serde_json::to_string(&VehicleId(3)).unwrap_or_default();
        assert_eq!(json, "3");
    }
}
