//! Strongly typed, zero-cost identifier wrappers.
//!
//! Both IDs wrap the 64-bit identifiers assigned by OpenStreetMap.  They are
//! `Copy + Ord + Hash` so they can be used as map keys without ceremony.
//! Values are externally assigned; nothing here allocates or validates them.

use std::fmt;

/// Generate a typed ID wrapper around an OSM integer identifier.
macro_rules! osm_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) => $prefix:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(raw: $inner) -> $name {
                $name(raw)
            }
        }

        impl From<$name> for $inner {
            #[inline(always)]
            fn from(id: $name) -> $inner {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;
            fn from_str(s: &str) -> Result<$name, Self::Err> {
                s.trim().parse::<$inner>().map($name)
            }
        }
    };
}

osm_id! {
    /// OpenStreetMap node identifier.  Unique within one route.
    pub struct NodeId(u64) => "n";
}

osm_id! {
    /// OpenStreetMap way identifier (road segment, bridge, tunnel).
    pub struct WayId(u64) => "w";
}
