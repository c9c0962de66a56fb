//! Room addressing and the per-room view of a building.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Separator between the components of a room address string.
pub const ADDRESS_SEPARATOR: char = '-';

/// Identifies a room within a building snapshot.
///
/// Ordering is component-wise: floor first, then unit, then room. The
/// external string form is `"floor-unit-room"` (e.g., `"5-1-2"`), which is
/// also how addresses appear as JSON map keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoomAddress {
    /// Floor number (1-based)
    pub floor: u32,
    /// Unit number
    pub unit_no: u32,
    /// Room number within the floor of that unit (1-based)
    pub room_no: u32,
}

impl RoomAddress {
    /// Creates a new address.
    #[must_use]
    pub const fn new(floor: u32, unit_no: u32, room_no: u32) -> Self {
        Self {
            floor,
            unit_no,
            room_no,
        }
    }
}

impl fmt::Display for RoomAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.floor,
            self.unit_no,
            self.room_no,
            sep = ADDRESS_SEPARATOR
        )
    }
}

impl FromStr for RoomAddress {
    type Err = anyhow::Error;

    /// Parses `"floor-unit-room"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use building_layout::models::RoomAddress;
    ///
    /// let address: RoomAddress = "10-2-3".parse().unwrap();
    /// assert_eq!(address, RoomAddress::new(10, 2, 3));
    /// assert!("10-2".parse::<RoomAddress>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(ADDRESS_SEPARATOR).collect();
        let &[floor, unit_no, room_no] = parts.as_slice() else {
            anyhow::bail!(
                "Room address '{s}' must have three parts (floor{sep}unit{sep}room)",
                sep = ADDRESS_SEPARATOR
            );
        };

        let parse = |part: &str, what: &str| -> anyhow::Result<u32> {
            part.trim()
                .parse::<u32>()
                .map_err(|e| anyhow::anyhow!("Invalid {what} '{part}' in room address '{s}': {e}"))
        };

        Ok(Self {
            floor: parse(floor, "floor")?,
            unit_no: parse(unit_no, "unit number")?,
            room_no: parse(room_no, "room number")?,
        })
    }
}

impl Serialize for RoomAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RoomAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A room as presented to the editor, with its annotation flags resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    /// Address of this room
    pub address: RoomAddress,
    /// Whether this room is part of a merge
    pub is_merged: bool,
    /// Rooms merged with this one
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub merged_with: Vec<RoomAddress>,
    /// Whether this room is part of a duplex
    pub is_elevated: bool,
    /// Rooms forming a duplex with this one
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub elevated_with: Vec<RoomAddress>,
}

/// One floor of one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Floor {
    /// Floor number (1-based)
    pub floor_no: u32,
    /// Rooms on this floor, ordered by room number
    pub rooms: Vec<Room>,
}
