//! Derived building layout: floor tiers and per-unit room lists.

use crate::models::{FloorRange, FloorTier, RoomAddress, UnitSpec};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A unit as it appears in the derived layout.
///
/// The entered spec is carried through unchanged; `room_count` is the
/// normalized value and `rooms` lists the room numbers `1..=room_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitLayout {
    /// Unit configuration as entered
    #[serde(flatten)]
    pub spec: UnitSpec,
    /// Normalized rooms per floor (at least 1)
    pub room_count: u32,
    /// Room numbers on every floor of this unit
    pub rooms: Vec<u32>,
}

impl UnitLayout {
    /// Builds the layout entry for one unit.
    #[must_use]
    pub fn from_spec(spec: &UnitSpec) -> Self {
        let room_count = spec.room_count();
        Self {
            spec: spec.clone(),
            room_count,
            rooms: (1..=room_count).collect(),
        }
    }

    /// Unit number.
    #[must_use]
    pub const fn unit_no(&self) -> u32 {
        self.spec.unit_no
    }

    /// Number of floors in this unit.
    #[must_use]
    pub const fn total_floors(&self) -> u32 {
        self.spec.total_floors
    }

    /// Returns true if the unit has a room at `floor`/`room_no`.
    #[must_use]
    pub const fn has_room(&self, floor: u32, room_no: u32) -> bool {
        floor >= 1 && floor <= self.spec.total_floors && room_no >= 1 && room_no <= self.room_count
    }
}

/// Complete derived structure of a building.
///
/// # Validation
///
/// - At least one unit
/// - Unit numbers unique
/// - Floor tiers partition `[1, max_floor]`
/// - Every unit has `room_count >= 1`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingLayout {
    /// Display name of the building
    pub building_name: String,
    /// Highest floor across all units
    pub max_floor: u32,
    /// Low/middle/high floor tiers
    pub floor_range: FloorRange,
    /// Units in input order
    pub units: Vec<UnitLayout>,
}

impl BuildingLayout {
    /// Derives the layout of a building from its unit specs.
    ///
    /// Pure and deterministic: the same input always yields an equal layout.
    ///
    /// # Errors
    ///
    /// Fails if `units` is empty or two units share a unit number.
    ///
    /// # Examples
    ///
    /// ```
    /// use building_layout::models::{BuildingLayout, FloorSpan, UnitSpec};
    ///
    /// let layout = BuildingLayout::derive("Tower A", &[UnitSpec::new(1, 2, 2, 13)]).unwrap();
    /// assert_eq!(layout.max_floor, 13);
    /// assert_eq!(layout.floor_range.low, FloorSpan::new(1, 4));
    /// assert_eq!(layout.units[0].rooms, vec![1, 2]);
    /// ```
    pub fn derive(building_name: impl Into<String>, units: &[UnitSpec]) -> Result<Self> {
        let Some(max_floor) = units.iter().map(|u| u.total_floors).max() else {
            anyhow::bail!("Building must have at least one unit");
        };

        let mut seen = HashSet::new();
        for unit in units {
            if !seen.insert(unit.unit_no) {
                anyhow::bail!("Unit number {} appears more than once", unit.unit_no);
            }
        }

        Ok(Self {
            building_name: building_name.into(),
            max_floor,
            floor_range: FloorRange::for_max_floor(max_floor),
            units: units.iter().map(UnitLayout::from_spec).collect(),
        })
    }

    /// Gets a unit by its number.
    #[must_use]
    pub fn unit(&self, unit_no: u32) -> Option<&UnitLayout> {
        self.units.iter().find(|u| u.unit_no() == unit_no)
    }

    /// Returns true if `address` names a room of this layout.
    #[must_use]
    pub fn contains(&self, address: RoomAddress) -> bool {
        self.unit(address.unit_no)
            .is_some_and(|unit| unit.has_room(address.floor, address.room_no))
    }

    /// Returns the tier containing `floor`.
    #[must_use]
    pub fn tier_of(&self, floor: u32) -> Option<FloorTier> {
        self.floor_range.tier_of(floor)
    }

    /// Total number of rooms across all units and floors.
    #[must_use]
    pub fn room_total(&self) -> u64 {
        self.units
            .iter()
            .map(|u| u64::from(u.total_floors()) * u64::from(u.room_count))
            .sum()
    }

    /// Iterates every room address, unit by unit, floor by floor.
    pub fn addresses(&self) -> impl Iterator<Item = RoomAddress> + '_ {
        self.units.iter().flat_map(|unit| {
            (1..=unit.total_floors()).flat_map(move |floor| {
                unit.rooms
                    .iter()
                    .map(move |room_no| RoomAddress::new(floor, unit.unit_no(), *room_no))
            })
        })
    }
}

/// Derives a building layout. Shorthand for [`BuildingLayout::derive`].
pub fn derive_layout(building_name: impl Into<String>, units: &[UnitSpec]) -> Result<BuildingLayout> {
    BuildingLayout::derive(building_name, units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FloorSpan;

    fn sample_units() -> Vec<UnitSpec> {
        vec![
            UnitSpec::new(1, 2, 2, 13),
            UnitSpec::new(2, 2, 3, 10),
            UnitSpec::new(3, 2, 2, 13),
            UnitSpec::new(4, 2, 3, 10),
        ]
    }

    #[test]
    fn test_derive_single_unit() {
        let layout = derive_layout("Tower", &[UnitSpec::new(1, 2, 2, 13)]).unwrap();
        assert_eq!(layout.building_name, "Tower");
        assert_eq!(layout.max_floor, 13);
        assert_eq!(layout.floor_range.low, FloorSpan::new(1, 4));
        assert_eq!(layout.floor_range.middle, FloorSpan::new(5, 8));
        assert_eq!(layout.floor_range.high, FloorSpan::new(9, 13));
        assert_eq!(layout.units[0].room_count, 2);
        assert_eq!(layout.units[0].rooms, vec![1, 2]);
    }

    #[test]
    fn test_derive_max_floor_across_units() {
        let layout = derive_layout("Tower", &sample_units()).unwrap();
        assert_eq!(layout.max_floor, 13);
        assert_eq!(layout.units.len(), 4);
        assert_eq!(layout.units[1].rooms, vec![1, 2, 3]);
        // Input order is kept
        let numbers: Vec<u32> = layout.units.iter().map(UnitLayout::unit_no).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_derive_keeps_spec_and_normalizes_rooms() {
        let unit = UnitSpec::new(1, 2, 0, 9).with_room_input("abc");
        let layout = derive_layout("Tower", &[unit.clone()]).unwrap();
        assert_eq!(layout.units[0].spec, unit);
        assert_eq!(layout.units[0].room_count, 4);
        assert_eq!(layout.units[0].rooms, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_derive_is_deterministic() {
        let first = derive_layout("Tower", &sample_units()).unwrap();
        let second = derive_layout("Tower", &sample_units()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_derive_rejects_empty() {
        let err = derive_layout("Tower", &[]).unwrap_err();
        assert!(err.to_string().contains("at least one unit"));
    }

    #[test]
    fn test_derive_rejects_duplicate_units() {
        let units = vec![UnitSpec::new(1, 2, 2, 5), UnitSpec::new(1, 1, 3, 6)];
        assert!(derive_layout("Tower", &units).is_err());
    }

    #[test]
    fn test_contains() {
        let layout = derive_layout("Tower", &sample_units()).unwrap();
        assert!(layout.contains(RoomAddress::new(13, 1, 2)));
        assert!(layout.contains(RoomAddress::new(10, 2, 3)));
        assert!(!layout.contains(RoomAddress::new(11, 2, 1)));
        assert!(!layout.contains(RoomAddress::new(1, 1, 3)));
        assert!(!layout.contains(RoomAddress::new(0, 1, 1)));
        assert!(!layout.contains(RoomAddress::new(1, 1, 0)));
        assert!(!layout.contains(RoomAddress::new(1, 9, 1)));
    }

    #[test]
    fn test_room_total_and_addresses() {
        let layout = derive_layout("Tower", &sample_units()).unwrap();
        // 13*2 + 10*3 + 13*2 + 10*3
        assert_eq!(layout.room_total(), 112);
        assert_eq!(layout.addresses().count(), 112);
        assert!(layout.addresses().all(|a| layout.contains(a)));
    }

    #[test]
    fn test_serialized_shape() {
        let layout = derive_layout("Tower", &[UnitSpec::new(1, 2, 2, 13)]).unwrap();
        let json = serde_json::to_value(&layout).unwrap();
        assert_eq!(json["max_floor"], 13);
        assert_eq!(json["floor_range"]["high"]["start"], 9);
        assert_eq!(json["units"][0]["unit_no"], 1);
        assert_eq!(json["units"][0]["room_count"], 2);
        assert_eq!(json["units"][0]["rooms"], serde_json::json!([1, 2]));
    }
}
