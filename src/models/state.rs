//! Building state: a derived layout paired with the annotations valid against it.

use crate::models::{
    AnnotationKind, AnnotationMap, BuildingLayout, Floor, Room, RoomAddress, UnitSpec,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// The unit of update exposed to callers.
///
/// A layout and both annotation maps are always replaced together, so a
/// state never pairs a layout with annotations from a different layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingState {
    /// Derived layout
    #[serde(flatten)]
    pub layout: BuildingLayout,
    /// Merged rooms keyed by room address
    #[serde(default)]
    pub merged_rooms: AnnotationMap,
    /// Duplex rooms keyed by room address
    #[serde(default)]
    pub elevated_rooms: AnnotationMap,
}

impl BuildingState {
    /// Creates a state for a fresh layout without annotations.
    pub fn new(building_name: impl Into<String>, units: &[UnitSpec]) -> Result<Self> {
        Ok(Self::from_layout(BuildingLayout::derive(building_name, units)?))
    }

    /// Wraps a layout without annotations.
    #[must_use]
    pub fn from_layout(layout: BuildingLayout) -> Self {
        Self {
            layout,
            merged_rooms: AnnotationMap::new(),
            elevated_rooms: AnnotationMap::new(),
        }
    }

    /// Returns the annotation map of the given kind.
    #[must_use]
    pub const fn annotations(&self, kind: AnnotationKind) -> &AnnotationMap {
        match kind {
            AnnotationKind::Merged => &self.merged_rooms,
            AnnotationKind::Elevated => &self.elevated_rooms,
        }
    }

    /// Returns the annotation map of the given kind, mutably.
    pub fn annotations_mut(&mut self, kind: AnnotationKind) -> &mut AnnotationMap {
        match kind {
            AnnotationKind::Merged => &mut self.merged_rooms,
            AnnotationKind::Elevated => &mut self.elevated_rooms,
        }
    }

    /// The caller-supplied unit specs this state was derived from.
    #[must_use]
    pub fn unit_specs(&self) -> Vec<UnitSpec> {
        self.layout.units.iter().map(|u| u.spec.clone()).collect()
    }

    /// Resolves the room at `address` with its annotation flags.
    ///
    /// Returns `None` if the layout has no such room.
    #[must_use]
    pub fn room(&self, address: RoomAddress) -> Option<Room> {
        if !self.layout.contains(address) {
            return None;
        }

        let partners = |kind: AnnotationKind| -> Vec<RoomAddress> {
            self.annotations(kind)
                .get(&address)
                .map(|a| a.partners.iter().copied().collect())
                .unwrap_or_default()
        };

        Some(Room {
            address,
            is_merged: self.merged_rooms.contains_key(&address),
            merged_with: partners(AnnotationKind::Merged),
            is_elevated: self.elevated_rooms.contains_key(&address),
            elevated_with: partners(AnnotationKind::Elevated),
        })
    }

    /// Lists the floors of a unit from the top floor down, as the editor grid shows them.
    ///
    /// Returns `None` if the unit does not exist.
    #[must_use]
    pub fn floors(&self, unit_no: u32) -> Option<Vec<Floor>> {
        let unit = self.layout.unit(unit_no)?;

        let floors = (1..=unit.total_floors())
            .rev()
            .map(|floor_no| Floor {
                floor_no,
                rooms: unit
                    .rooms
                    .iter()
                    .filter_map(|room_no| self.room(RoomAddress::new(floor_no, unit_no, *room_no)))
                    .collect(),
            })
            .collect();

        Some(floors)
    }
}
