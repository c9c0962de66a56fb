//! Owned building state with a single transactional update path.
//!
//! Every mutation builds the complete next [`BuildingState`] first and only
//! then swaps it in. A failed mutation leaves the previous state in place, so
//! readers never observe a layout paired with stale annotations.

use crate::models::{
    normalize_units, AnnotationKind, AnnotationMap, BuildingState, RoomAddress, RoomAnnotation,
    UnitSpec,
};
use crate::services::reconcile::{self, check_address, DroppedAnnotation};
use anyhow::Result;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// Owner of a building's configuration and derived state.
///
/// # Examples
///
/// ```
/// use building_layout::models::{RoomAddress, UnitSpec};
/// use building_layout::services::BuildingStore;
///
/// let mut store = BuildingStore::new("Tower", vec![UnitSpec::new(1, 2, 2, 13)]).unwrap();
/// store
///     .merge_rooms(&[RoomAddress::new(5, 1, 1), RoomAddress::new(5, 1, 2)])
///     .unwrap();
///
/// let snapshot = store.set_units(vec![UnitSpec::new(1, 2, 2, 4)]).unwrap();
/// assert!(snapshot.merged_rooms.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BuildingStore {
    units: Vec<UnitSpec>,
    state: Arc<BuildingState>,
    last_dropped: Vec<DroppedAnnotation>,
}

impl BuildingStore {
    /// Creates a store from a building name and its units.
    ///
    /// # Errors
    ///
    /// Fails if the unit list is empty or has duplicate unit numbers.
    pub fn new(building_name: impl Into<String>, units: Vec<UnitSpec>) -> Result<Self> {
        let units = normalize_units(&units);
        let state = BuildingState::new(building_name, &units)?;
        Ok(Self {
            units,
            state: Arc::new(state),
            last_dropped: Vec::new(),
        })
    }

    /// Restores a store from a previously saved state.
    ///
    /// The state is re-reconciled against its own units, so annotations that
    /// do not fit its layout are dropped.
    pub fn from_state(state: BuildingState) -> Result<Self> {
        let units = normalize_units(&state.unit_specs());
        let result = reconcile::reconcile(&state, state.layout.building_name.clone(), &units)?;
        Ok(Self {
            units,
            state: Arc::new(result.state),
            last_dropped: result.dropped,
        })
    }

    /// Current immutable snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<BuildingState> {
        Arc::clone(&self.state)
    }

    /// Current unit list (room counts normalized).
    #[must_use]
    pub fn units(&self) -> &[UnitSpec] {
        &self.units
    }

    /// Annotations dropped by the most recent unit list replacement.
    #[must_use]
    pub fn last_dropped(&self) -> &[DroppedAnnotation] {
        &self.last_dropped
    }

    /// Computes the state that [`set_units`](Self::set_units) would install,
    /// without changing the store.
    pub fn commit(&self, units: &[UnitSpec]) -> Result<BuildingState> {
        let units = normalize_units(units);
        let result =
            reconcile::reconcile(&self.state, self.state.layout.building_name.clone(), &units)?;
        Ok(result.state)
    }

    /// Replaces the unit list, re-derives the layout and prunes annotations.
    ///
    /// # Errors
    ///
    /// Fails if the new unit list cannot be derived; the store is unchanged.
    pub fn set_units(&mut self, units: Vec<UnitSpec>) -> Result<Arc<BuildingState>> {
        let units = normalize_units(&units);
        let result =
            reconcile::reconcile(&self.state, self.state.layout.building_name.clone(), &units)?;

        self.units = units;
        self.state = Arc::new(result.state);
        self.last_dropped = result.dropped;
        Ok(self.snapshot())
    }

    /// Renames the building, keeping units and annotations.
    pub fn set_building_name(&mut self, building_name: impl Into<String>) -> Arc<BuildingState> {
        let mut next = (*self.state).clone();
        next.layout.building_name = building_name.into();
        self.state = Arc::new(next);
        self.snapshot()
    }

    /// Records that `rooms` are merged into one.
    ///
    /// Each room's entry gains every other room as a partner; existing
    /// partners are kept.
    ///
    /// # Errors
    ///
    /// Fails unless at least two distinct rooms are given and all exist.
    pub fn merge_rooms(&mut self, rooms: &[RoomAddress]) -> Result<Arc<BuildingState>> {
        let distinct: BTreeSet<RoomAddress> = rooms.iter().copied().collect();
        if distinct.len() < 2 {
            anyhow::bail!("Merging requires at least two distinct rooms");
        }
        self.ensure_rooms_exist(&distinct)?;

        let mut next = (*self.state).clone();
        link(&mut next.merged_rooms, &distinct);
        debug!(rooms = distinct.len(), "merged rooms");

        self.state = Arc::new(next);
        Ok(self.snapshot())
    }

    /// Records that `lower` and `upper` form a duplex.
    ///
    /// # Errors
    ///
    /// Both rooms must exist, belong to the same unit and room number, and
    /// sit on adjacent floors.
    pub fn elevate_rooms(
        &mut self,
        lower: RoomAddress,
        upper: RoomAddress,
    ) -> Result<Arc<BuildingState>> {
        if lower.unit_no != upper.unit_no || lower.room_no != upper.room_no {
            anyhow::bail!("Duplex rooms {lower} and {upper} must share unit and room number");
        }
        if lower.floor.abs_diff(upper.floor) != 1 {
            anyhow::bail!("Duplex rooms {lower} and {upper} must be on adjacent floors");
        }

        let pair: BTreeSet<RoomAddress> = [lower, upper].into_iter().collect();
        self.ensure_rooms_exist(&pair)?;

        let mut next = (*self.state).clone();
        link(&mut next.elevated_rooms, &pair);
        debug!(%lower, %upper, "elevated rooms");

        self.state = Arc::new(next);
        Ok(self.snapshot())
    }

    /// Removes the annotation of `kind` at `address`, and that address from
    /// its partners' entries. Partners left without any partner are removed too.
    ///
    /// Leaves the state unchanged if there was no such entry.
    pub fn clear(&mut self, kind: AnnotationKind, address: RoomAddress) -> Arc<BuildingState> {
        if !self.state.annotations(kind).contains_key(&address) {
            return self.snapshot();
        }

        let mut next = (*self.state).clone();
        let map = next.annotations_mut(kind);
        if let Some(removed) = map.remove(&address) {
            for partner in removed.partners {
                let emptied = map.get_mut(&partner).is_some_and(|entry| {
                    entry.partners.remove(&address);
                    entry.partners.is_empty()
                });
                if emptied {
                    map.remove(&partner);
                }
            }
        }
        debug!(%address, %kind, "cleared annotation");

        self.state = Arc::new(next);
        self.snapshot()
    }

    fn ensure_rooms_exist(&self, rooms: &BTreeSet<RoomAddress>) -> Result<()> {
        for room in rooms {
            if let Some(reason) = check_address(&self.state.layout, *room) {
                anyhow::bail!("Room {room} is not part of the building: {reason}");
            }
        }
        Ok(())
    }
}

/// Makes every room in `rooms` a partner of every other one.
fn link(map: &mut AnnotationMap, rooms: &BTreeSet<RoomAddress>) {
    for room in rooms {
        let entry = map.entry(*room).or_insert_with(RoomAnnotation::default);
        entry
            .partners
            .extend(rooms.iter().copied().filter(|other| other != room));
    }
}
