//! Annotation reconciliation.
//!
//! When the unit list changes shape, previously recorded merges and duplexes
//! are checked against the new room address space. Entries whose room still
//! exists are copied forward unchanged; all others are dropped.
//!
//! Only the keyed room is checked. Partner addresses inside a surviving
//! payload are left as they are; [`dangling_partners`] reports them.

use crate::models::{
    AnnotationKind, AnnotationMap, BuildingLayout, BuildingState, RoomAddress, UnitSpec,
};
use anyhow::Result;
use std::fmt;
use tracing::{debug, info};

/// Why an annotation no longer fits a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// No unit with the address's unit number
    MissingUnit,
    /// Floor is 0 or above the unit's top floor
    FloorOutOfRange {
        /// Floors in the unit
        total_floors: u32,
    },
    /// Room number is 0 or above the unit's room count
    RoomOutOfRange {
        /// Rooms per floor in the unit
        room_count: u32,
    },
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingUnit => write!(f, "unit no longer exists"),
            Self::FloorOutOfRange { total_floors } => {
                write!(f, "floor outside unit (1-{total_floors})")
            }
            Self::RoomOutOfRange { room_count } => {
                write!(f, "room outside unit (1-{room_count})")
            }
        }
    }
}

/// An annotation that did not survive reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedAnnotation {
    /// Map the entry was in
    pub kind: AnnotationKind,
    /// Keyed room of the entry
    pub address: RoomAddress,
    /// Why it was dropped
    pub reason: DropReason,
}

/// A surviving annotation that names a partner room missing from the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingPartner {
    /// Map the entry is in
    pub kind: AnnotationKind,
    /// Keyed room of the entry
    pub address: RoomAddress,
    /// Partner that no longer exists
    pub partner: RoomAddress,
}

/// Result of applying a new unit list to a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    /// New layout with the surviving annotations
    pub state: BuildingState,
    /// Entries that were dropped, in map order (merged first)
    pub dropped: Vec<DroppedAnnotation>,
}

/// Checks whether `address` names a room of `layout`.
///
/// Returns `None` if the room exists, or the reason it does not.
#[must_use]
pub fn check_address(layout: &BuildingLayout, address: RoomAddress) -> Option<DropReason> {
    let Some(unit) = layout.unit(address.unit_no) else {
        return Some(DropReason::MissingUnit);
    };

    if address.floor == 0 || address.floor > unit.total_floors() {
        return Some(DropReason::FloorOutOfRange {
            total_floors: unit.total_floors(),
        });
    }

    if address.room_no == 0 || address.room_no > unit.room_count {
        return Some(DropReason::RoomOutOfRange {
            room_count: unit.room_count,
        });
    }

    None
}

/// Splits `map` into the entries valid under `layout` and the dropped ones.
///
/// The returned map is always a key-subset of `map`; surviving payloads are
/// copied unchanged.
#[must_use]
pub fn prune_annotations(
    kind: AnnotationKind,
    map: &AnnotationMap,
    layout: &BuildingLayout,
) -> (AnnotationMap, Vec<DroppedAnnotation>) {
    let mut kept = AnnotationMap::new();
    let mut dropped = Vec::new();

    for (address, annotation) in map {
        match check_address(layout, *address) {
            None => {
                kept.insert(*address, annotation.clone());
            }
            Some(reason) => {
                debug!(%address, %kind, %reason, "dropping annotation");
                dropped.push(DroppedAnnotation {
                    kind,
                    address: *address,
                    reason,
                });
            }
        }
    }

    (kept, dropped)
}

/// Derives the layout for `units` and carries over the annotations of
/// `previous` that still fit it.
///
/// Nothing is modified; the caller swaps the returned state in as a whole.
///
/// # Errors
///
/// Fails if the new unit list cannot be derived (empty, duplicate unit numbers).
///
/// # Examples
///
/// ```
/// use building_layout::models::{BuildingState, RoomAddress, RoomAnnotation, UnitSpec};
/// use building_layout::services::reconcile::reconcile;
///
/// let mut state = BuildingState::new("Tower", &[UnitSpec::new(1, 2, 2, 13)]).unwrap();
/// state.merged_rooms.insert(RoomAddress::new(5, 1, 2), RoomAnnotation::default());
///
/// let result = reconcile(&state, "Tower", &[UnitSpec::new(1, 2, 2, 4)]).unwrap();
/// assert!(result.state.merged_rooms.is_empty());
/// assert_eq!(result.dropped.len(), 1);
/// ```
pub fn reconcile(
    previous: &BuildingState,
    building_name: impl Into<String>,
    units: &[UnitSpec],
) -> Result<Reconciled> {
    let layout = BuildingLayout::derive(building_name, units)?;

    let (merged_rooms, mut dropped) =
        prune_annotations(AnnotationKind::Merged, &previous.merged_rooms, &layout);
    let (elevated_rooms, dropped_elevated) =
        prune_annotations(AnnotationKind::Elevated, &previous.elevated_rooms, &layout);
    dropped.extend(dropped_elevated);

    info!(
        units = layout.units.len(),
        max_floor = layout.max_floor,
        kept = merged_rooms.len() + elevated_rooms.len(),
        dropped = dropped.len(),
        "reconciled building layout"
    );

    Ok(Reconciled {
        state: BuildingState {
            layout,
            merged_rooms,
            elevated_rooms,
        },
        dropped,
    })
}

/// Rebuilds `state` on a layout derived afresh from its own unit specs.
///
/// Annotations are carried over untouched. Comparing the result with the
/// stored layout reveals snapshots whose derived fields were edited by hand.
///
/// # Errors
///
/// Fails if the stored unit list cannot be derived (empty, duplicate unit numbers).
pub fn rederive(state: &BuildingState) -> Result<BuildingState> {
    let layout = BuildingLayout::derive(state.layout.building_name.clone(), &state.unit_specs())?;
    Ok(BuildingState {
        layout,
        merged_rooms: state.merged_rooms.clone(),
        elevated_rooms: state.elevated_rooms.clone(),
    })
}

/// Lists annotations of `state` whose keyed room is not part of its own layout.
///
/// A state produced by [`reconcile`] never has any; snapshots edited by hand may.
#[must_use]
pub fn invalid_annotations(state: &BuildingState) -> Vec<DroppedAnnotation> {
    [AnnotationKind::Merged, AnnotationKind::Elevated]
        .into_iter()
        .flat_map(|kind| prune_annotations(kind, state.annotations(kind), &state.layout).1)
        .collect()
}

/// Lists partner references that point at rooms missing from the layout.
#[must_use]
pub fn dangling_partners(state: &BuildingState) -> Vec<DanglingPartner> {
    let mut dangling = Vec::new();

    for kind in [AnnotationKind::Merged, AnnotationKind::Elevated] {
        for (address, annotation) in state.annotations(kind) {
            for partner in &annotation.partners {
                if check_address(&state.layout, *partner).is_some() {
                    dangling.push(DanglingPartner {
                        kind,
                        address: *address,
                        partner: *partner,
                    });
                }
            }
        }
    }

    dangling
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoomAnnotation;

    fn units() -> Vec<UnitSpec> {
        vec![UnitSpec::new(1, 2, 2, 13), UnitSpec::new(2, 2, 5, 10)]
    }

    fn annotated_state() -> BuildingState {
        let mut state = BuildingState::new("Tower", &units()).unwrap();
        state.merged_rooms.insert(
            RoomAddress::new(5, 1, 2),
            RoomAnnotation::with_partners([RoomAddress::new(5, 1, 1)]),
        );
        state.merged_rooms.insert(
            RoomAddress::new(3, 2, 5),
            RoomAnnotation::with_partners([RoomAddress::new(3, 2, 4)]),
        );
        state.elevated_rooms.insert(
            RoomAddress::new(9, 2, 1),
            RoomAnnotation::with_partners([RoomAddress::new(10, 2, 1)]),
        );
        state
    }

    #[test]
    fn test_check_address() {
        let layout = BuildingLayout::derive("Tower", &units()).unwrap();
        assert_eq!(check_address(&layout, RoomAddress::new(13, 1, 2)), None);
        assert_eq!(
            check_address(&layout, RoomAddress::new(1, 3, 1)),
            Some(DropReason::MissingUnit)
        );
        assert_eq!(
            check_address(&layout, RoomAddress::new(11, 2, 1)),
            Some(DropReason::FloorOutOfRange { total_floors: 10 })
        );
        assert_eq!(
            check_address(&layout, RoomAddress::new(0, 2, 1)),
            Some(DropReason::FloorOutOfRange { total_floors: 10 })
        );
        assert_eq!(
            check_address(&layout, RoomAddress::new(1, 1, 3)),
            Some(DropReason::RoomOutOfRange { room_count: 2 })
        );
    }

    #[test]
    fn test_reconcile_drops_floor_out_of_range() {
        let state = annotated_state();
        let new_units = vec![UnitSpec::new(1, 2, 2, 4), UnitSpec::new(2, 2, 5, 10)];

        let result = reconcile(&state, "Tower", &new_units).unwrap();
        assert!(!result.state.merged_rooms.contains_key(&RoomAddress::new(5, 1, 2)));
        assert!(result.state.merged_rooms.contains_key(&RoomAddress::new(3, 2, 5)));
        assert_eq!(
            result.dropped,
            vec![DroppedAnnotation {
                kind: AnnotationKind::Merged,
                address: RoomAddress::new(5, 1, 2),
                reason: DropReason::FloorOutOfRange { total_floors: 4 },
            }]
        );
        assert_eq!(result.state.layout.max_floor, 10);
    }

    #[test]
    fn test_reconcile_keeps_payload_unchanged() {
        let state = annotated_state();
        let new_units = vec![UnitSpec::new(1, 3, 3, 20), UnitSpec::new(2, 2, 5, 10)];

        let result = reconcile(&state, "Tower", &new_units).unwrap();
        assert!(result.dropped.is_empty());
        assert_eq!(result.state.merged_rooms, state.merged_rooms);
        assert_eq!(result.state.elevated_rooms, state.elevated_rooms);
    }

    #[test]
    fn test_reconcile_uses_normalized_room_count() {
        let state = annotated_state();
        // "abc" normalizes to 4 rooms, so room 5 of unit 2 disappears
        let new_units = vec![
            UnitSpec::new(1, 2, 2, 13),
            UnitSpec::new(2, 2, 5, 10).with_room_input("abc"),
        ];

        let result = reconcile(&state, "Tower", &new_units).unwrap();
        assert!(!result.state.merged_rooms.contains_key(&RoomAddress::new(3, 2, 5)));
        assert_eq!(
            result.dropped[0].reason,
            DropReason::RoomOutOfRange { room_count: 4 }
        );
    }

    #[test]
    fn test_reconcile_removed_unit() {
        let state = annotated_state();
        let result = reconcile(&state, "Tower", &[UnitSpec::new(1, 2, 2, 13)]).unwrap();
        assert!(result.state.elevated_rooms.is_empty());
        assert!(result
            .dropped
            .iter()
            .all(|d| d.address.unit_no == 2 && d.reason == DropReason::MissingUnit));
        assert_eq!(result.dropped.len(), 2);
    }

    #[test]
    fn test_reconcile_is_subset() {
        let state = annotated_state();
        let new_units = vec![UnitSpec::new(1, 1, 1, 3), UnitSpec::new(2, 1, 4, 9)];
        let result = reconcile(&state, "Tower", &new_units).unwrap();

        assert!(result
            .state
            .merged_rooms
            .keys()
            .all(|k| state.merged_rooms.contains_key(k)));
        assert!(result
            .state
            .elevated_rooms
            .keys()
            .all(|k| state.elevated_rooms.contains_key(k)));
        let before = state.merged_rooms.len() + state.elevated_rooms.len();
        let after = result.state.merged_rooms.len() + result.state.elevated_rooms.len();
        assert_eq!(before, after + result.dropped.len());
    }

    #[test]
    fn test_reconcile_empty_units_fails() {
        assert!(reconcile(&annotated_state(), "Tower", &[]).is_err());
    }

    #[test]
    fn test_partner_not_cascaded() {
        let state = annotated_state();
        // Unit 2 keeps room 1 on floor 9 but loses floor 10
        let new_units = vec![UnitSpec::new(1, 2, 2, 13), UnitSpec::new(2, 2, 5, 9)];
        let result = reconcile(&state, "Tower", &new_units).unwrap();

        let survivor = &result.state.elevated_rooms[&RoomAddress::new(9, 2, 1)];
        assert!(survivor.partners.contains(&RoomAddress::new(10, 2, 1)));

        let dangling = dangling_partners(&result.state);
        assert_eq!(
            dangling,
            vec![DanglingPartner {
                kind: AnnotationKind::Elevated,
                address: RoomAddress::new(9, 2, 1),
                partner: RoomAddress::new(10, 2, 1),
            }]
        );
    }

    #[test]
    fn test_invalid_annotations() {
        let mut state = annotated_state();
        assert!(invalid_annotations(&state).is_empty());

        state
            .elevated_rooms
            .insert(RoomAddress::new(40, 1, 1), RoomAnnotation::default());
        let invalid = invalid_annotations(&state);
        assert_eq!(invalid.len(), 1);
        assert_eq!(invalid[0].kind, AnnotationKind::Elevated);
    }

    #[test]
    fn test_rederive_restores_edited_room_count() {
        let mut state = annotated_state();
        assert_eq!(rederive(&state).unwrap(), state);

        // Widen unit 1 by hand without touching its spec
        state.layout.units[0].room_count = 9;
        state.layout.units[0].rooms = (1..=9).collect();
        state.merged_rooms.insert(
            RoomAddress::new(1, 1, 8),
            RoomAnnotation::with_partners([RoomAddress::new(1, 1, 7)]),
        );
        assert!(invalid_annotations(&state).is_empty());

        let derived = rederive(&state).unwrap();
        assert_ne!(derived.layout, state.layout);
        assert_eq!(derived.layout.units[0].room_count, 2);
        assert_eq!(derived.merged_rooms, state.merged_rooms);

        let invalid = invalid_annotations(&derived);
        assert_eq!(invalid.len(), 1);
        assert_eq!(invalid[0].address, RoomAddress::new(1, 1, 8));
        assert_eq!(invalid[0].reason, DropReason::RoomOutOfRange { room_count: 2 });
    }

    #[test]
    fn test_rederive_rejects_duplicate_units() {
        let mut state = annotated_state();
        state.layout.units[1].spec.unit_no = 1;
        assert!(rederive(&state).is_err());
    }
}
