//! Integration tests for layout derivation

use building_layout::models::{
    derive_layout, FloorSpan, FloorTier, RoomCountInput, UnitSpec, DEFAULT_ROOM_COUNT,
};

mod fixtures;
use fixtures::*;

#[test]
fn test_single_unit_thirteen_floors() {
    let layout = derive_layout("Tower", &[UnitSpec::new(1, 2, 2, 13)]).unwrap();

    assert_eq!(layout.max_floor, 13);
    assert_eq!(layout.floor_range.low, FloorSpan::new(1, 4));
    assert_eq!(layout.floor_range.middle, FloorSpan::new(5, 8));
    assert_eq!(layout.floor_range.high, FloorSpan::new(9, 13));
}

#[test]
fn test_tiers_partition_for_varied_unit_lists() {
    for top in 1..=60 {
        let units = vec![
            UnitSpec::new(1, 1, 2, top),
            UnitSpec::new(2, 1, 3, (top / 2).max(1)),
        ];
        let layout = derive_layout("Tower", &units).unwrap();
        assert_eq!(layout.max_floor, top);

        let mut covered = Vec::new();
        for tier in FloorTier::ALL {
            covered.extend(layout.floor_range.span(tier).floors());
        }
        let expected: Vec<u32> = (1..=top).collect();
        assert_eq!(covered, expected, "tiers for max_floor {top}");
    }
}

#[test]
fn test_derive_twice_is_equal() {
    let first = derive_layout("Tower", &test_units_sample()).unwrap();
    let second = derive_layout("Tower", &test_units_sample()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_room_count_normalization_in_layout() {
    let units = vec![
        UnitSpec::new(1, 2, 0, 9).with_room_input("abc"),
        UnitSpec::new(2, 2, 0, 7).with_room_input("3"),
    ];
    let layout = derive_layout("Tower", &units).unwrap();

    assert_eq!(layout.units[0].room_count, DEFAULT_ROOM_COUNT);
    assert_eq!(layout.units[0].rooms, vec![1, 2, 3, 4]);
    assert_eq!(layout.units[1].room_count, 3);
    // Entered value passes through untouched
    assert_eq!(
        layout.units[0].spec.rooms_per_elevator,
        RoomCountInput::from("abc")
    );
}

#[test]
fn test_sample_building_units() {
    let layout = derive_layout("Tower", &test_units_sample()).unwrap();
    assert_eq!(layout.max_floor, 13);
    assert_eq!(layout.floor_range.high, FloorSpan::new(9, 13));

    let unit2 = layout.unit(2).unwrap();
    assert_eq!(unit2.total_floors(), 10);
    assert_eq!(unit2.rooms, vec![1, 2, 3]);
    assert!(layout.unit(5).is_none());
}

#[test]
fn test_empty_unit_list_is_rejected() {
    assert!(derive_layout("Tower", &[]).is_err());
}

#[test]
fn test_derive_very_tall_unit() {
    let layout = derive_layout("Spire", &[UnitSpec::new(1, 1, 1, 3_000_000_000)]).unwrap();

    assert_eq!(layout.max_floor, 3_000_000_000);
    assert_eq!(layout.floor_range.low, FloorSpan::new(1, 1_000_000_000));
    assert_eq!(
        layout.floor_range.middle,
        FloorSpan::new(1_000_000_001, 2_000_000_000)
    );
    assert_eq!(
        layout.floor_range.high,
        FloorSpan::new(2_000_000_001, 3_000_000_000)
    );
    assert_eq!(layout.tier_of(u32::MAX), None);
}
