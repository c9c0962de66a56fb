//! Shared test fixtures for integration and E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use building_layout::models::{BuildingState, RoomAddress, RoomAnnotation, UnitSpec};
use building_layout::parser::building_file::{building_to_string, BuildingFile, FileFormat};
use building_layout::parser::save_state;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The four-unit sample building: two 13-floor units with 2 rooms per floor
/// alternating with two 10-floor units with 3 rooms per floor.
pub fn test_units_sample() -> Vec<UnitSpec> {
    vec![
        UnitSpec::new(1, 2, 2, 13),
        UnitSpec::new(2, 2, 3, 10),
        UnitSpec::new(3, 2, 2, 13),
        UnitSpec::new(4, 2, 3, 10),
    ]
}

/// Two units with enough rooms to hold annotations at `5-1-2` and `3-2-5`.
pub fn test_units_annotated() -> Vec<UnitSpec> {
    vec![UnitSpec::new(1, 2, 2, 13), UnitSpec::new(2, 2, 5, 10)]
}

/// State over [`test_units_annotated`] with one merge per unit and one duplex.
///
/// - merged: `5-1-1` ↔ `5-1-2`, `3-2-4` ↔ `3-2-5`
/// - elevated: `9-2-1` ↔ `10-2-1`
pub fn test_state_annotated() -> BuildingState {
    let mut state =
        BuildingState::new("Test Tower", &test_units_annotated()).expect("valid units");

    link(&mut state, true, RoomAddress::new(5, 1, 1), RoomAddress::new(5, 1, 2));
    link(&mut state, true, RoomAddress::new(3, 2, 4), RoomAddress::new(3, 2, 5));
    link(&mut state, false, RoomAddress::new(9, 2, 1), RoomAddress::new(10, 2, 1));

    state
}

fn link(state: &mut BuildingState, merged: bool, a: RoomAddress, b: RoomAddress) {
    let map = if merged {
        &mut state.merged_rooms
    } else {
        &mut state.elevated_rooms
    };
    map.insert(a, RoomAnnotation::with_partners([b]));
    map.insert(b, RoomAnnotation::with_partners([a]));
}

/// Writes a building file in the format implied by `path`.
pub fn write_building_file(name: Option<&str>, units: &[UnitSpec], path: &Path) {
    let file = BuildingFile {
        building_name: name.map(str::to_string),
        units: units.to_vec(),
    };
    let content =
        building_to_string(&file, FileFormat::from_path(path)).expect("serialize building");
    fs::write(path, content).expect("Failed to write building file");
}

/// Creates a building TOML file in a temp directory and returns its path.
pub fn create_temp_building_file(name: Option<&str>, units: &[UnitSpec]) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("building.toml");
    write_building_file(name, units, &path);
    (path, temp_dir)
}

/// Writes a state snapshot into `dir` and returns its path.
pub fn write_state_file(state: &BuildingState, dir: &Path) -> PathBuf {
    let path = dir.join("state.json");
    save_state(state, &path, true).expect("Failed to write state file");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_state_is_valid() {
        let state = test_state_annotated();
        assert_eq!(state.merged_rooms.len(), 4);
        assert_eq!(state.elevated_rooms.len(), 2);
        assert!(state
            .merged_rooms
            .keys()
            .chain(state.elevated_rooms.keys())
            .all(|a| state.layout.contains(*a)));
    }
}
