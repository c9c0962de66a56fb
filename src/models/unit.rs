//! Unit configuration as entered by the user.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Room count used when the entered value cannot be read as a positive integer.
pub const DEFAULT_ROOM_COUNT: u32 = 4;

/// Raw "rooms per elevator" input.
///
/// The editor form hands values over either as numbers or as free text,
/// so both shapes are accepted and normalized with [`RoomCountInput::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoomCountInput {
    /// Value already entered as a number
    Number(i64),
    /// Value entered as text (e.g., "3", "abc")
    Text(String),
}

impl RoomCountInput {
    /// Normalizes the input to a room count of at least one.
    ///
    /// Text is read by its leading integer: whitespace is skipped, an optional
    /// sign is accepted and digits are consumed until the first non-digit.
    /// Anything that yields no number, zero or a negative value falls back to
    /// [`DEFAULT_ROOM_COUNT`].
    ///
    /// # Examples
    ///
    /// ```
    /// use building_layout::models::RoomCountInput;
    ///
    /// assert_eq!(RoomCountInput::from("3").normalize(), 3);
    /// assert_eq!(RoomCountInput::from("3.7").normalize(), 3);
    /// assert_eq!(RoomCountInput::from("abc").normalize(), 4);
    /// assert_eq!(RoomCountInput::Number(0).normalize(), 4);
    /// ```
    #[must_use]
    pub fn normalize(&self) -> u32 {
        let parsed = match self {
            Self::Number(n) => Some(*n),
            Self::Text(text) => parse_leading_int(text),
        };

        parsed
            .filter(|n| *n > 0)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(DEFAULT_ROOM_COUNT)
    }
}

impl From<u32> for RoomCountInput {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<&str> for RoomCountInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RoomCountInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for RoomCountInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

/// Reads the integer prefix of `text`, ignoring whatever follows it.
fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    // Overlong digit runs saturate; they are out of range for a room count either way
    let value = rest[..digits_end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// A vertical section of the building served by its own elevator bank.
///
/// # Validation
///
/// - `unit_no` must be unique within a building
/// - `total_floors` is expected to be at least 1
/// - `rooms_per_elevator` may be any input; it is normalized when the layout is derived
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSpec {
    /// Unit number (e.g., 1 for "Unit 1")
    pub unit_no: u32,
    /// Number of elevators serving this unit
    #[serde(alias = "elevators")]
    pub elevator_count: u32,
    /// Rooms on each floor of this unit, as entered
    #[serde(alias = "room_count")]
    pub rooms_per_elevator: RoomCountInput,
    /// Number of floors in this unit
    pub total_floors: u32,
}

impl UnitSpec {
    /// Creates a new unit spec with a numeric room count.
    #[must_use]
    pub fn new(unit_no: u32, elevator_count: u32, rooms_per_elevator: u32, total_floors: u32) -> Self {
        Self {
            unit_no,
            elevator_count,
            rooms_per_elevator: RoomCountInput::from(rooms_per_elevator),
            total_floors,
        }
    }

    /// Replaces the room count input (builder style).
    pub fn with_room_input(mut self, input: impl Into<RoomCountInput>) -> Self {
        self.rooms_per_elevator = input.into();
        self
    }

    /// Returns the normalized number of rooms per floor.
    #[must_use]
    pub fn room_count(&self) -> u32 {
        self.rooms_per_elevator.normalize()
    }
}

/// Rewrites every unit's room count input to its normalized numeric value.
///
/// Applied before a unit list is stored so later reads see plain integers.
#[must_use]
pub fn normalize_units(units: &[UnitSpec]) -> Vec<UnitSpec> {
    units
        .iter()
        .map(|unit| UnitSpec {
            rooms_per_elevator: RoomCountInput::from(unit.room_count()),
            ..unit.clone()
        })
        .collect()
}
