//! Floor tiers (low/middle/high) of a building.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three floor groups used for grouping and pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloorTier {
    /// Bottom third of the building
    Low,
    /// Middle third of the building
    Middle,
    /// Top third of the building, including any remainder floors
    High,
}

impl FloorTier {
    /// All tiers, bottom to top.
    pub const ALL: [Self; 3] = [Self::Low, Self::Middle, Self::High];

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Middle => "Middle",
            Self::High => "High",
        }
    }
}

impl fmt::Display for FloorTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Inclusive floor interval. Empty when `start > end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FloorSpan {
    /// First floor of the span
    pub start: u32,
    /// Last floor of the span
    pub end: u32,
}

impl FloorSpan {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Returns true if the span holds no floors.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Number of floors in the span.
    #[must_use]
    pub const fn len(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            self.end - self.start + 1
        }
    }

    /// Returns true if `floor` lies within the span.
    #[must_use]
    pub const fn contains(&self, floor: u32) -> bool {
        self.start <= floor && floor <= self.end
    }

    /// Iterates the floors of the span in ascending order.
    pub fn floors(&self) -> impl Iterator<Item = u32> {
        self.start..=self.end
    }
}

/// The three tiers partitioning `[1, max_floor]`.
///
/// Boundaries use integer division: low ends at `max_floor / 3`, middle at
/// `2 * max_floor / 3`, and high takes everything above. Remainder floors
/// therefore always land in the high tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorRange {
    /// Low tier
    pub low: FloorSpan,
    /// Middle tier
    pub middle: FloorSpan,
    /// High tier
    pub high: FloorSpan,
}

impl FloorRange {
    /// Splits `[1, max_floor]` into thirds.
    ///
    /// # Examples
    ///
    /// ```
    /// use building_layout::models::{FloorRange, FloorSpan};
    ///
    /// let range = FloorRange::for_max_floor(13);
    /// assert_eq!(range.low, FloorSpan::new(1, 4));
    /// assert_eq!(range.middle, FloorSpan::new(5, 8));
    /// assert_eq!(range.high, FloorSpan::new(9, 13));
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_lossless)] // 2m/3 never exceeds m
    pub const fn for_max_floor(max_floor: u32) -> Self {
        let one_third = max_floor / 3;
        let two_thirds = (max_floor as u64 * 2 / 3) as u32;

        Self {
            low: FloorSpan::new(1, one_third),
            middle: FloorSpan::new(one_third + 1, two_thirds),
            high: FloorSpan::new(two_thirds + 1, max_floor),
        }
    }

    /// Returns the span of the given tier.
    #[must_use]
    pub const fn span(&self, tier: FloorTier) -> FloorSpan {
        match tier {
            FloorTier::Low => self.low,
            FloorTier::Middle => self.middle,
            FloorTier::High => self.high,
        }
    }

    /// Returns the tier containing `floor`, or `None` outside `[1, max_floor]`.
    #[must_use]
    pub fn tier_of(&self, floor: u32) -> Option<FloorTier> {
        FloorTier::ALL
            .into_iter()
            .find(|tier| self.span(*tier).contains(floor))
    }
}
