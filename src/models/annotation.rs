//! Per-room annotations recorded by the user (merged and duplex rooms).

use crate::models::RoomAddress;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Which annotation map an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    /// Rooms combined into one logical room
    Merged,
    /// Rooms spanning two floors (duplex)
    Elevated,
}

impl AnnotationKind {
    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Merged => "merged",
            Self::Elevated => "elevated",
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Annotation payload stored for one room: the other rooms it is joined with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomAnnotation {
    /// Partner rooms of this relation
    pub partners: BTreeSet<RoomAddress>,
}

impl RoomAnnotation {
    /// Creates an annotation with the given partners.
    pub fn with_partners(partners: impl IntoIterator<Item = RoomAddress>) -> Self {
        Self {
            partners: partners.into_iter().collect(),
        }
    }
}

/// Mapping from room address to its annotation.
pub type AnnotationMap = BTreeMap<RoomAddress, RoomAnnotation>;
