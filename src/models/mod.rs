//! Data models for building configurations, derived layouts and room annotations.
//!
//! This module contains the core data structures used throughout the application.
//! Models are independent of storage and presentation.

pub mod annotation;
pub mod floor_range;
pub mod layout;
pub mod room;
pub mod state;
pub mod unit;

// Re-export all model types
pub use annotation::{AnnotationKind, AnnotationMap, RoomAnnotation};
pub use floor_range::{FloorRange, FloorSpan, FloorTier};
pub use layout::{derive_layout, BuildingLayout, UnitLayout};
pub use room::{Floor, Room, RoomAddress};
pub use state::BuildingState;
pub use unit::{normalize_units, RoomCountInput, UnitSpec, DEFAULT_ROOM_COUNT};
