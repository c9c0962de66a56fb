//! Service layer for business logic.
//!
//! This module contains the reconciliation logic that keeps annotations in
//! step with the layout, and the store that owns a building's state.

pub mod reconcile;
pub mod store;

// Re-export commonly used types and functions
pub use reconcile::{
    dangling_partners, reconcile, rederive, DanglingPartner, DropReason, DroppedAnnotation,
};
pub use store::BuildingStore;
