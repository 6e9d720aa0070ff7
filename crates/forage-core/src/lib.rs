//! Core spatial types for Forage: points, grid cells, and landscapes.
//!
//! This crate defines the read-only resource-quality field that the
//! simulation samples predator locations from. It is independent of the
//! scheduler. You can build a [`GridLandscape`] programmatically or
//! deserialize one from JSON.

/// Error types used throughout the crate.
pub mod error;
/// The quality-field collaborator trait and landscape identity.
pub mod field;
/// Points, grid cells, and rectangles.
pub mod geometry;
/// A dense grid implementation of [`field::QualityField`].
pub mod landscape;

/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the field trait and identity.
pub use field::{LandscapeId, QualityField};
/// Re-export geometry types.
pub use geometry::{Bounds, Cell, CellRect, Point};
/// Re-export the grid landscape.
pub use landscape::GridLandscape;
