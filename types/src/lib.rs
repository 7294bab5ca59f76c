//! Core domain types for Flame.
//!
//! This crate contains pure domain types with no IO and minimal dependencies:
//! points, affine coefficients, the variation kind enumeration and the
//! persisted function record.

mod descriptor;
mod geometry;
mod kind;

pub use descriptor::FunctionDescriptor;
pub use geometry::{Affine, AffineParseError, Point};
pub use kind::VariationKind;
