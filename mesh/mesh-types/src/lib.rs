//! Core mesh types for STL/OBJ interchange.
//!
//! This crate provides the foundational types shared by the codecs and the
//! validators:
//!
//! - [`Triangle`] - A concrete triangle with `f32` vertex positions
//! - [`Mesh`] - An ordered facet list with per-facet normals and a name
//!
//! # Layer 0 Crate
//!
//! This crate has no knowledge of file formats or rendering. Parsers build a
//! [`Mesh`], and every consumer (serializers, validators, viewers) reads it.
//!
//! # Precision
//!
//! Coordinates are stored as `f32`, matching the STL record layout exactly.
//! Geometry that needs more headroom (validators) widens to `f64` locally.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**. Face winding is
//! counter-clockwise when viewed from outside, so normals derived with the
//! right-hand rule point outward.
//!
//! # Example
//!
//! ```
//! use mesh_types::{unit_square, Vector3};
//!
//! let square = unit_square();
//! assert_eq!(square.triangle_count(), 2);
//! assert_eq!(square.normals[0], Vector3::new(0.0, 0.0, 1.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod mesh;
mod triangle;

pub use mesh::{derive_normals, tetrahedron, unit_square, Mesh};
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
