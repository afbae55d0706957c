//! Geometric diagnostics for facet-list meshes.
//!
//! This crate checks four rules and reports each as a violation percentage
//! in `[0, 100]`:
//! - **Positive octant** - vertex coordinates are non-negative
//! - **Orientation** - normals are unit length and follow the right-hand rule
//! - **Shared edge** - every edge belongs to exactly two triangles
//! - **Ascending** - barycenter heights never decrease in facet order
//!
//! The checks only read the mesh, so [`diagnose`] runs them concurrently.
//! Tolerances come from [`ValidationParams`].
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with no GUI or I/O dependencies.
//!
//! # Example
//!
//! ```
//! use mesh_types::tetrahedron;
//! use mesh_validate::{diagnose, ValidationParams};
//!
//! let report = diagnose(&tetrahedron(), &ValidationParams::default()).unwrap();
//! assert!(report.is_clean());
//! println!("{report}");
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod checks;
mod edges;
mod error;
mod params;
mod report;

pub use checks::{ascending_barycenter, orientation, positive_octant, shared_edge};
pub use edges::{EdgeCounts, EdgeKey, PositionKey};
pub use error::{ValidateError, ValidateResult};
pub use params::ValidationParams;
pub use report::{diagnose, DiagnosticReport, Rule};
