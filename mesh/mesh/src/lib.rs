//! Mesh interchange toolkit: STL/OBJ codecs and geometric diagnostics.
//!
//! This umbrella crate re-exports the mesh-* crates behind one API. All
//! crates are Layer 0 (no GUI or rendering dependencies) and can be used in
//! CLI tools, servers or behind a viewer.
//!
//! # Quick Start
//!
//! ```no_run
//! use mesh::prelude::*;
//!
//! // Load an OBJ export (polygons are fan-triangulated)
//! let mesh = load_mesh("model.obj").unwrap();
//!
//! // Check it
//! let report = diagnose(&mesh, &ValidationParams::default()).unwrap();
//! println!("{report}");
//!
//! // Write it as binary STL
//! mesh::io::save_stl(&mesh, "model.stl", true).unwrap();
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Core data structures: `Mesh`, `Triangle`, fixtures
//! - [`io`] - STL ASCII/binary codecs, OBJ import, format detection
//! - [`validate`] - Positive-octant, orientation, shared-edge and ascending
//!   checks

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Core data structures: `Mesh`, `Triangle`.
pub use mesh_types as types;

/// STL and OBJ file I/O.
pub use mesh_io as io;

/// Mesh diagnostics.
pub use mesh_validate as validate;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for mesh conversion and checking.
///
/// # Usage
///
/// ```
/// use mesh::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{Mesh, Point3, Triangle, Vector3};

    // I/O
    pub use mesh_io::{load_mesh, save_mesh, IoError, MeshFormat};

    // Validation
    pub use mesh_validate::{diagnose, DiagnosticReport, Rule, ValidationParams};
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_imports() {
        // Verify prelude types are accessible
        use prelude::*;

        let mesh = Mesh::new();
        assert_eq!(mesh.triangle_count(), 0);
        assert!(MeshFormat::from_path("a.stl").is_some());
    }

    #[test]
    fn test_module_reexports() {
        // Verify all modules are accessible
        let _ = types::Mesh::new();
        let _ = io::stl::StlWriteOptions::default();
        let _ = validate::ValidationParams::default();
    }
}
