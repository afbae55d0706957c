//! Error types for mesh validation.

use thiserror::Error;

/// Result type for validation operations.
pub type ValidateResult<T> = Result<T, ValidateError>;

/// Errors that can occur during mesh validation.
///
/// A structurally valid mesh never fails validation; degenerate geometry is
/// reported as a violation percentage instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidateError {
    /// Triangles and normals have different lengths.
    #[error("inconsistent mesh: {triangles} triangles but {normals} normals")]
    InconsistentMesh {
        /// Number of triangles.
        triangles: usize,
        /// Number of normals.
        normals: usize,
    },
}

impl ValidateError {
    /// Fail unless the mesh has one normal per triangle.
    pub(crate) fn check_consistent(mesh: &mesh_types::Mesh) -> ValidateResult<()> {
        if mesh.has_consistent_normals() {
            Ok(())
        } else {
            Err(Self::InconsistentMesh {
                triangles: mesh.triangles.len(),
                normals: mesh.normals.len(),
            })
        }
    }
}
