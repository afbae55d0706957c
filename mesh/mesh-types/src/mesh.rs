//! Facet-list triangle mesh.

use crate::Triangle;
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle mesh stored as an ordered list of facets.
///
/// This is the hand-off type between every codec and the validators.
/// Unlike an indexed mesh, each facet carries its own three vertex
/// positions, which is exactly how STL stores geometry.
///
/// # Memory Layout
///
/// - `triangles`: `Vec<Triangle>` - facets in file order
/// - `normals`: `Vec<Vector3<f32>>` - one normal per facet, index-aligned
/// - `name`: solid label, empty when unnamed
///
/// The facet order is significant and is preserved by every codec.
/// `normals.len() == triangles.len()` must hold; constructors in this crate
/// guarantee it and consumers reject meshes that break it.
///
/// # Example
///
/// ```
/// use mesh_types::{Mesh, Triangle};
///
/// let tri = Triangle::from_arrays([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
/// let mesh = Mesh::from_triangles(vec![tri], "single");
///
/// assert_eq!(mesh.triangle_count(), 1);
/// assert_eq!(mesh.normals[0].z, 1.0);
/// assert!(mesh.has_consistent_normals());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mesh {
    /// Facets in source order.
    pub triangles: Vec<Triangle>,

    /// Per-facet normals, index-aligned with `triangles`.
    pub normals: Vec<Vector3<f32>>,

    /// Solid name (empty if unnamed).
    pub name: String,
}

impl Mesh {
    /// Create a new empty, unnamed mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            triangles: Vec::new(),
            normals: Vec::new(),
            name: String::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity for `triangle_count` facets.
    #[inline]
    #[must_use]
    pub fn with_capacity(triangle_count: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(triangle_count),
            normals: Vec::with_capacity(triangle_count),
            name: String::new(),
        }
    }

    /// Create a mesh from already-matched triangles and normals.
    ///
    /// No length check happens here; use [`Mesh::has_consistent_normals`]
    /// or let the consumer reject the mesh.
    #[inline]
    #[must_use]
    pub fn from_parts(
        triangles: Vec<Triangle>,
        normals: Vec<Vector3<f32>>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            triangles,
            normals,
            name: name.into(),
        }
    }

    /// Create a mesh whose normals are derived from the triangle winding.
    ///
    /// Normals come from [`derive_normals`], so they are **not** unit length.
    #[must_use]
    pub fn from_triangles(triangles: Vec<Triangle>, name: impl Into<String>) -> Self {
        let normals = derive_normals(&triangles);
        Self {
            triangles,
            normals,
            name: name.into(),
        }
    }

    /// Append one facet with its normal.
    #[inline]
    pub fn push(&mut self, triangle: Triangle, normal: Vector3<f32>) {
        self.triangles.push(triangle);
        self.normals.push(normal);
    }

    /// Number of facets.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Check if the mesh has no facets.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Whether every facet has exactly one normal.
    #[inline]
    #[must_use]
    pub fn has_consistent_normals(&self) -> bool {
        self.normals.len() == self.triangles.len()
    }

    /// Iterate over `(triangle, normal)` pairs.
    pub fn facets(&self) -> impl Iterator<Item = (&Triangle, &Vector3<f32>)> {
        self.triangles.iter().zip(&self.normals)
    }

    /// Replace every stored normal with one derived from winding order.
    pub fn rederive_normals(&mut self) {
        self.normals = derive_normals(&self.triangles);
    }
}

/// Derive one normal per triangle with the right-hand rule.
///
/// Each normal is `(v1 - v0) × (v2 - v0)`, left unnormalized: its length is
/// twice the triangle's area. Callers that need unit normals must normalize
/// explicitly.
///
/// # Example
///
/// ```
/// use mesh_types::{derive_normals, Triangle};
///
/// let tri = Triangle::from_arrays([0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]);
/// let normals = derive_normals(&[tri]);
/// assert_eq!(normals[0].z, 4.0);
/// ```
#[must_use]
pub fn derive_normals(triangles: &[Triangle]) -> Vec<Vector3<f32>> {
    triangles.iter().map(Triangle::normal_unnormalized).collect()
}

/// The two-triangle flat unit square in the z = 0 plane, named `square`.
///
/// Both facets are wound so their derived normal is `(0, 0, 1)`.
#[must_use]
pub fn unit_square() -> Mesh {
    let triangles = vec![
        Triangle::from_arrays([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        Triangle::from_arrays([1.0, 1.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
    ];
    Mesh::from_triangles(triangles, "square")
}

/// A closed tetrahedron with outward winding and unit normals.
///
/// Four facets, six distinct edges, every edge shared by exactly two facets,
/// all coordinates non-negative.
#[must_use]
pub fn tetrahedron() -> Mesh {
    let o = [0.0, 0.0, 0.0];
    let x = [1.0, 0.0, 0.0];
    let y = [0.0, 1.0, 0.0];
    let z = [0.0, 0.0, 1.0];

    let triangles = vec![
        Triangle::from_arrays(o, y, x), // bottom, faces -z
        Triangle::from_arrays(o, x, z), // faces -y
        Triangle::from_arrays(o, z, y), // faces -x
        Triangle::from_arrays(x, y, z), // slanted face
    ];
    let normals = triangles
        .iter()
        .map(|t| t.normal().unwrap_or_else(Vector3::zeros))
        .collect();

    Mesh::from_parts(triangles, normals, "tetrahedron")
}
